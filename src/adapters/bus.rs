//! Bus adapter — the TWAI controller behind the [`BusPort`] trait.

use crate::app::ports::BusPort;
use crate::drivers::twai::TwaiDriver;
use crate::error::BusError;
use crate::protocol::Frame;

/// Adapter wrapping the TWAI driver as the domain's bus port.
pub struct TwaiBus {
    driver: TwaiDriver,
}

impl TwaiBus {
    /// Bring up the CAN controller. A failure here is fatal for the node;
    /// the caller owns the fault signalling.
    pub fn new() -> Result<Self, BusError> {
        Ok(Self {
            driver: TwaiDriver::new()?,
        })
    }
}

impl BusPort for TwaiBus {
    fn poll(&mut self) -> Option<Frame> {
        self.driver.poll()
    }

    fn send(&mut self, frame: &Frame) -> Result<(), BusError> {
        self.driver.send(frame)
    }
}
