//! TWAI (CAN) controller driver.
//!
//! Wraps the ESP-IDF TWAI driver at 1 Mbit/s with an accept-all filter —
//! address matching is done in software by the protocol decoder, since the
//! node's identifier is only known after the DIP switch is read.
//!
//! The receive path is strictly non-blocking (zero-tick timeout): the node
//! loop polls once per cycle and moves on. Transmit uses a short timeout so
//! a saturated queue degrades to a dropped status frame instead of stalling
//! the loop.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real TWAI peripheral.
//! On host/test: a quiet stub (no frames ever arrive; sends vanish).

use crate::error::BusError;
use crate::protocol::Frame;

#[cfg(target_os = "espidf")]
use crate::pins;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

/// Transmit timeout in FreeRTOS ticks (~10 ms at the default tick rate).
#[cfg(target_os = "espidf")]
const TX_TIMEOUT_TICKS: u32 = 10;

pub struct TwaiDriver {
    _private: (),
}

#[cfg(target_os = "espidf")]
impl TwaiDriver {
    /// Install and start the TWAI driver. Errors here are fatal for the
    /// node — the caller signals them with the indicator fault blink.
    pub fn new() -> Result<Self, BusError> {
        let general = twai_general_config_t {
            mode: twai_mode_t_TWAI_MODE_NORMAL,
            tx_io: pins::TWAI_TX_GPIO,
            rx_io: pins::TWAI_RX_GPIO,
            clkout_io: -1,
            bus_off_io: -1,
            tx_queue_len: 8,
            rx_queue_len: 16,
            alerts_enabled: TWAI_ALERT_NONE,
            clkout_divider: 0,
            ..Default::default()
        };

        // 1 Mbit/s bit timing (the values of TWAI_TIMING_CONFIG_1MBITS).
        let timing = twai_timing_config_t {
            brp: 4,
            tseg_1: 15,
            tseg_2: 4,
            sjw: 3,
            triple_sampling: false,
            ..Default::default()
        };

        // Accept everything; the decoder filters by resolved address.
        let filter = twai_filter_config_t {
            acceptance_code: 0,
            acceptance_mask: 0xFFFF_FFFF,
            single_filter: true,
        };

        // SAFETY: install/start are called once from main() before the node
        // loop; the config structs live on the stack for the call only, as
        // the IDF copies them.
        let ret = unsafe { twai_driver_install(&general, &timing, &filter) };
        if ret != ESP_OK as i32 {
            return Err(BusError::InitFailed(ret));
        }
        let ret = unsafe { twai_start() };
        if ret != ESP_OK as i32 {
            return Err(BusError::InitFailed(ret));
        }

        info!("twai: controller started (1 Mbit/s, accept-all filter)");
        Ok(Self { _private: () })
    }

    /// Non-blocking receive: the next pending frame, if any.
    pub fn poll(&mut self) -> Option<Frame> {
        let mut msg = twai_message_t::default();
        // SAFETY: msg is a plain out-parameter; zero timeout never blocks.
        let ret = unsafe { twai_receive(&mut msg, 0) };
        if ret != ESP_OK as i32 {
            return None;
        }

        let len = usize::from(msg.data_length_code).min(8);
        Frame::new(msg.identifier as u16, &msg.data[..len])
    }

    /// Synchronous send with a short timeout.
    pub fn send(&mut self, frame: &Frame) -> Result<(), BusError> {
        let mut msg = twai_message_t::default();
        msg.identifier = u32::from(frame.id);
        msg.data_length_code = frame.data.len() as u8;
        msg.data[..frame.data.len()].copy_from_slice(&frame.data);

        // SAFETY: msg is fully initialised above; the IDF copies it into
        // the transmit queue before returning.
        let ret = unsafe { twai_transmit(&msg, TX_TIMEOUT_TICKS) };
        if ret != ESP_OK as i32 {
            return Err(BusError::TransmitFailed(ret));
        }
        Ok(())
    }
}

#[cfg(not(target_os = "espidf"))]
impl TwaiDriver {
    pub fn new() -> Result<Self, BusError> {
        log::info!("twai(sim): controller stub started");
        Ok(Self { _private: () })
    }

    pub fn poll(&mut self) -> Option<Frame> {
        None
    }

    pub fn send(&mut self, frame: &Frame) -> Result<(), BusError> {
        log::debug!("twai(sim): send id=0x{:03X} dropped", frame.id);
        Ok(())
    }
}
