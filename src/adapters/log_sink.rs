//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured node events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production). This is the
//! diagnostic text stream: write-only, best-effort, not part of the control
//! contract. A bus-telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::NodeEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::TravelEnd;

/// Adapter that logs every [`NodeEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &NodeEvent) {
        match event {
            NodeEvent::AddressResolved { address, selector } => {
                info!("ADDR  | 0x{:03X} (DIP selector {})", address, selector);
            }
            NodeEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            NodeEvent::CommandAccepted(cmd) => {
                info!("CMD   | {:?}", cmd);
            }
            NodeEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            NodeEvent::LimitReached(end) => {
                let which = match end {
                    TravelEnd::Upper => "upper",
                    TravelEnd::Lower => "lower",
                };
                info!("LIMIT | {} stop reached, status frame sent", which);
            }
        }
    }
}
