//! Outbound application events.
//!
//! The [`NodeService`](super::service::NodeService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — today that is the serial log (the
//! diagnostic stream); a bus-telemetry adapter would implement the same
//! trait.

use crate::app::commands::MotorCommand;
use crate::fsm::context::TravelEnd;
use crate::fsm::StateId;

/// Structured events emitted by the node core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeEvent {
    /// The node finished boot: resolved bus address and DIP selector.
    AddressResolved { address: u16, selector: u8 },

    /// The node service has started (carries the initial motor state).
    Started(StateId),

    /// A frame addressed to this node decoded into a command.
    CommandAccepted(MotorCommand),

    /// The arbiter changed motor state.
    StateChanged { from: StateId, to: StateId },

    /// A limit switch forced a stop; a status frame was sent for it.
    LimitReached(TravelEnd),
}
