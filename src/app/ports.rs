//! Port traits — the hexagonal boundary between domain logic and the world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (bus controller, discrete inputs, actuators, event sinks)
//! implement these traits. The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! The peripheral contracts mirror what the node relies on:
//!
//! - **BusPort** polling is non-blocking — one check per cycle *is* the
//!   retry policy; there is no other.
//! - **ActuatorPort::set_legs** must write both bridge legs on every call,
//!   never leaving a stale duty on the inactive leg.

use crate::error::BusError;
use crate::fsm::context::LimitSnapshot;
use crate::protocol::Frame;

// ───────────────────────────────────────────────────────────────
// Bus port (driven adapter: CAN controller ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Frame exchange with the shared bus.
pub trait BusPort {
    /// Non-blocking receive: the next pending frame, if any.
    fn poll(&mut self) -> Option<Frame>;

    /// Synchronous, best-effort send. The caller logs and drops on failure;
    /// there is no retry queue.
    fn send(&mut self, frame: &Frame) -> Result<(), BusError>;
}

// ───────────────────────────────────────────────────────────────
// Discrete-input port (driven adapter: switches → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the node's discrete inputs.
pub trait InputPort {
    /// Raw levels of the four address DIP lines (true = high).
    /// Sampled once at boot.
    fn read_dip(&mut self) -> [bool; 4];

    /// Current end-of-travel switch state. Sampled fresh every cycle.
    fn read_limits(&mut self) -> LimitSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Set both bridge leg duties (percent, 0–100). Implementations MUST
    /// write both channels on every call.
    fn set_legs(&mut self, leg_a: f32, leg_b: f32);

    /// Set the address indicator colour.
    fn set_indicator(&mut self, r: u8, g: u8, b: u8);

    /// Kill all outputs (bridge legs and indicator) — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`NodeEvent`](super::events::NodeEvent)s
/// through this port. Adapters decide where they go (serial log, bus
/// telemetry, test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::NodeEvent);
}
