//! Node service — the hexagonal core.
//!
//! [`NodeService`] owns the FSM and shared context and runs the node's one
//! job each cycle: poll the bus, arbitrate, drive the bridge. All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!    BusPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  InputPort ──▶ │      NodeService       │
//! ActuatorPort ◀─│  FSM · limit override  │
//!                └────────────────────────┘
//! ```
//!
//! ## Cycle ordering
//!
//! The limit supervisor runs **before** the FSM tick (so a stale motion
//! state is stopped before anything else happens) and **again after** it
//! (so a command applied into an already-active limit is re-overridden in
//! the same cycle — the motor never moves). The actuator port is written
//! exactly once per cycle, with the final arbitrated state.

use log::{info, warn};

use crate::addressing;
use crate::config::NodeConfig;
use crate::fsm::context::{NodeContext, TravelEnd};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::protocol;

use super::events::NodeEvent;
use super::ports::{ActuatorPort, BusPort, EventSink, InputPort};

// ───────────────────────────────────────────────────────────────
// Actuator mapping
// ───────────────────────────────────────────────────────────────

/// Map the arbitrated motor state onto the two bridge leg duties.
///
/// Exactly one leg carries the magnitude; the other is zero. `Stopped`
/// zeroes both. Callers hand the pair to [`ActuatorPort::set_legs`], which
/// writes both channels — the inactive leg can never keep a stale duty.
pub fn leg_duties(state: StateId, magnitude: f32) -> (f32, f32) {
    match state {
        StateId::Forward => (magnitude, 0.0),
        StateId::Reverse => (0.0, magnitude),
        StateId::Stopped => (0.0, 0.0),
    }
}

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The node service orchestrates all domain logic for one actuation node.
pub struct NodeService {
    fsm: Fsm,
    ctx: NodeContext,
    /// Resolved bus address (`base + DIP selector`). Immutable after boot.
    address: u16,
    tick_count: u64,
}

impl NodeService {
    /// Construct the service: read the DIP switch once, resolve the bus
    /// address, and light the indicator with the matching colour.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn bootstrap(
        config: NodeConfig,
        hw: &mut (impl InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> Self {
        let resolved = addressing::resolve(hw.read_dip(), config.base_address);
        let (r, g, b) = resolved.colour;
        hw.set_indicator(r, g, b);
        info!(
            "node address: 0x{:03X} (selector {})",
            resolved.address, resolved.selector
        );
        sink.emit(&NodeEvent::AddressResolved {
            address: resolved.address,
            selector: resolved.selector,
        });

        let ctx = NodeContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Stopped);

        Self {
            fsm,
            ctx,
            address: resolved.address,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (`Stopped`, zero duty).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&NodeEvent::Started(self.fsm.current_state()));
        info!("NodeService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full node cycle:
    /// read limits → poll bus → decode → arbitrate → report → drive.
    ///
    /// The `hw` parameter satisfies **both** [`InputPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit. The bus is a separate collaborator.
    pub fn step(
        &mut self,
        bus: &mut impl BusPort,
        hw: &mut (impl InputPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Fresh limit-switch levels for this cycle.
        self.ctx.limits = hw.read_limits();

        // 2. One non-blocking bus poll; decode at the boundary.
        if let Some(frame) = bus.poll() {
            if let Some(cmd) = protocol::decode(&frame, self.address, self.ctx.config.protocol) {
                sink.emit(&NodeEvent::CommandAccepted(cmd));
                self.ctx.pending_command = Some(cmd);
            }
        }

        // 3. Arbitrate. Limit override brackets the command application so
        //    neither a stale state nor a fresh command can drive into an
        //    active limit switch.
        self.enforce_limits();
        self.fsm.tick(&mut self.ctx);
        self.enforce_limits();

        // 4. Report a limit-forced stop: one status frame per transition.
        if let Some(end) = self.ctx.limit_event.take() {
            let frame = protocol::status_frame(end);
            if let Err(e) = bus.send(&frame) {
                warn!("status frame send failed: {e}");
            }
            sink.emit(&NodeEvent::LimitReached(end));
        }

        // 5. Drive the bridge with the final arbitrated state. Both legs
        //    are written every cycle.
        let (leg_a, leg_b) = leg_duties(self.fsm.current_state(), self.ctx.magnitude);
        hw.set_legs(leg_a, leg_b);

        // 6. Surface the state change, if the arbiter moved.
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&NodeEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current motor state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Current drive magnitude (percent).
    pub fn magnitude(&self) -> f32 {
        self.ctx.magnitude
    }

    /// The bus address this node answers to.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Total node cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Level-sensitive end-of-travel override.
    ///
    /// Forces `Stopped` whenever the current state is driving toward an
    /// active limit switch and queues the status report. Runs for moving
    /// states only, so a held switch cannot re-trigger once stopped — the
    /// event is tied to the transition, not the level.
    fn enforce_limits(&mut self) {
        let tripped = match self.fsm.current_state() {
            StateId::Forward if self.ctx.limits.at_upper => Some(TravelEnd::Upper),
            StateId::Reverse if self.ctx.limits.at_lower => Some(TravelEnd::Lower),
            _ => None,
        };
        if let Some(end) = tripped {
            warn!("limit reached ({end:?}) — forcing stop");
            self.fsm.force_transition(StateId::Stopped, &mut self.ctx);
            self.ctx.limit_event = Some(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_drives_leg_a_only() {
        assert_eq!(leg_duties(StateId::Forward, 25.0), (25.0, 0.0));
    }

    #[test]
    fn reverse_drives_leg_b_only() {
        assert_eq!(leg_duties(StateId::Reverse, 80.0), (0.0, 80.0));
    }

    #[test]
    fn stopped_zeroes_both_legs() {
        // Even a stale nonzero magnitude must not leak onto a leg.
        assert_eq!(leg_duties(StateId::Stopped, 60.0), (0.0, 0.0));
    }
}
