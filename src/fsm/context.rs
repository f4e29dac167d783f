//! Shared mutable context threaded through every FSM handler.
//!
//! `NodeContext` is the single struct that state handlers read from and
//! write to. It contains this cycle's limit-switch snapshot, the pending
//! decoded command, the arbiter's output magnitude, configuration, and the
//! queued limit report. Think of it as the "blackboard" in a blackboard
//! architecture.

use crate::app::commands::MotorCommand;
use crate::config::NodeConfig;

// ---------------------------------------------------------------------------
// Limit-switch snapshot (read-only to state handlers; written by node loop)
// ---------------------------------------------------------------------------

/// A point-in-time reading of both end-of-travel switches.
///
/// Level, not edge: the arbiter re-evaluates this every cycle, so a held
/// switch keeps its end of travel barred no matter what commands arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitSnapshot {
    /// The carriage is pressing the upper end-of-travel switch.
    pub at_upper: bool,
    /// The carriage is pressing the lower end-of-travel switch.
    pub at_lower: bool,
}

/// Which end of travel a limit event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelEnd {
    Upper,
    Lower,
}

// ---------------------------------------------------------------------------
// NodeContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct NodeContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Inputs for this cycle --
    /// Latest limit-switch snapshot. Updated before each FSM tick.
    pub limits: LimitSnapshot,
    /// Command decoded from the bus this cycle, if any. Consumed (taken)
    /// by the state handler that applies it.
    pub pending_command: Option<MotorCommand>,

    // -- Arbiter output --
    /// Drive magnitude in percent. Zeroed on every entry to `Stopped`.
    pub magnitude: f32,
    /// A limit-forced stop happened this cycle; the node loop turns this
    /// into exactly one outbound status frame.
    pub limit_event: Option<TravelEnd>,

    // -- Configuration --
    pub config: NodeConfig,
}

impl NodeContext {
    /// Create a new context with the given configuration.
    pub fn new(config: NodeConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            limits: LimitSnapshot::default(),
            pending_command: None,
            magnitude: 0.0,
            limit_event: None,
            config,
        }
    }
}
