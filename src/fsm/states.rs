//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!              [Forward cmd / SetPower > 0]
//!  STOPPED ───────────────────────────────▶ FORWARD
//!     ▲  ▲                                    │
//!     │  └────[Stop cmd / limit supervisor]───┘
//!     │
//!     │       [Reverse cmd / SetPower < 0]
//!     └──◀────────────────────────────────  REVERSE
//! ```
//!
//! Handlers only apply the cycle's decoded command; the end-of-travel
//! override is enforced by the supervisor in the node service, which calls
//! `force_transition(Stopped)` over the top of whatever the handlers chose.

use super::context::NodeContext;
use super::{StateDescriptor, StateId};
use crate::app::commands::{DriveDirection, MotorCommand};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Stopped
        StateDescriptor {
            id: StateId::Stopped,
            name: "Stopped",
            on_enter: Some(stopped_enter),
            on_exit: None,
            on_update: apply_pending_command,
        },
        // Index 1 — Forward
        StateDescriptor {
            id: StateId::Forward,
            name: "Forward",
            on_enter: Some(forward_enter),
            on_exit: None,
            on_update: apply_pending_command,
        },
        // Index 2 — Reverse
        StateDescriptor {
            id: StateId::Reverse,
            name: "Reverse",
            on_enter: Some(reverse_enter),
            on_exit: None,
            on_update: apply_pending_command,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Enter actions
// ═══════════════════════════════════════════════════════════════════════════

fn stopped_enter(ctx: &mut NodeContext) {
    // Both legs go to zero through the per-cycle drive mapping.
    ctx.magnitude = 0.0;
    info!("STOPPED: motor coasting");
}

fn forward_enter(ctx: &mut NodeContext) {
    info!("FORWARD: driving at {:.0}%", ctx.magnitude);
}

fn reverse_enter(ctx: &mut NodeContext) {
    info!("REVERSE: driving at {:.0}%", ctx.magnitude);
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared update: command application
// ═══════════════════════════════════════════════════════════════════════════

/// Apply this cycle's decoded command, if one arrived.
///
/// Shared by all three states: the command alone picks the next state, and
/// with no command the state and magnitude persist unchanged — the motor
/// keeps running until explicitly told otherwise.
fn apply_pending_command(ctx: &mut NodeContext) -> Option<StateId> {
    let cmd = ctx.pending_command.take()?;

    match cmd {
        MotorCommand::SetDirection(DriveDirection::Forward) => {
            ctx.magnitude = ctx.config.fixed_duty_percent;
            Some(StateId::Forward)
        }
        MotorCommand::SetDirection(DriveDirection::Reverse) => {
            ctx.magnitude = ctx.config.fixed_duty_percent;
            Some(StateId::Reverse)
        }
        MotorCommand::SetDirection(DriveDirection::Stop) => Some(StateId::Stopped),
        MotorCommand::SetPower(v) => {
            // Out-of-range magnitudes are recovered locally by clamping to
            // the configured ceiling; the sign alone picks the direction.
            ctx.magnitude = v.abs().clamp(0.0, ctx.config.max_duty_percent);
            if v > 0.0 {
                Some(StateId::Forward)
            } else if v < 0.0 {
                Some(StateId::Reverse)
            } else {
                Some(StateId::Stopped)
            }
        }
    }
}
