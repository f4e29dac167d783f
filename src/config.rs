//! Node configuration parameters
//!
//! All tunable parameters for one motor node. A deployment builds one of two
//! presets: the direction-protocol node (fixed drive strength, opcode
//! commands) or the duty-protocol node (power carried in the command).

use serde::{Deserialize, Serialize};

use crate::protocol::ProtocolKind;

/// Core node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which command protocol this node speaks on the bus.
    pub protocol: ProtocolKind,
    /// Protocol-family base identifier; the DIP selector is added to this.
    pub base_address: u16,
    /// Drive strength (percent) applied by direction-only commands.
    pub fixed_duty_percent: f32,
    /// Ceiling (percent) for commanded power magnitudes, bounding worst-case
    /// current draw. Applied to both signs independently.
    pub max_duty_percent: f32,
}

impl Default for NodeConfig {
    /// The direction-protocol node (`0x300` identifier family).
    fn default() -> Self {
        Self {
            protocol: ProtocolKind::Direction,
            base_address: 0x300,
            fixed_duty_percent: 25.0,
            max_duty_percent: 100.0,
        }
    }
}

impl NodeConfig {
    /// The duty-protocol node (`0x100` identifier family).
    pub fn duty() -> Self {
        Self {
            protocol: ProtocolKind::Duty,
            base_address: 0x100,
            fixed_duty_percent: 25.0,
            max_duty_percent: 80.0,
        }
    }
}
