//! Inbound motor commands.
//!
//! These are the typed form of what arrives on the bus, produced once at
//! the [`protocol`](crate::protocol) boundary. The arbiter never handles
//! raw frame bytes.

/// A decoded, addressed command for this node's motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    /// Run in a fixed direction at the configured drive strength, or stop.
    SetDirection(DriveDirection),

    /// Run at a signed power percentage: sign selects the direction,
    /// magnitude the duty (clamped to the configured ceiling), zero stops.
    SetPower(f32),
}

/// The three-way direction command of the opcode protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDirection {
    /// Toward the upper end of travel.
    Forward,
    /// Toward the lower end of travel.
    Reverse,
    Stop,
}
