//! Dual-leg PWM bridge driver (DRV8871-class H-bridge).
//!
//! Each leg of the bridge gets its own LEDC channel; direction is encoded
//! by which leg carries the duty, not by a direction pin.
//!
//! ## Safety contract
//!
//! Callers must write both legs together on every update — the inactive
//! leg is explicitly zeroed rather than left at its previous duty. This is
//! the node's runaway-prevention guarantee and the reason `set_legs` is the
//! only mutator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives two LEDC channels via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct BridgeDriver {
    current: (f32, f32),
}

impl BridgeDriver {
    pub fn new() -> Self {
        Self { current: (0.0, 0.0) }
    }

    /// Write both leg duties (percent, clamped to 0–100) in one call.
    pub fn set_legs(&mut self, leg_a: f32, leg_b: f32) {
        let leg_a = leg_a.clamp(0.0, 100.0);
        let leg_b = leg_b.clamp(0.0, 100.0);

        hw_init::ledc_set(hw_init::LEDC_CH_LEG_A, percent_to_duty(leg_a));
        hw_init::ledc_set(hw_init::LEDC_CH_LEG_B, percent_to_duty(leg_b));

        self.current = (leg_a, leg_b);
    }

    /// Zero both legs — the motor coasts.
    pub fn coast(&mut self) {
        self.set_legs(0.0, 0.0);
    }

    /// Last duties written (percent).
    pub fn current(&self) -> (f32, f32) {
        self.current
    }

    pub fn is_driving(&self) -> bool {
        self.current != (0.0, 0.0)
    }
}

/// Percent (0–100) to 8-bit LEDC duty (0–255).
fn percent_to_duty(percent: f32) -> u8 {
    (percent * 255.0 / 100.0) as u8
}
