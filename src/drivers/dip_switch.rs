//! 4-bit address DIP switch reader.
//!
//! The four lines are active-low with pull-ups: a closed switch pulls its
//! line to ground. This driver returns the raw sampled levels; the weighting
//! and inversion live in [`addressing`](crate::addressing), which is pure
//! and unit-tested. Sampled once at boot — mechanical bounce is irrelevant
//! at that point, so the lines are read raw.

use crate::drivers::hw_init;
use crate::pins;

pub struct DipSwitch {
    gpios: [i32; 4],
}

impl DipSwitch {
    pub fn new() -> Self {
        Self {
            gpios: [
                pins::DIP_BIT0_GPIO,
                pins::DIP_BIT1_GPIO,
                pins::DIP_BIT2_GPIO,
                pins::DIP_BIT3_GPIO,
            ],
        }
    }

    /// Raw line levels, index = bit weight (true = high = switch open).
    pub fn read(&self) -> [bool; 4] {
        self.gpios.map(hw_init::gpio_read)
    }
}
