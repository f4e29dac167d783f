//! GPIO / peripheral pin assignments for the motor node main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// H-bridge (DRV8871-class, two PWM legs)
// ---------------------------------------------------------------------------

/// LEDC PWM output for bridge leg A (high-side drive, "forward" leg).
pub const BRIDGE_LEG_A_GPIO: i32 = 4;
/// LEDC PWM output for bridge leg B (high-side drive, "reverse" leg).
pub const BRIDGE_LEG_B_GPIO: i32 = 5;
/// Digital output: bridge DISABLE. Held LOW (bridge enabled) after bring-up;
/// LOW at reset so the motor cannot run before the duties are zeroed.
pub const BRIDGE_DISABLE_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Limit switches (active-low, external pull-up)
// ---------------------------------------------------------------------------

/// End-of-travel switch at the upper mechanical stop. LOW = pressed.
pub const LIMIT_UPPER_GPIO: i32 = 7;
/// End-of-travel switch at the lower mechanical stop. LOW = pressed.
pub const LIMIT_LOWER_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Address DIP switch (4 bits, active-low, external pull-up)
// ---------------------------------------------------------------------------

/// DIP bit 0 (weight 1). Switch closed = LOW = bit set.
pub const DIP_BIT0_GPIO: i32 = 9;
/// DIP bit 1 (weight 2).
pub const DIP_BIT1_GPIO: i32 = 10;
/// DIP bit 2 (weight 4).
pub const DIP_BIT2_GPIO: i32 = 16;
/// DIP bit 3 (weight 8).
pub const DIP_BIT3_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Address indicator (discrete RGB LED, common cathode)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// TWAI (CAN) transceiver
// ---------------------------------------------------------------------------

pub const TWAI_TX_GPIO: i32 = 18;
pub const TWAI_RX_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Bridge switching frequency (33 kHz ≈ 30 µs period, above audible range
/// and within the gate-driver rating).
pub const BRIDGE_PWM_FREQ_HZ: u32 = 33_000;
/// LEDC frequency for the RGB indicator (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
