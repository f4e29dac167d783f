//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the discrete-input readers and both actuator drivers, exposing them
//! through [`InputPort`] and [`ActuatorPort`]. Together with the bus
//! adapter, this is the only module in the system that touches actual
//! hardware. On non-espidf targets, the underlying drivers use cfg-gated
//! simulation stubs.

use crate::app::ports::{ActuatorPort, InputPort};
use crate::drivers::bridge::BridgeDriver;
use crate::drivers::dip_switch::DipSwitch;
use crate::drivers::indicator::IndicatorLed;
use crate::drivers::limit_switch::LimitSwitches;
use crate::fsm::context::LimitSnapshot;

/// Concrete adapter that combines the node's I/O behind port traits.
pub struct NodeHardware {
    dip: DipSwitch,
    limits: LimitSwitches,
    bridge: BridgeDriver,
    led: IndicatorLed,
}

impl NodeHardware {
    pub fn new(
        dip: DipSwitch,
        limits: LimitSwitches,
        bridge: BridgeDriver,
        led: IndicatorLed,
    ) -> Self {
        Self {
            dip,
            limits,
            bridge,
            led,
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for NodeHardware {
    fn read_dip(&mut self) -> [bool; 4] {
        self.dip.read()
    }

    fn read_limits(&mut self) -> LimitSnapshot {
        self.limits.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for NodeHardware {
    fn set_legs(&mut self, leg_a: f32, leg_b: f32) {
        self.bridge.set_legs(leg_a, leg_b);
    }

    fn set_indicator(&mut self, r: u8, g: u8, b: u8) {
        self.led.show(r, g, b);
    }

    fn all_off(&mut self) {
        self.bridge.coast();
        self.led.off();
    }
}
