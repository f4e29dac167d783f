//! CanMotor Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single busy-poll node loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  TwaiBus          NodeHardware            LogEventSink   │
//! │  (BusPort)        (InputPort+ActuatorPort) (EventSink)   │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ───────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           NodeService (pure logic)                 │  │
//! │  │  address resolution · decode · FSM · limit guard   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One iteration = one cycle: poll bus → decode → arbitrate → drive →
//! feed watchdog. No tasks, no queues, no suspension points.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use canmotor::adapters::bus::TwaiBus;
use canmotor::adapters::hardware::NodeHardware;
use canmotor::adapters::log_sink::LogEventSink;
use canmotor::app::ports::ActuatorPort;
use canmotor::app::service::NodeService;
use canmotor::config::NodeConfig;
use canmotor::drivers::bridge::BridgeDriver;
use canmotor::drivers::dip_switch::DipSwitch;
use canmotor::drivers::hw_init;
use canmotor::drivers::indicator::IndicatorLed;
use canmotor::drivers::limit_switch::LimitSwitches;
use canmotor::drivers::watchdog::Watchdog;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("canmotor v{} — bus-addressed motor node", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripheral bring-up ────────────────────────────────
    // Bridge duties come up zeroed and DISABLE is driven low here, before
    // anything can command motion.
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    // ── 3. Select the node variant ────────────────────────────
    #[cfg(feature = "duty-command")]
    let config = NodeConfig::duty();
    #[cfg(not(feature = "duty-command"))]
    let config = NodeConfig::default();

    info!(
        "variant: {:?} protocol, id family 0x{:03X}",
        config.protocol, config.base_address
    );

    // ── 4. CAN controller ─────────────────────────────────────
    // Without its bus the node is useless: signal the fault visually
    // forever and wait for a power-cycle.
    let mut bus = match TwaiBus::new() {
        Ok(b) => b,
        Err(e) => {
            error!("CAN controller init failed: {e} — power-cycle required");
            IndicatorLed::new().fault_blink_forever();
        }
    };

    // ── 5. Hardware adapter ───────────────────────────────────
    let mut hw = NodeHardware::new(
        DipSwitch::new(),
        LimitSwitches::new(),
        BridgeDriver::new(),
        IndicatorLed::new(),
    );
    // Runaway prevention: both legs written to zero before the first
    // arbitration cycle.
    hw.all_off();

    // ── 6. Node service ───────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut node = NodeService::bootstrap(config, &mut hw, &mut sink);
    node.start(&mut sink);

    info!("Node ready. Entering poll loop.");

    // ── 7. Poll loop ──────────────────────────────────────────
    loop {
        node.step(&mut bus, &mut hw, &mut sink);
        watchdog.feed();
    }
}
