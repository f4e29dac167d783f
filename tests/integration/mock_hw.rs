//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command history
//! without touching real GPIO/PWM/TWAI registers.

use std::collections::VecDeque;

use canmotor::app::events::NodeEvent;
use canmotor::app::ports::{ActuatorPort, BusPort, EventSink, InputPort};
use canmotor::error::BusError;
use canmotor::fsm::context::LimitSnapshot;
use canmotor::protocol::Frame;

// ── MockBus ───────────────────────────────────────────────────

/// Scripted bus: frames queued by the test arrive one per poll; every sent
/// frame is recorded.
pub struct MockBus {
    pub rx: VecDeque<Frame>,
    pub sent: Vec<Frame>,
    /// When set, `send` reports a transmit failure instead of recording.
    pub fail_send: bool,
}

#[allow(dead_code)]
impl MockBus {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::new(),
            sent: Vec::new(),
            fail_send: false,
        }
    }

    pub fn queue(&mut self, id: u16, data: &[u8]) {
        self.rx.push_back(Frame::new(id, data).expect("test frame too long"));
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl BusPort for MockBus {
    fn poll(&mut self) -> Option<Frame> {
        self.rx.pop_front()
    }

    fn send(&mut self, frame: &Frame) -> Result<(), BusError> {
        if self.fail_send {
            return Err(BusError::TransmitFailed(-1));
        }
        self.sent.push(frame.clone());
        Ok(())
    }
}

// ── MockHardware ──────────────────────────────────────────────

/// Discrete inputs plus recording actuators.
pub struct MockHardware {
    /// Raw DIP line levels handed to `read_dip` (true = high = open).
    pub dip: [bool; 4],
    /// Limit snapshot returned from `read_limits` each cycle.
    pub limits: LimitSnapshot,
    /// Every `set_legs` call, in order.
    pub leg_writes: Vec<(f32, f32)>,
    /// Last indicator colour set, if any.
    pub indicator: Option<(u8, u8, u8)>,
    pub all_off_calls: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            dip: [true; 4], // all switches open → selector 0
            limits: LimitSnapshot::default(),
            leg_writes: Vec::new(),
            indicator: None,
            all_off_calls: 0,
        }
    }

    pub fn last_legs(&self) -> Option<(f32, f32)> {
        self.leg_writes.last().copied()
    }

    /// True if any recorded write ever put a nonzero duty on leg A.
    pub fn forward_duty_ever_written(&self) -> bool {
        self.leg_writes.iter().any(|&(a, _)| a > 0.0)
    }

    /// True if any recorded write ever put a nonzero duty on leg B.
    pub fn reverse_duty_ever_written(&self) -> bool {
        self.leg_writes.iter().any(|&(_, b)| b > 0.0)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn read_dip(&mut self) -> [bool; 4] {
        self.dip
    }

    fn read_limits(&mut self) -> LimitSnapshot {
        self.limits
    }
}

impl ActuatorPort for MockHardware {
    fn set_legs(&mut self, leg_a: f32, leg_b: f32) {
        self.leg_writes.push((leg_a, leg_b));
    }

    fn set_indicator(&mut self, r: u8, g: u8, b: u8) {
        self.indicator = Some((r, g, b));
    }

    fn all_off(&mut self) {
        self.leg_writes.push((0.0, 0.0));
        self.indicator = Some((0, 0, 0));
        self.all_off_calls += 1;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every emitted event for assertions.
pub struct RecordingSink {
    pub events: Vec<NodeEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_limit_events(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, NodeEvent::LimitReached(_)))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &NodeEvent) {
        self.events.push(*event);
    }
}
