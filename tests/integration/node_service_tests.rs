//! Integration tests for the NodeService → FSM → bridge pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from an
//! incoming bus frame down to the per-cycle leg duty writes, without any
//! real hardware.

use crate::mock_hw::{MockBus, MockHardware, RecordingSink};

use canmotor::addressing::PALETTE;
use canmotor::app::events::NodeEvent;
use canmotor::app::service::NodeService;
use canmotor::config::NodeConfig;
use canmotor::fsm::context::TravelEnd;
use canmotor::fsm::StateId;
use canmotor::protocol::{OP_FORWARD, OP_LIMIT_REACHED, OP_REVERSE, OP_SET_POWER, OP_STOP, STATUS_FRAME_ID};

fn make_node(config: NodeConfig) -> (NodeService, MockBus, MockHardware, RecordingSink) {
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    let mut node = NodeService::bootstrap(config, &mut hw, &mut sink);
    node.start(&mut sink);
    (node, MockBus::new(), hw, sink)
}

// ── Boot / address resolution ─────────────────────────────────

#[test]
fn bootstrap_resolves_address_and_lights_indicator() {
    let (node, _bus, hw, sink) = make_node(NodeConfig::default());

    assert_eq!(node.address(), 0x300, "all-open DIP selects base address");
    assert_eq!(hw.indicator, Some(PALETTE[0]));
    assert!(sink.events.contains(&NodeEvent::AddressResolved {
        address: 0x300,
        selector: 0,
    }));
    assert!(sink.events.contains(&NodeEvent::Started(StateId::Stopped)));
}

#[test]
fn dip_selector_offsets_address() {
    let mut hw = MockHardware::new();
    hw.dip = [false, false, true, true]; // bits 0+1 closed → selector 3
    let mut sink = RecordingSink::new();
    let node = NodeService::bootstrap(NodeConfig::duty(), &mut hw, &mut sink);

    assert_eq!(node.address(), 0x103);
    assert_eq!(hw.indicator, Some(PALETTE[3]));
}

// ── Direction protocol scenario ───────────────────────────────

#[test]
fn forward_command_drives_leg_a_at_fixed_duty() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Forward);
    assert_eq!(hw.last_legs(), Some((25.0, 0.0)));
}

#[test]
fn upper_limit_stops_and_reports_exactly_once() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Forward);

    // The carriage reaches the upper stop.
    hw.limits.at_upper = true;
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));
    assert_eq!(bus.sent.len(), 1);
    let status = &bus.sent[0];
    assert_eq!(status.id, STATUS_FRAME_ID);
    assert_eq!(&status.data[..2], &[OP_LIMIT_REACHED, 0x01]);
    assert_eq!(sink.count_limit_events(), 1);

    // Switch stays pressed: no further frames while stopped.
    for _ in 0..10 {
        node.step(&mut bus, &mut hw, &mut sink);
    }
    assert_eq!(bus.sent.len(), 1, "held switch must not re-report");
    assert_eq!(sink.count_limit_events(), 1);
}

#[test]
fn lower_limit_reports_direction_zero() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_REVERSE]);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Reverse);
    assert_eq!(hw.last_legs(), Some((0.0, 25.0)));

    hw.limits.at_lower = true;
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(&bus.sent[0].data[..2], &[OP_LIMIT_REACHED, 0x00]);
    assert!(sink.events.contains(&NodeEvent::LimitReached(TravelEnd::Lower)));
}

#[test]
fn motor_keeps_running_between_commands() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);

    // Many quiet cycles: state persists, legs rewritten every cycle.
    for _ in 0..20 {
        node.step(&mut bus, &mut hw, &mut sink);
    }
    assert_eq!(node.state(), StateId::Forward);
    assert_eq!(hw.leg_writes.len(), 21);
    assert!(hw.leg_writes.iter().all(|&legs| legs == (25.0, 0.0)));
}

#[test]
fn stop_is_idempotent() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);

    bus.queue(0x300, &[OP_STOP]);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));

    bus.queue(0x300, &[OP_STOP]);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));

    // Stopping is not a limit event: nothing was reported.
    assert!(bus.sent.is_empty());
    assert_eq!(sink.count_limit_events(), 0);
}

// ── Command into an active limit ──────────────────────────────

#[test]
fn forward_into_held_upper_limit_never_moves() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    hw.limits.at_upper = true;
    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);

    // Accepted, then re-overridden the same cycle: net effect no motion.
    assert_eq!(node.state(), StateId::Stopped);
    assert!(!hw.forward_duty_ever_written());
    assert_eq!(bus.sent.len(), 1);
    assert_eq!(&bus.sent[0].data[..2], &[OP_LIMIT_REACHED, 0x01]);
}

#[test]
fn reverse_command_wins_over_stale_forward_at_limit() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);

    // Limit trips in the same cycle a reverse command arrives: the stale
    // forward state is stopped (and reported), then the new command runs
    // the motor away from the stop.
    hw.limits.at_upper = true;
    bus.queue(0x300, &[OP_REVERSE]);
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Reverse);
    assert_eq!(hw.last_legs(), Some((0.0, 25.0)));
    assert_eq!(bus.sent.len(), 1);
}

// ── Duty protocol scenario ────────────────────────────────────

#[test]
fn negative_power_reverses_with_clamped_magnitude() {
    let mut hw = MockHardware::new();
    hw.dip = [false, false, true, true]; // selector 3 → 0x103
    let mut sink = RecordingSink::new();
    let mut node = NodeService::bootstrap(NodeConfig::duty(), &mut hw, &mut sink);
    node.start(&mut sink);
    let mut bus = MockBus::new();

    let mut payload = [0u8; 5];
    payload[0] = OP_SET_POWER;
    payload[1..5].copy_from_slice(&(-120i32).to_be_bytes());
    bus.queue(0x103, &payload);
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Reverse);
    assert_eq!(node.magnitude(), 80.0, "magnitude clamps to max_duty");
    assert_eq!(hw.last_legs(), Some((0.0, 80.0)));
}

#[test]
fn zero_power_stops() {
    // All-open DIP → selector 0 → address 0x100 on the duty family.
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::duty());

    let mut run = [0u8; 5];
    run[0] = OP_SET_POWER;
    run[1..5].copy_from_slice(&55i32.to_be_bytes());
    bus.queue(0x100, &run);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Forward);
    assert_eq!(hw.last_legs(), Some((55.0, 0.0)));

    let mut stop = [0u8; 5];
    stop[0] = OP_SET_POWER;
    bus.queue(0x100, &stop);
    node.step(&mut bus, &mut hw, &mut sink);
    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));
}

// ── Shared-bus hygiene ────────────────────────────────────────

#[test]
fn frames_for_other_nodes_change_nothing() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x301, &[OP_FORWARD]); // neighbour's address
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));
    assert!(
        !sink.events.iter().any(|e| matches!(e, NodeEvent::CommandAccepted(_))),
        "unaddressed frames must not surface as commands"
    );
}

#[test]
fn unknown_opcode_is_ignored() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());

    bus.queue(0x300, &[0x55, 0xAA]);
    node.step(&mut bus, &mut hw, &mut sink);

    assert_eq!(node.state(), StateId::Stopped);
    assert!(!sink.events.iter().any(|e| matches!(e, NodeEvent::CommandAccepted(_))));
}

// ── Degraded bus ──────────────────────────────────────────────

#[test]
fn failed_status_send_still_stops_the_motor() {
    let (mut node, mut bus, mut hw, mut sink) = make_node(NodeConfig::default());
    bus.fail_send = true;

    bus.queue(0x300, &[OP_FORWARD]);
    node.step(&mut bus, &mut hw, &mut sink);
    hw.limits.at_upper = true;
    node.step(&mut bus, &mut hw, &mut sink);

    // The stop and the local event happen regardless of bus health.
    assert_eq!(node.state(), StateId::Stopped);
    assert_eq!(hw.last_legs(), Some((0.0, 0.0)));
    assert_eq!(sink.count_limit_events(), 1);
    assert!(bus.sent.is_empty());
}
