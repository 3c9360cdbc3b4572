//! Edge case and boundary condition tests for the door controller

use rs_garagedoor::hal::{
    DoorActuator, MockActuator, MockDelay, MockPin, RecordingNotifier, RelayActuator,
};
use rs_garagedoor::{
    Config, DoorAction, DoorConfig, DoorState, GarageDoorController, IgnoreReason, TargetState,
    TransitionTimer,
};

fn door() -> GarageDoorController<MockActuator, RecordingNotifier> {
    GarageDoorController::new(
        DoorConfig::default(),
        MockActuator::new(),
        RecordingNotifier::new(),
    )
}

// ============================================================================
// Timer Boundaries
// ============================================================================

#[test]
fn confirmation_fires_exactly_at_deadline() {
    let mut door = door();
    door.request_target(TargetState::Open, 1_000);

    assert_eq!(door.update(10_999), None);
    assert_eq!(door.update(11_000), Some(DoorState::Open));
}

#[test]
fn late_tick_still_confirms_once() {
    let mut door = door();
    door.request_target(TargetState::Open, 0);

    assert_eq!(door.update(60_000), Some(DoorState::Open));
    assert_eq!(door.update(60_001), None);
}

#[test]
fn clock_going_backwards_does_not_fire_early() {
    let mut door = door();
    door.request_target(TargetState::Open, 5_000);

    assert_eq!(door.update(1_000), None);
    let progress = door.state(1_000).pending.unwrap();
    assert_eq!(progress.elapsed_ms, 0);
    assert_eq!(door.current_state(), DoorState::Opening);
}

#[test]
fn arming_near_u64_max_saturates() {
    let mut door = door();
    door.request_target(TargetState::Open, u64::MAX - 10);

    assert_eq!(door.pending().unwrap().due_ms, u64::MAX);
    assert_eq!(door.update(u64::MAX), Some(DoorState::Open));
}

#[test]
fn requests_at_same_instant_follow_table() {
    let mut door = door();
    let states: Vec<_> = [
        TargetState::Open,
        TargetState::Open,
        TargetState::Open,
        TargetState::Open,
        TargetState::Closed,
    ]
    .into_iter()
    .map(|target| door.request_target(target, 0))
    .collect();

    assert_eq!(
        states,
        vec![
            DoorState::Opening,
            DoorState::Stopped,
            DoorState::Stopped,
            DoorState::Opening,
            DoorState::Stopped,
        ]
    );
    assert_eq!(door.actuator().trigger_count, 4);
}

#[test]
fn timer_generations_never_repeat_on_rearm() {
    let mut timer = TransitionTimer::new();
    let mut last = None;
    for now in 0..100 {
        let handle = timer
            .arm(now, 10, DoorState::Opening, DoorState::Open)
            .unwrap();
        if let Some(previous) = last {
            assert!(!timer.is_current(previous));
        }
        last = Some(handle);
    }
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn shutdown_cancels_pending_confirmation() {
    let mut door = door();
    door.request_target(TargetState::Open, 0);
    door.shutdown();

    assert!(!door.is_transitioning());
    assert_eq!(door.update(20_000), None);
    assert_eq!(door.current_state(), DoorState::Opening);
}

#[test]
fn shutdown_rejects_every_request() {
    let mut door = door();
    door.shutdown();
    door.shutdown();

    for target in [TargetState::Open, TargetState::Closed] {
        let outcome = door.apply_target(target, 0);
        assert_eq!(outcome.action, DoorAction::Ignored(IgnoreReason::ShutDown));
        assert_eq!(outcome.state, DoorState::Closed);
    }
    assert_eq!(door.actuator().trigger_count, 0);
    assert_eq!(door.target_state(), TargetState::Closed);
}

// ============================================================================
// Trigger Failure
// ============================================================================

#[test]
fn failed_stop_keeps_door_moving() {
    let mut door = door();
    door.request_target(TargetState::Open, 0);

    // Relay breaks mid-move
    let mut broken = GarageDoorController::new(
        DoorConfig::default(),
        MockActuator::failing(),
        RecordingNotifier::new(),
    )
    .starting_in(DoorState::Opening);

    let outcome = broken.apply_target(TargetState::Closed, 0);
    assert_eq!(outcome.action, DoorAction::TriggerFailed);
    assert_eq!(outcome.state, DoorState::Opening);
    assert_eq!(broken.trigger_count(), 0);
    assert!(broken.notifier().states.is_empty());

    // A working relay stops the same move
    assert_eq!(door.request_target(TargetState::Closed, 0), DoorState::Stopped);
}

#[test]
fn failed_resume_keeps_resume_armed() {
    let mut door = GarageDoorController::new(
        DoorConfig::default(),
        MockActuator::failing(),
        RecordingNotifier::new(),
    )
    .starting_in(DoorState::Stopped);

    door.request_target(TargetState::Open, 0);
    let outcome = door.apply_target(TargetState::Open, 0);

    assert_eq!(outcome.action, DoorAction::TriggerFailed);
    assert_eq!(outcome.state, DoorState::Stopped);
    assert!(door.resume_armed());
}

#[test]
fn relay_pin_failure_surfaces_as_trigger_failed() {
    let mut pin = MockPin::new();
    pin.fail_high = true;
    let relay = RelayActuator::new(pin, MockDelay::new(), 100).unwrap();
    let mut door =
        GarageDoorController::new(DoorConfig::default(), relay, RecordingNotifier::new());

    let outcome = door.apply_target(TargetState::Open, 0);
    assert_eq!(outcome.action, DoorAction::TriggerFailed);
    assert!(!door.actuator().pin().is_high());
}

// ============================================================================
// Actuators Through The Controller
// ============================================================================

#[test]
fn relay_pulses_once_per_trigger() {
    let config = DoorConfig::default().with_trigger_hold_s(0.25);
    let relay = RelayActuator::from_config(MockPin::new(), MockDelay::new(), &config).unwrap();
    let mut door = GarageDoorController::new(config, relay, RecordingNotifier::new());

    door.request_target(TargetState::Open, 0);
    door.request_target(TargetState::Open, 100);

    assert_eq!(
        door.actuator().pin().levels,
        vec![false, true, false, true, false]
    );
    assert_eq!(door.actuator().delay().total_ms(), 500);
}

#[test]
fn simulated_actuator_drives_full_cycle() {
    let relay = DoorActuator::<MockActuator>::select(true, || Ok::<_, ()>(MockActuator::new()))
        .unwrap();
    let mut door = GarageDoorController::new(DoorConfig::default(), relay, RecordingNotifier::new());

    door.request_target(TargetState::Open, 0);
    door.update(10_000);
    door.request_target(TargetState::Closed, 20_000);
    door.update(30_000);

    assert_eq!(door.current_state(), DoorState::Closed);
    assert_eq!(door.trigger_count(), 2);
    match door.actuator() {
        DoorActuator::Simulated(sim) => assert_eq!(sim.pulses(), 2),
        DoorActuator::Hardware(_) => panic!("expected simulation"),
    }
}

// ============================================================================
// Config Fallbacks
// ============================================================================

#[test]
fn nonsense_timings_fall_back_to_defaults() {
    let config = DoorConfig::default()
        .with_time_to_move_s(0.0)
        .with_trigger_hold_s(-1.0);
    assert_eq!(config.time_to_move_ms(), 10_000);
    assert_eq!(config.trigger_hold_ms(), 100);

    let config = DoorConfig::default()
        .with_time_to_move_s(f32::NAN)
        .with_trigger_hold_s(f32::INFINITY);
    assert_eq!(config.time_to_move_ms(), 10_000);
    assert_eq!(config.trigger_hold_ms(), 100);
}

#[test]
fn zero_pin_falls_back_to_default() {
    assert_eq!(DoorConfig::default().with_door_pin(0).door_pin, 12);
    assert_eq!(DoorConfig::default().with_door_pin(17).door_pin, 17);
}

#[test]
fn controller_uses_fallback_travel_time() {
    let config = DoorConfig::new(12, -5.0, 0.1);
    let mut door = GarageDoorController::new(config, MockActuator::new(), RecordingNotifier::new());

    door.request_target(TargetState::Open, 0);
    assert_eq!(door.update(9_999), None);
    assert_eq!(door.update(10_000), Some(DoorState::Open));
}

#[test]
fn default_config_sections() {
    let config = Config::default();
    assert_eq!(config.door, DoorConfig::default());
    assert_eq!(config.device.tick_ms, 50);
    assert!(!config.device.simulate);
    assert!(config.web.enabled);
}
