/// Regression tests for the admission & scheduling edge cases

use std::time::Duration;

use tether_shared::{
    Admission, Channel, DiscardReason, HostType, ReconciliationConfig, ReconciliationScheduler,
    StateOrder,
};
use tether_test::{test_simulation::MALFORMED_FRAGMENT_TAG, ManualClock, RecordingSimulation};

fn scheduler(state_interpolation: u8, state_order: StateOrder) -> ReconciliationScheduler {
    let config = ReconciliationConfig {
        state_interpolation,
        state_order,
        ..Default::default()
    };
    ReconciliationScheduler::new(config, HostType::Client).unwrap()
}

/// A state 3 remote ticks old is still inside interpolation plus variance
#[test]
fn appended_state_ready_one_tick_past_boundary() {
    let mut scheduler = scheduler(1, StateOrder::Appended);
    let mut simulation = RecordingSimulation::new();
    scheduler.ingest(97, b"s", Channel::Unreliable, 500);

    assert_eq!(scheduler.tick(&ManualClock::new(100, 503), &mut simulation), 0);
    assert_eq!(scheduler.buffered_ticks(), vec![97]);

    assert_eq!(scheduler.tick(&ManualClock::new(100, 504), &mut simulation), 1);
    assert_eq!(simulation.replayed_client_ticks(), vec![98, 99]);
}

#[test]
fn late_packet_after_newer_one_is_stale() {
    let mut scheduler = scheduler(1, StateOrder::Inserted);
    let mut simulation = RecordingSimulation::new();

    scheduler.ingest(20, b"new", Channel::Unreliable, 600);
    let late = scheduler.ingest(19, b"old", Channel::Unreliable, 599);
    assert_eq!(late, Admission::Discarded(DiscardReason::Stale));

    scheduler.tick(&ManualClock::new(30, 700), &mut simulation);

    assert_eq!(simulation.applied(), vec![b"new".to_vec()]);
    assert_eq!(scheduler.pool().outstanding(), 0);
}

#[test]
fn newer_packet_for_older_tick_waits_behind_queue_front() {
    let mut scheduler = scheduler(1, StateOrder::Inserted);
    let mut simulation = RecordingSimulation::new();

    scheduler.ingest(20, b"20", Channel::Unreliable, 600);
    scheduler.ingest(18, b"18", Channel::Unreliable, 601);
    assert_eq!(scheduler.buffered_ticks(), vec![20, 18]);

    scheduler.tick(&ManualClock::new(30, 700), &mut simulation);

    // tick 18 was overtaken by the state already applied for tick 20
    assert_eq!(simulation.applied(), vec![b"20".to_vec()]);
    assert_eq!(scheduler.buffered_len(), 0);
    assert_eq!(scheduler.stats().stale_discarded, 1);
}

#[test]
fn eleventh_state_applies_under_low_performance_at_thirty_hz() {
    let mut scheduler = scheduler(0, StateOrder::Inserted);
    let mut simulation = RecordingSimulation::new();
    let mut clock = ManualClock::new(1000, 1000).with_tick_duration(Duration::from_micros(33_333));
    clock.low_performance = true;

    let mut reconciled = Vec::new();
    for tick in 0..11 {
        scheduler.ingest(tick, &[tick as u8], Channel::Unreliable, tick);
        reconciled.push(scheduler.tick(&clock, &mut simulation));
        clock.advance();
    }

    assert_eq!(reconciled, vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(simulation.applied(), vec![vec![10]]);
    assert_eq!(scheduler.stats().dropped_low_performance, 10);
    assert_eq!(scheduler.pool().outstanding(), 0);
}

#[test]
fn recovering_performance_resets_drop_count() {
    let mut scheduler = scheduler(0, StateOrder::Inserted);
    let mut simulation = RecordingSimulation::new();
    let mut clock = ManualClock::new(1000, 1000).with_tick_duration(Duration::from_micros(33_333));

    clock.low_performance = true;
    for tick in 0..5 {
        scheduler.ingest(tick, b"s", Channel::Unreliable, tick);
        scheduler.tick(&clock, &mut simulation);
    }
    clock.low_performance = false;
    scheduler.ingest(5, b"s", Channel::Unreliable, 5);
    assert_eq!(scheduler.tick(&clock, &mut simulation), 1);

    clock.low_performance = true;
    scheduler.ingest(6, b"s", Channel::Unreliable, 6);
    assert_eq!(scheduler.tick(&clock, &mut simulation), 0);
    assert_eq!(scheduler.stats().dropped_low_performance, 6);
}

#[test]
fn malformed_fragment_still_consumes_packet() {
    let mut scheduler = scheduler(1, StateOrder::Inserted);
    let mut simulation = RecordingSimulation::new();
    scheduler.ingest(9, &[MALFORMED_FRAGMENT_TAG, 1], Channel::Unreliable, 200);
    scheduler.ingest(9, b"ok", Channel::Unreliable, 200);

    assert_eq!(scheduler.tick(&ManualClock::new(12, 300), &mut simulation), 1);

    assert_eq!(simulation.applied(), vec![b"ok".to_vec()]);
    assert_eq!(simulation.replayed_client_ticks(), vec![10, 11]);
    assert_eq!(scheduler.stats().failed_fragments, 1);
    assert_eq!(scheduler.last_consumed_client_tick(), Some(9));
    assert_eq!(
        scheduler.ingest(9, b"again", Channel::Unreliable, 201),
        Admission::Discarded(DiscardReason::Consumed)
    );
}

#[test]
fn early_ticks_with_large_interpolation_wait() {
    let mut scheduler = scheduler(10, StateOrder::Appended);
    let mut simulation = RecordingSimulation::new();
    scheduler.ingest(0, b"s", Channel::Unreliable, 0);

    assert_eq!(scheduler.tick(&ManualClock::new(5, 5), &mut simulation), 0);
    assert_eq!(scheduler.tick(&ManualClock::new(11, 13), &mut simulation), 1);
}
