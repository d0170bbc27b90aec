/// Property tests for the scheduler's ordering & buffer-bound guarantees

use std::{cell::RefCell, rc::Rc};

use proptest::prelude::*;

use tether_shared::{
    Channel, HookKind, HostType, ReconciliationConfig, ReconciliationScheduler, StateOrder, Tick,
};
use tether_test::{ManualClock, RecordingSimulation};

fn scheduler(state_interpolation: u8, appended: bool) -> ReconciliationScheduler {
    let config = ReconciliationConfig {
        state_interpolation,
        state_order: if appended {
            StateOrder::Appended
        } else {
            StateOrder::Inserted
        },
        ..Default::default()
    };
    ReconciliationScheduler::new(config, HostType::Client).unwrap()
}

proptest! {
    #[test]
    fn applied_states_never_go_backwards(
        state_interpolation in 0u8..4,
        appended in any::<bool>(),
        arrivals in prop::collection::vec((0u32..60, 0u32..3, any::<bool>()), 1..200),
    ) {
        let mut scheduler = scheduler(state_interpolation, appended);
        let applied = Rc::new(RefCell::new(Vec::<(Tick, Tick)>::new()));
        let record = applied.clone();
        scheduler.hooks_mut().register(HookKind::PreReconcile, move |client, server| {
            record.borrow_mut().push((client, server));
        });
        let mut simulation = RecordingSimulation::new();
        let mut clock = ManualClock::new(0, 1000);

        for (client_tick, remote_step, run_tick) in arrivals {
            clock.estimated_remote_tick += remote_step + 1;
            scheduler.ingest(client_tick, &[0], Channel::Unreliable, clock.estimated_remote_tick);
            if run_tick {
                clock.local_tick += 1;
                scheduler.tick(&clock, &mut simulation);
                prop_assert!(!scheduler.is_reconciling());
            }
        }

        let applied = applied.borrow();
        for window in applied.windows(2) {
            prop_assert!(window[0].0 < window[1].0);
            prop_assert!(window[0].1 <= window[1].1);
        }
    }

    #[test]
    fn buffer_never_exceeds_bound(
        state_interpolation in 0u8..6,
        appended in any::<bool>(),
        client_ticks in prop::collection::vec(0u32..1000, 1..300),
    ) {
        let mut scheduler = scheduler(state_interpolation, appended);
        let bound = scheduler.config().max_buffered_states();

        for (remote_tick, client_tick) in client_ticks.into_iter().enumerate() {
            scheduler.ingest(client_tick, &[1, 2, 3], Channel::Unreliable, remote_tick as Tick);
            prop_assert!(scheduler.buffered_len() <= bound);
        }

        scheduler.clear();
        prop_assert_eq!(scheduler.pool().outstanding(), 0);
    }
}

#[test]
fn thousand_packets_stay_within_ten() {
    let mut scheduler = scheduler(2, false);

    for tick in 0..1000 {
        scheduler.ingest(tick, &[0; 16], Channel::Unreliable, tick);
        assert!(scheduler.buffered_len() <= 10);
    }

    assert_eq!(scheduler.buffered_len(), 10);
    assert_eq!(scheduler.buffered_ticks(), (990..1000).collect::<Vec<_>>());
    assert_eq!(scheduler.stats().evicted, 990);
}
