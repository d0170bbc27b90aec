/// End-to-end tests: server batches state, client buffers, reconciles & replays

use tether_client::{Client, ClientConfig};
use tether_shared::{
    Admission, Channel, DiscardReason, ReconciliationConfig, StateOrder, TickClock,
};
use tether_test::{init_logging, LinkConditioner, LocalTransport, PeerPair};

#[test]
fn states_flow_from_server_to_client_in_order() {
    init_logging();
    let mut pair = PeerPair::new(ReconciliationConfig::default());

    let mut reconciled = Vec::new();
    for step in 0..10u8 {
        reconciled.push(pair.step(&[step]));
    }

    // interpolation 1 holds each state back two ticks
    assert_eq!(reconciled, vec![0, 0, 1, 1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(
        pair.simulation.applied(),
        (0..8u8).map(|step| vec![step]).collect::<Vec<_>>()
    );
    assert_eq!(
        pair.simulation.replayed_client_ticks(),
        (101..=108).collect::<Vec<_>>()
    );
    assert_eq!(pair.client.buffered_ticks(), vec![108, 109]);
    assert_eq!(pair.server.pool().outstanding(), 0);
    assert_eq!(pair.client.pool().outstanding(), 2);
}

#[test]
fn fragments_for_one_tick_apply_in_arrival_order() {
    init_logging();
    let mut pair = PeerPair::new(ReconciliationConfig::default());

    // the second flush consumes no new input, so both updates carry the same tick
    pair.server_step(b"A");
    pair.server_step(b"B");
    let admissions = pair.deliver();
    assert_eq!(
        admissions,
        vec![
            Ok(Admission::Created { evicted: 0 }),
            Ok(Admission::Coalesced { evicted: 0 }),
        ]
    );

    for _ in 0..3 {
        pair.client_step();
    }

    assert_eq!(pair.simulation.applied(), vec![b"A".to_vec(), b"B".to_vec()]);
}

#[test]
fn oversized_update_arrives_reliably() {
    init_logging();
    let transport = LocalTransport::new().with_max_unreliable_payload(32);
    let mut pair = PeerPair::with_transport(ReconciliationConfig::default(), transport);

    pair.server_step(&[1u8; 64]);

    let (channel, bytes) = pair.transport.receive(&pair.key).unwrap();
    assert_eq!(channel, Channel::Reliable);
    let admission = pair.client.receive(&pair.clock, channel, &bytes).unwrap();
    assert!(admission.is_buffered());
}

#[test]
fn host_client_discards_looped_back_updates() {
    init_logging();
    let mut pair = PeerPair::new(ReconciliationConfig::default());
    let mut host = Client::new_host(ClientConfig::default()).unwrap();

    for step in 0..5u8 {
        pair.server_step(&[step]);
        while let Some((channel, bytes)) = pair.transport.receive(&pair.key) {
            let admission = host.receive(&pair.clock, channel, &bytes).unwrap();
            assert_eq!(admission, Admission::Discarded(DiscardReason::Authority));
        }
        assert_eq!(host.tick(&pair.clock, &mut pair.simulation), 0);
        pair.clock.advance();
    }

    assert!(pair.simulation.events.is_empty());
    assert_eq!(host.stats().authority_discarded, 5);
    assert_eq!(host.pool().outstanding(), 0);
}

#[test]
fn failed_send_is_not_fatal() {
    init_logging();
    let mut pair = PeerPair::new(ReconciliationConfig::default());
    pair.transport.disconnect(pair.key);

    assert_eq!(pair.server_step(b"lost"), 0);

    assert_eq!(pair.server.batcher().send_failures(), 1);
    assert_eq!(pair.server.pool().outstanding(), 0);
    assert!(pair.transport.receive(&pair.key).is_none());
}

#[test]
fn lossy_reordering_link_never_applies_out_of_order() {
    init_logging();
    let config = ReconciliationConfig {
        state_interpolation: 2,
        state_order: StateOrder::Appended,
        ..Default::default()
    };
    let bound = config.max_buffered_states();
    let transport =
        LocalTransport::new().with_conditioner(LinkConditioner::new(7, 0.2, 0.3));
    let mut pair = PeerPair::with_transport(config, transport);

    for step in 0..300 {
        let tick = pair.local_tick();
        pair.server_step(&tick.to_le_bytes());
        // batch deliveries so the conditioner has packets to reorder
        if step % 3 == 2 {
            pair.deliver();
        }
        assert!(pair.client.buffered_ticks().len() <= bound);
        pair.client_step();
    }

    let applied: Vec<u32> = pair
        .simulation
        .applied()
        .iter()
        .map(|bytes| u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect();
    assert!(!applied.is_empty());
    assert!(applied.windows(2).all(|window| window[0] < window[1]));
    assert!(pair.transport.lost() > 0);
    assert!(pair.clock.local_tick() > 300);
}
