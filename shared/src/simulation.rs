use std::time::Duration;

use crate::{error::SnapshotError, Tick};

/// The simulation being reconciled. The core never implements simulation
/// logic itself; it only decides when and with what data these run.
pub trait Simulation {
    /// Overwrites simulation state with one authoritative fragment
    fn apply_snapshot(&mut self, fragment: &[u8]) -> Result<(), SnapshotError>;

    /// Re-executes the speculative logic that originally ran live for
    /// `client_tick`, now seeded from the applied snapshot
    fn replay_step(&mut self, client_tick: Tick, server_tick: Tick);

    /// Whether the simulation owns a steppable physics engine
    fn has_physics(&self) -> bool {
        false
    }

    /// Pushes applied transforms into the physics engine
    fn sync_physics_transforms(&mut self) {}

    /// Advances physics by exactly `delta`
    fn step_physics(&mut self, _delta: Duration) {}

    fn time_scale(&self) -> f32 {
        1.0
    }

    // Reconciliation notifications, raised just before the matching
    // registered hook listeners

    fn pre_reconcile(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    fn post_reconcile(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    fn pre_replay(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    fn post_replay(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    fn pre_physics_sync(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    fn post_physics_sync(&mut self, _client_tick: Tick, _server_tick: Tick) {}

    /// Visits every per-object future queue used by [`crate::StateOrder::Appended`]
    fn for_each_replay_queue(&mut self, _visit: &mut dyn FnMut(&mut dyn ReplayQueue)) {}
}

/// Per-object queue of states consumed ahead of reconciliation
pub trait ReplayQueue {
    /// Moves every queued future state into the object's history
    fn flush_into_history(&mut self);
}
