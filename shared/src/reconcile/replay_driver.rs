use std::time::Duration;

use log::trace;

use crate::{
    reconcile::{
        hooks::{HookKind, ReconcileHooks},
        replay_window::ReplayWindow,
    },
    Simulation, Tick,
};

/// Re-executes the deterministic simulation step for a range of ticks after
/// an authoritative snapshot has been applied
pub struct ReplayDriver<'a, S: Simulation + ?Sized> {
    simulation: &'a mut S,
    hooks: &'a mut ReconcileHooks,
    window: &'a mut ReplayWindow,
    physics_delta: Duration,
}

impl<'a, S: Simulation + ?Sized> ReplayDriver<'a, S> {
    pub fn new(
        simulation: &'a mut S,
        hooks: &'a mut ReconcileHooks,
        window: &'a mut ReplayWindow,
        tick_duration: Duration,
    ) -> Self {
        let physics_delta = scaled_delta(tick_duration, simulation.time_scale());
        Self {
            simulation,
            hooks,
            window,
            physics_delta,
        }
    }

    /// Replays every tick from `from_client_tick` up to, but never including,
    /// `to_client_tick_exclusive`. The excluded tick is the current local tick
    /// whose live step has not run yet. Returns the number of ticks replayed.
    pub fn replay_range(
        &mut self,
        from_client_tick: Tick,
        from_server_tick: Tick,
        to_client_tick_exclusive: Tick,
    ) -> u32 {
        let mut client_tick = from_client_tick;
        let mut server_tick = from_server_tick;
        let mut replayed = 0;
        let has_physics = self.simulation.has_physics();

        while client_tick < to_client_tick_exclusive {
            self.window.set_replay_ticks(client_tick, server_tick);

            self.hooks
                .notify(&mut *self.simulation, HookKind::PreReplay, client_tick, server_tick);
            self.simulation.replay_step(client_tick, server_tick);
            if has_physics {
                self.simulation.step_physics(self.physics_delta);
            }
            self.hooks
                .notify(&mut *self.simulation, HookKind::PostReplay, client_tick, server_tick);

            replayed += 1;
            client_tick += 1;
            server_tick = server_tick.wrapping_add(1);
        }

        trace!(
            "replayed {} ticks from client tick {} (server tick {})",
            replayed,
            from_client_tick,
            from_server_tick
        );
        replayed
    }
}

fn scaled_delta(tick_duration: Duration, time_scale: f32) -> Duration {
    if !time_scale.is_finite() || time_scale <= 0.0 {
        return Duration::ZERO;
    }
    tick_duration.mul_f64(f64::from(time_scale))
}
