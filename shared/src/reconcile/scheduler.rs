use std::time::Duration;

use log::{debug, trace, warn};

use crate::{
    config::ReconciliationConfig,
    error::ConfigError,
    pool::BufferPool,
    reconcile::{
        drop_throttle::DropThrottle,
        hooks::{HookKind, ReconcileHooks},
        replay_driver::ReplayDriver,
        replay_window::ReplayWindow,
        stats::ReconcileStats,
    },
    state::{
        admission::{Admission, AdmissionPolicy, DiscardReason},
        state_buffer::StateBuffer,
        state_packet::StatePacket,
    },
    Channel, HostType, ReplayQueue, Simulation, StateOrder, Tick, TickClock,
};

/// Most buffered states reconciled (or dropped) in a single local tick, so a
/// backlog left by a latency spike is worked off gradually
pub const MAX_RECONCILES_PER_TICK: usize = 2;

/// Whether a buffered state may be applied now.
///
/// The remote side must have moved past the state's server tick by more than
/// the interpolation (plus the state-order variance), and the local
/// simulation must have moved past its client tick by more than the
/// interpolation. Both comparisons are strict.
pub fn is_state_ready(
    client_tick: Tick,
    server_tick: Tick,
    local_tick: Tick,
    estimated_remote_tick: Tick,
    state_interpolation: u8,
    state_order: StateOrder,
) -> bool {
    let interpolation = i64::from(state_interpolation);
    let variance = i64::from(state_order.variance());

    let server_ready =
        i64::from(server_tick) < i64::from(estimated_remote_tick) - variance - interpolation;
    let client_ready = i64::from(client_tick) < i64::from(local_tick) - interpolation;

    server_ready && client_ready
}

/// Owns the buffered authoritative states and decides, once per local tick,
/// which of them to apply and replay.
///
/// Nothing else mutates the buffer or the replay window. A cycle runs to
/// completion inside a single [`ReconciliationScheduler::tick`] call.
pub struct ReconciliationScheduler {
    config: ReconciliationConfig,
    staged_config: Option<ReconciliationConfig>,
    host_type: HostType,
    buffer: StateBuffer,
    admission: AdmissionPolicy,
    pool: BufferPool,
    window: ReplayWindow,
    throttle: DropThrottle,
    hooks: ReconcileHooks,
    stats: ReconcileStats,
}

impl ReconciliationScheduler {
    pub fn new(config: ReconciliationConfig, host_type: HostType) -> Result<Self, ConfigError> {
        Self::with_pool(config, host_type, BufferPool::new())
    }

    /// Like [`ReconciliationScheduler::new`] but sharing an existing buffer pool
    pub fn with_pool(
        config: ReconciliationConfig,
        host_type: HostType,
        pool: BufferPool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            staged_config: None,
            host_type,
            buffer: StateBuffer::new(),
            admission: AdmissionPolicy::new(),
            pool,
            window: ReplayWindow::new(),
            throttle: DropThrottle::new(),
            hooks: ReconcileHooks::new(),
            stats: ReconcileStats::default(),
        })
    }

    // Configuration

    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Stages a new configuration. It takes effect at the start of the next
    /// [`ReconciliationScheduler::tick`], never in the middle of a cycle.
    pub fn set_config(&mut self, config: ReconciliationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.staged_config = Some(config);
        Ok(())
    }

    fn apply_staged_config<S: Simulation + ?Sized>(&mut self, simulation: &mut S) {
        let Some(config) = self.staged_config.take() else {
            return;
        };

        if config.state_order != self.config.state_order {
            debug!(
                "state order changing from {:?} to {:?}, flushing replay queues",
                self.config.state_order, config.state_order
            );
            simulation.for_each_replay_queue(&mut |queue: &mut dyn ReplayQueue| {
                queue.flush_into_history()
            });
        }

        self.config = config;
        self.evict_excess();
    }

    // Accessors

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn hooks_mut(&mut self) -> &mut ReconcileHooks {
        &mut self.hooks
    }

    pub fn stats(&self) -> &ReconcileStats {
        &self.stats
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Client ticks of buffered states in arrival order
    pub fn buffered_ticks(&self) -> Vec<Tick> {
        self.buffer.ticks().collect()
    }

    pub fn is_buffered(&self, client_tick: Tick) -> bool {
        self.buffer.contains(client_tick)
    }

    pub fn replay_window(&self) -> &ReplayWindow {
        &self.window
    }

    pub fn is_reconciling(&self) -> bool {
        self.window.is_reconciling()
    }

    pub fn last_consumed_client_tick(&self) -> Option<Tick> {
        self.admission.last_consumed_client_tick()
    }

    // Incoming data

    /// Buffers one authoritative fragment destined for `client_tick`.
    ///
    /// `estimated_remote_tick` is the remote tick the fragment's packet was
    /// sent on; it becomes the state's server tick. Stale data, loop-back on
    /// the authority and buffer overflow are all handled here without
    /// surfacing an error.
    pub fn ingest(
        &mut self,
        client_tick: Tick,
        fragment: &[u8],
        channel: Channel,
        estimated_remote_tick: Tick,
    ) -> Admission {
        if let Err(reason) =
            self.admission
                .admit(self.host_type.is_authority(), client_tick, estimated_remote_tick)
        {
            match reason {
                DiscardReason::Authority => self.stats.authority_discarded += 1,
                DiscardReason::Stale | DiscardReason::Consumed => {
                    self.stats.stale_discarded += 1
                }
            }
            trace!(
                "discarding state fragment for client tick {} ({:?})",
                client_tick,
                reason
            );
            return Admission::Discarded(reason);
        }

        let bytes = self.pool.acquire_from(fragment);
        let created = match self.buffer.get_mut(client_tick) {
            Some(packet) => {
                packet.add_fragment(bytes, channel);
                self.stats.coalesced += 1;
                false
            }
            None => {
                let packet = StatePacket::new(client_tick, estimated_remote_tick, bytes, channel);
                if self.buffer.push(packet).is_err() {
                    warn!("state buffer lookup out of sync for client tick {}", client_tick);
                }
                self.stats.created += 1;
                true
            }
        };

        let evicted = self.evict_excess();
        if created {
            Admission::Created { evicted }
        } else {
            Admission::Coalesced { evicted }
        }
    }

    fn evict_excess(&mut self) -> usize {
        let max_allowed = self.config.max_buffered_states();
        let mut evicted = 0;
        while self.buffer.len() > max_allowed {
            let Some(packet) = self.buffer.pop_front() else {
                break;
            };
            evicted += 1;
            debug!(
                "state buffer over capacity ({} > {}), evicted client tick {}",
                self.buffer.len() + 1,
                max_allowed,
                packet.client_tick()
            );
        }
        self.stats.evicted += evicted as u64;
        evicted
    }

    // Reconciliation

    /// Runs once per local tick, before that tick's live step. Applies and
    /// replays at most [`MAX_RECONCILES_PER_TICK`] ready states and returns
    /// how many were reconciled.
    pub fn tick<C, S>(&mut self, clock: &C, simulation: &mut S) -> usize
    where
        C: TickClock + ?Sized,
        S: Simulation + ?Sized,
    {
        self.apply_staged_config(simulation);

        let local_tick = clock.local_tick();
        let estimated_remote_tick = clock.estimated_remote_tick();
        let low_performance = clock.is_low_performance();
        let tick_rate = clock.tick_rate();
        let tick_duration = clock.tick_duration();

        let mut reconciled = 0;
        for _ in 0..MAX_RECONCILES_PER_TICK {
            let Some(front) = self.buffer.front() else {
                break;
            };
            if !is_state_ready(
                front.client_tick(),
                front.server_tick(),
                local_tick,
                estimated_remote_tick,
                self.config.state_interpolation,
                self.config.state_order,
            ) {
                break;
            }
            let Some(packet) = self.buffer.pop_front() else {
                break;
            };

            if self.admission.is_consumed(packet.client_tick()) {
                self.stats.stale_discarded += 1;
                trace!(
                    "buffered state for client tick {} superseded before apply",
                    packet.client_tick()
                );
                continue;
            }
            self.admission.mark_consumed(packet.client_tick());

            if self.throttle.should_drop(low_performance, tick_rate) {
                self.stats.dropped_low_performance += 1;
                debug!(
                    "low frame rate, dropping reconcile for client tick {}",
                    packet.client_tick()
                );
                continue;
            }

            self.reconcile(packet, local_tick, tick_duration, simulation);
            reconciled += 1;
        }

        reconciled
    }

    fn reconcile<S: Simulation + ?Sized>(
        &mut self,
        packet: StatePacket,
        local_tick: Tick,
        tick_duration: Duration,
        simulation: &mut S,
    ) {
        let client_tick = packet.client_tick();
        let server_tick = packet.server_tick();

        self.window.begin(client_tick, server_tick);
        self.hooks
            .notify(simulation, HookKind::PreReconcile, client_tick, server_tick);

        for (fragment, _) in packet.fragments() {
            if let Err(error) = simulation.apply_snapshot(fragment) {
                self.stats.failed_fragments += 1;
                warn!(
                    "failed to apply state for client tick {} (server tick {}): {}",
                    client_tick, server_tick, error
                );
            }
        }

        if simulation.has_physics() {
            self.hooks
                .notify(simulation, HookKind::PrePhysicsSync, client_tick, server_tick);
            simulation.sync_physics_transforms();
            self.hooks
                .notify(simulation, HookKind::PostPhysicsSync, client_tick, server_tick);
        }

        if let Some((replay_client, replay_server)) = self.window.start_replay() {
            let replayed = ReplayDriver::new(
                simulation,
                &mut self.hooks,
                &mut self.window,
                tick_duration,
            )
            .replay_range(replay_client, replay_server, local_tick);
            self.stats.replayed_ticks += u64::from(replayed);
        }

        self.hooks
            .notify(simulation, HookKind::PostReconcile, client_tick, server_tick);
        self.window.reset();
        self.stats.reconciled += 1;

        drop(packet);
    }

    /// Forgets the current session: every buffered state, the stale and
    /// consumed watermarks and the low-performance drop count. Staged
    /// configuration, hooks and stats are kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.window.reset();
        self.admission = AdmissionPolicy::new();
        self.throttle = DropThrottle::new();
    }
}
