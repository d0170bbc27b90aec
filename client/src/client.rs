use log::{info, trace};

use tether_shared::{
    Admission, BitReader, BufferPool, Channel, ConfigError, HostType, ReconcileHooks,
    ReconcileStats, ReconciliationScheduler, ReplayWindow, Simulation, StateUpdate,
    StateUpdateError, StateUpdateHeader, Tick, TickClock,
};

use crate::ClientConfig;

/// Receiving end of a tether connection.
///
/// Feed every state-update packet to [`Client::receive`] as it arrives and
/// call [`Client::tick`] once per local tick, before that tick's live step.
pub struct Client {
    config: ClientConfig,
    scheduler: ReconciliationScheduler,
}

impl Client {
    /// Create a new Client which reconciles against a remote authority
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_pool(config, HostType::Client, BufferPool::new())
    }

    /// Create a Client for a host that is itself the authority. State updates
    /// looped back to it are read and thrown away.
    pub fn new_host(config: ClientConfig) -> Result<Self, ConfigError> {
        Self::with_pool(config, HostType::Server, BufferPool::new())
    }

    pub fn with_pool(
        config: ClientConfig,
        host_type: HostType,
        pool: BufferPool,
    ) -> Result<Self, ConfigError> {
        let scheduler =
            ReconciliationScheduler::with_pool(config.reconciliation.clone(), host_type, pool)?;
        Ok(Self { config, scheduler })
    }

    // Configuration

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect at the start of the next
    /// [`Client::tick`].
    pub fn set_config(&mut self, config: ClientConfig) -> Result<(), ConfigError> {
        self.scheduler.set_config(config.reconciliation.clone())?;
        info!(
            "client reconciliation config staged: interpolation {}, {:?}",
            config.reconciliation.state_interpolation, config.reconciliation.state_order
        );
        self.config = config;
        Ok(())
    }

    pub fn is_host(&self) -> bool {
        self.scheduler.host_type().is_authority()
    }

    // Incoming data

    /// Reads one state update and buffers its payload as the state following
    /// the update's `last_replicate_tick`. The packet's server tick is the
    /// clock's current estimate of the remote tick.
    pub fn receive<C: TickClock + ?Sized>(
        &mut self,
        clock: &C,
        channel: Channel,
        packet: &[u8],
    ) -> Result<Admission, StateUpdateError> {
        let mut reader = BitReader::new(packet);
        let estimated_remote_tick = clock.estimated_remote_tick();

        if self.is_host() {
            let header = StateUpdate::skip(&mut reader)?;
            trace!(
                "host skipped {} byte state update for tick {}",
                header.payload_length,
                header.last_replicate_tick
            );
            return Ok(self.scheduler.ingest(
                header.last_replicate_tick,
                &[],
                channel,
                estimated_remote_tick,
            ));
        }

        let update = StateUpdate::read(&mut reader)?;
        Ok(self.scheduler.ingest(
            update.last_replicate_tick,
            update.payload,
            channel,
            estimated_remote_tick,
        ))
    }

    /// Reads only the header of a state update, leaving the payload unread
    pub fn peek_header(packet: &[u8]) -> Result<StateUpdateHeader, StateUpdateError> {
        StateUpdateHeader::de(&mut BitReader::new(packet))
    }

    // Reconciliation

    /// Reconciles and replays whatever buffered states are ready. Returns the
    /// number of states applied.
    pub fn tick<C, S>(&mut self, clock: &C, simulation: &mut S) -> usize
    where
        C: TickClock + ?Sized,
        S: Simulation + ?Sized,
    {
        self.scheduler.tick(clock, simulation)
    }

    /// Drops every buffered state and forgets the session's tick watermarks,
    /// so a reconnect starts from fresh ticks
    pub fn disconnect(&mut self) {
        self.scheduler.clear();
    }

    // Accessors

    pub fn hooks_mut(&mut self) -> &mut ReconcileHooks {
        self.scheduler.hooks_mut()
    }

    pub fn is_reconciling(&self) -> bool {
        self.scheduler.is_reconciling()
    }

    pub fn replay_window(&self) -> &ReplayWindow {
        self.scheduler.replay_window()
    }

    pub fn stats(&self) -> &ReconcileStats {
        self.scheduler.stats()
    }

    pub fn buffered_ticks(&self) -> Vec<Tick> {
        self.scheduler.buffered_ticks()
    }

    pub fn last_consumed_tick(&self) -> Option<Tick> {
        self.scheduler.last_consumed_client_tick()
    }

    pub fn pool(&self) -> &BufferPool {
        self.scheduler.pool()
    }
}
