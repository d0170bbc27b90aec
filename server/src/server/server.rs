use std::collections::HashMap;

use log::info;

use tether_shared::{
    BufferPool, ConfigError, ConnectionKey, OutgoingBatcher, Tick, Transport,
};

use crate::{
    connection::{connection::Connection, replicate_queue::Replicate},
    error::TetherServerError,
    ServerConfig,
};

/// Authoritative end of tether connections.
///
/// Buffers each client's inputs until the simulation consumes them, collects
/// the state fragments each client should see, and flushes them as one state
/// update per connection every `flush_interval_ticks` calls to
/// [`Server::tick`].
pub struct Server {
    config: ServerConfig,
    pool: BufferPool,
    connections: HashMap<ConnectionKey, Connection>,
    batcher: OutgoingBatcher,
    ticks_since_flush: u32,
}

impl Server {
    /// Create a new Server
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        Self::with_pool(config, BufferPool::new())
    }

    pub fn with_pool(config: ServerConfig, pool: BufferPool) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            pool,
            connections: HashMap::new(),
            batcher: OutgoingBatcher::new(),
            ticks_since_flush: 0,
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Replaces the configuration, re-bounding every replicate queue
    pub fn set_config(&mut self, config: ServerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        for connection in self.connections.values_mut() {
            connection.apply_config(&config.reconciliation);
        }
        self.config = config;
        Ok(())
    }

    // Connections

    pub fn add_connection(&mut self, key: ConnectionKey) -> Result<(), TetherServerError> {
        if self.connections.contains_key(&key) {
            return Err(TetherServerError::DuplicateConnection { key });
        }
        self.connections
            .insert(key, Connection::new(key, &self.config.reconciliation));
        info!("connection {} added", key.to_u64());
        Ok(())
    }

    /// Forgets a connection, releasing its queued input and pending fragments
    pub fn remove_connection(&mut self, key: &ConnectionKey) -> bool {
        let removed = self.connections.remove(key).is_some();
        if removed {
            info!("connection {} removed", key.to_u64());
        }
        removed
    }

    pub fn has_connection(&self, key: &ConnectionKey) -> bool {
        self.connections.contains_key(key)
    }

    pub fn connection_keys(&self) -> Vec<ConnectionKey> {
        self.connections.keys().copied().collect()
    }

    pub fn connection(&self, key: &ConnectionKey) -> Option<&Connection> {
        self.connections.get(key)
    }

    // Incoming input

    /// Queues a client's input for `client_tick`
    pub fn receive_replicate(
        &mut self,
        key: &ConnectionKey,
        client_tick: Tick,
        input: &[u8],
    ) -> Result<(), TetherServerError> {
        let connection = self
            .connections
            .get_mut(key)
            .ok_or(TetherServerError::UnknownConnection { key: *key })?;
        connection.receive_replicate(client_tick, self.pool.acquire_from(input))?;
        Ok(())
    }

    /// Takes every connection's input to apply this server tick. Consuming a
    /// replicate advances the tick the next state update is tagged with.
    pub fn take_replicates(&mut self) -> Vec<(ConnectionKey, Replicate)> {
        let mut replicates = Vec::new();
        for (key, connection) in self.connections.iter_mut() {
            for replicate in connection.take_replicates() {
                replicates.push((*key, replicate));
            }
        }
        replicates
    }

    // Outgoing state

    /// Queues an object's state fragment for one connection's next flush
    pub fn queue_state(&mut self, key: &ConnectionKey, fragment: &[u8]) -> Result<(), TetherServerError> {
        let connection = self
            .connections
            .get_mut(key)
            .ok_or(TetherServerError::UnknownConnection { key: *key })?;
        connection.queue_fragment(self.pool.acquire_from(fragment));
        Ok(())
    }

    /// Queues an object's state fragment for every connection's next flush
    pub fn broadcast_state(&mut self, fragment: &[u8]) {
        for connection in self.connections.values_mut() {
            connection.queue_fragment(self.pool.acquire_from(fragment));
        }
    }

    /// Advances the flush interval, flushing every connection's pending
    /// fragments when it elapses. Returns the number of packets sent.
    pub fn tick<T: Transport + ?Sized>(&mut self, transport: &mut T) -> usize {
        self.ticks_since_flush += 1;
        if self.ticks_since_flush < self.config.flush_interval_ticks {
            return 0;
        }
        self.ticks_since_flush = 0;
        self.flush(transport)
    }

    /// Flushes every connection's pending fragments now
    pub fn flush<T: Transport + ?Sized>(&mut self, transport: &mut T) -> usize {
        let interpolation = self.config.reconciliation.state_interpolation;
        self.batcher
            .flush(self.connections.values_mut(), transport, interpolation)
    }

    // Accessors

    pub fn batcher(&self) -> &OutgoingBatcher {
        &self.batcher
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }
}
