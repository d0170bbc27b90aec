use tether_shared::{
    ConnectionKey, OutgoingConnection, PooledBuffer, ReconciliationConfig, Tick,
};

use crate::{
    connection::replicate_queue::{Replicate, ReplicateQueue},
    error::ReplicateError,
};

/// Server-side state of one client connection
pub struct Connection {
    key: ConnectionKey,
    last_known_local_tick: Tick,
    replicates: ReplicateQueue,
    pending_fragments: Vec<PooledBuffer>,
}

impl Connection {
    pub fn new(key: ConnectionKey, config: &ReconciliationConfig) -> Self {
        Self {
            key,
            last_known_local_tick: 0,
            replicates: ReplicateQueue::new(
                config.maximum_server_replicates,
                config.drop_excessive_replicates,
            ),
            pending_fragments: Vec::new(),
        }
    }

    /// Queues the client's input for `client_tick`. Any input at all is
    /// evidence of how far the client's clock has run.
    pub fn receive_replicate(
        &mut self,
        client_tick: Tick,
        bytes: PooledBuffer,
    ) -> Result<(), ReplicateError> {
        self.last_known_local_tick = self.last_known_local_tick.max(client_tick);
        self.replicates.push(client_tick, bytes)
    }

    pub fn take_replicates(&mut self) -> Vec<Replicate> {
        self.replicates.take()
    }

    pub fn queue_fragment(&mut self, fragment: PooledBuffer) {
        self.pending_fragments.push(fragment);
    }

    pub fn replicates(&self) -> &ReplicateQueue {
        &self.replicates
    }

    pub fn apply_config(&mut self, config: &ReconciliationConfig) {
        self.replicates.set_bounds(
            config.maximum_server_replicates,
            config.drop_excessive_replicates,
        );
    }
}

impl OutgoingConnection for Connection {
    fn key(&self) -> ConnectionKey {
        self.key
    }

    fn last_known_local_tick(&self) -> Tick {
        self.last_known_local_tick
    }

    fn last_replicate_tick(&self) -> Option<Tick> {
        self.replicates.last_replicate_tick()
    }

    fn pending_fragments(&self) -> &[PooledBuffer] {
        &self.pending_fragments
    }

    fn clear_pending_fragments(&mut self) {
        self.pending_fragments.clear();
    }
}
