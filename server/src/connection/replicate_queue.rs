use std::collections::VecDeque;

use log::debug;

use tether_shared::{PooledBuffer, Tick};

use crate::error::ReplicateError;

/// One tick of client input waiting to be applied on the server
#[derive(Debug)]
pub struct Replicate {
    pub client_tick: Tick,
    pub bytes: PooledBuffer,
}

/// Client inputs for one connection, ordered by the client tick they were
/// produced on
pub struct ReplicateQueue {
    list: VecDeque<Replicate>,
    maximum: usize,
    drop_excessive: bool,
    last_replicate_tick: Option<Tick>,
    dropped: u64,
}

impl ReplicateQueue {
    pub fn new(maximum_server_replicates: u8, drop_excessive_replicates: bool) -> Self {
        Self {
            list: VecDeque::new(),
            maximum: usize::from(maximum_server_replicates).max(1),
            drop_excessive: drop_excessive_replicates,
            last_replicate_tick: None,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Client tick of the most recently consumed replicate
    pub fn last_replicate_tick(&self) -> Option<Tick> {
        self.last_replicate_tick
    }

    /// Replicates discarded because the queue was over its bound
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn set_bounds(&mut self, maximum_server_replicates: u8, drop_excessive_replicates: bool) {
        self.maximum = usize::from(maximum_server_replicates).max(1);
        self.drop_excessive = drop_excessive_replicates;
    }

    /// Queues a replicate in client-tick order, scanning from the back since
    /// input almost always arrives in order
    pub fn push(&mut self, client_tick: Tick, bytes: PooledBuffer) -> Result<(), ReplicateError> {
        if let Some(last_replicate_tick) = self.last_replicate_tick {
            if client_tick <= last_replicate_tick {
                return Err(ReplicateError::AlreadyConsumed {
                    tick: client_tick,
                    last_replicate_tick,
                });
            }
        }

        let mut index = self.list.len();
        while index > 0 {
            let queued = self.list[index - 1].client_tick;
            if queued == client_tick {
                return Err(ReplicateError::DuplicateTick { tick: client_tick });
            }
            if queued < client_tick {
                break;
            }
            index -= 1;
        }
        self.list.insert(index, Replicate { client_tick, bytes });

        if self.drop_excessive {
            while self.list.len() > self.maximum {
                if let Some(replicate) = self.list.pop_front() {
                    self.dropped += 1;
                    debug!(
                        "replicate queue over {} entries, dropped input for tick {}",
                        self.maximum, replicate.client_tick
                    );
                }
            }
        }

        Ok(())
    }

    /// Takes the replicates to apply this server tick: the oldest one, or the
    /// two oldest while a backlog is being worked off
    pub fn take(&mut self) -> Vec<Replicate> {
        let count = if !self.drop_excessive && self.list.len() > self.maximum {
            2
        } else {
            1
        };

        let mut taken = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(replicate) = self.list.pop_front() else {
                break;
            };
            self.last_replicate_tick = Some(replicate.client_tick);
            taken.push(replicate);
        }
        taken
    }
}
