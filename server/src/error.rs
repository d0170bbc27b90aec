use thiserror::Error;

use tether_shared::{ConnectionKey, Tick};

/// Errors returned by [`crate::Server`] operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TetherServerError {
    /// The connection key is not registered with the server
    #[error("Connection {} is not registered", .key.to_u64())]
    UnknownConnection { key: ConnectionKey },

    /// A connection with this key is already registered
    #[error("Connection {} is already registered", .key.to_u64())]
    DuplicateConnection { key: ConnectionKey },

    /// The replicate's tick was already consumed, or is already queued
    #[error(transparent)]
    Replicate(#[from] ReplicateError),
}

/// Reasons a client replicate cannot be queued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicateError {
    /// Input for this tick, or a later one, has already been applied
    #[error("Replicate for tick {tick} arrived after tick {last_replicate_tick} was consumed")]
    AlreadyConsumed { tick: Tick, last_replicate_tick: Tick },

    /// Input for this tick is already waiting in the queue
    #[error("Duplicate replicate for tick {tick}")]
    DuplicateTick { tick: Tick },
}
