//! # Tether Server
//! The authoritative side of tether: queues each client's input until the
//! simulation consumes it, then flushes one batched state update per
//! connection, tagged with the last client tick whose input went into it.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tether_shared::{
        Channel, ConfigError, ConnectionKey, OutgoingBatcher, ReconciliationConfig, StateOrder,
        Tick, Transport, TransportError,
    };
}

mod connection;
mod error;
mod server;

pub use connection::{
    connection::Connection,
    replicate_queue::{Replicate, ReplicateQueue},
};
pub use error::{ReplicateError, TetherServerError};
pub use server::{Server, ServerConfig};
