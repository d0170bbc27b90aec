use thiserror::Error;

use tether_serde::SerdeErr;

use crate::Tick;

/// Errors raised when validating a [`crate::ReconciliationConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The server-side replicate queue needs room for at least one entry
    #[error("maximum_server_replicates must be at least 1, got {value}")]
    ZeroServerReplicates { value: u8 },

    /// A flush interval of zero ticks would never flush
    #[error("flush interval must be at least 1 tick, got {value}")]
    ZeroFlushInterval { value: u32 },
}

/// Errors that can occur while reading or writing a state-update packet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateUpdateError {
    /// The packet does not start with the state-update id
    #[error("Unexpected packet id {found}, expected state update id {expected}")]
    UnexpectedPacketId { found: u8, expected: u8 },

    /// Payload length field is negative (SECURITY: malformed or malicious packet)
    #[error("Negative payload length {length} in state update header")]
    NegativePayloadLength { length: i32 },

    /// Payload length field claims more bytes than the packet holds
    #[error("State update declares {declared} payload bytes but only {available} remain")]
    TruncatedPayload { declared: usize, available: usize },

    /// Payload too large to describe with the i32 length field
    #[error("State update payload of {length} bytes exceeds the i32 length field")]
    PayloadTooLarge { length: usize },

    /// Header could not be read
    #[error("Failed to read state update header: {0}")]
    Serde(#[from] SerdeErr),
}

/// Returned by [`crate::Simulation::apply_snapshot`] when a fragment cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Fragment bytes could not be decoded
    #[error("Malformed snapshot fragment: {reason}")]
    Malformed { reason: &'static str },

    /// Fragment refers to an object the simulation does not know about
    #[error("Snapshot fragment refers to unknown object {id}")]
    UnknownObject { id: u64 },

    /// Fragment belongs to a tick the simulation cannot seed from
    #[error("Snapshot fragment for tick {tick} cannot be applied")]
    UnusableTick { tick: Tick },
}

impl From<SerdeErr> for SnapshotError {
    fn from(_: SerdeErr) -> Self {
        SnapshotError::Malformed {
            reason: "unexpected end of fragment",
        }
    }
}

/// Errors reported by a [`crate::Transport`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection is no longer known to the transport
    #[error("Connection {connection} is not connected")]
    NotConnected { connection: u64 },

    /// The underlying socket refused the payload
    #[error("Failed to send {length} bytes: {reason}")]
    SendFailed { length: usize, reason: String },
}
