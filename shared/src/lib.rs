//! # Tether Shared
//! Tick-synchronized state reconciliation shared between tether-server & tether-client.
//!
//! The authoritative side batches per-object state fragments into one state
//! update per connection and flush. The receiving side admits those updates
//! into a bounded buffer, applies each once it is safely in the past on both
//! clocks, then replays every speculative tick between the applied state and
//! now.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use tether_serde::{
    BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, UnsignedInteger,
    UnsignedVariableInteger, MTU_SIZE_BITS, MTU_SIZE_BYTES,
};

mod config;
mod error;
mod outgoing;
mod pool;
mod reconcile;
mod simulation;
mod state;
mod state_update;
mod time;
mod transport;
mod types;

pub use config::{ReconciliationConfig, StateOrder, APPENDED_STATE_VARIANCE};
pub use error::{ConfigError, SnapshotError, StateUpdateError, TransportError};
pub use outgoing::{estimated_replicate_tick, OutgoingBatcher, OutgoingConnection};
pub use pool::{BufferPool, PooledBuffer};
pub use reconcile::{
    drop_throttle::DropThrottle,
    hooks::{HookKind, HookListener, ReconcileHooks},
    replay_driver::ReplayDriver,
    replay_window::ReplayWindow,
    scheduler::{is_state_ready, ReconciliationScheduler, MAX_RECONCILES_PER_TICK},
    stats::ReconcileStats,
};
pub use simulation::{ReplayQueue, Simulation};
pub use state::{
    admission::{Admission, AdmissionPolicy, DiscardReason},
    state_buffer::StateBuffer,
    state_packet::StatePacket,
};
pub use state_update::{StateUpdate, StateUpdateHeader, STATE_UPDATE_PACKET_ID};
pub use time::{tick_rate, TickClock};
pub use transport::Transport;
pub use types::{Channel, ConnectionKey, HostType, Tick};
