//! # Tether Client
//! Receives authoritative state updates, holds them back until they are
//! safely in the past, then reconciles the local simulation against them and
//! replays every speculative tick since.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tether_shared::{
        Admission, BitReader, Channel, ConfigError, DiscardReason, HookKind, HostType,
        ReconcileStats, ReconciliationConfig, ReplayQueue, ReplayWindow, Simulation,
        SnapshotError, StateOrder, StateUpdateError, Tick, TickClock,
    };
}

mod client;
mod client_config;

pub use client::Client;
pub use client_config::ClientConfig;
