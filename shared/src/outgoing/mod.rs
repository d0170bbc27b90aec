mod batcher;
mod connection;

pub use batcher::OutgoingBatcher;
pub use connection::{estimated_replicate_tick, OutgoingConnection};
