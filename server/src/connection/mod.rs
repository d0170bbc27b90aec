pub mod connection;
pub mod replicate_queue;
