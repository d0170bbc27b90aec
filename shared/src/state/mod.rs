pub mod admission;
pub mod state_buffer;
pub mod state_packet;
