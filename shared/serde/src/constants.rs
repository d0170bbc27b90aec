/// Largest payload, in bytes, that a single unreliable datagram is expected to
/// carry without IP-level fragmentation.
pub const MTU_SIZE_BYTES: usize = 430;
pub const MTU_SIZE_BITS: u32 = (MTU_SIZE_BYTES as u32) * 8;
