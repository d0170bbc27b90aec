use tether_serde::MTU_SIZE_BYTES;

use crate::{error::TransportError, Channel, ConnectionKey};

/// Outgoing half of the transport layer. Raw socket delivery, handshakes and
/// channel reliability all live behind this trait.
pub trait Transport {
    fn send(
        &mut self,
        channel: Channel,
        connection: ConnectionKey,
        bytes: &[u8],
    ) -> Result<(), TransportError>;

    /// Largest payload that may be sent on [`Channel::Unreliable`]
    fn max_unreliable_payload(&self) -> usize {
        MTU_SIZE_BYTES
    }
}
