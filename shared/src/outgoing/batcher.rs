use log::{debug, warn};

use tether_serde::{BitWrite, BitWriter};

use crate::{
    error::StateUpdateError,
    outgoing::{estimated_replicate_tick, OutgoingConnection},
    pool::PooledBuffer,
    state_update::StateUpdateHeader,
    Channel, Tick, Transport,
};

/// Turns each connection's pending fragments into one length-prefixed state
/// update per flush
#[derive(Debug, Default)]
pub struct OutgoingBatcher {
    packets_sent: u64,
    reliable_promotions: u64,
    send_failures: u64,
}

impl OutgoingBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a complete state-update packet
    pub fn write_packet(
        last_replicate_tick: Tick,
        fragments: &[PooledBuffer],
    ) -> Result<Vec<u8>, StateUpdateError> {
        let payload_length: usize = fragments.iter().map(|fragment| fragment.len()).sum();
        let header = StateUpdateHeader::new(last_replicate_tick, payload_length);

        let mut writer = BitWriter::with_capacity(header.byte_length() + payload_length);
        header.ser(&mut writer)?;
        for fragment in fragments {
            writer.write_bytes(fragment.as_slice());
        }

        Ok(writer.to_bytes())
    }

    /// Sends one state update to every connection with pending fragments, then
    /// clears them. Returns the number of packets handed to the transport.
    pub fn flush<'c, C, I, T>(
        &mut self,
        connections: I,
        transport: &mut T,
        interpolation: u8,
    ) -> usize
    where
        C: OutgoingConnection + ?Sized + 'c,
        I: IntoIterator<Item = &'c mut C>,
        T: Transport + ?Sized,
    {
        let mut sent = 0;
        for connection in connections {
            if connection.pending_fragments().is_empty() {
                continue;
            }
            if self.flush_connection(connection, transport, interpolation) {
                sent += 1;
            }
            connection.clear_pending_fragments();
        }
        sent
    }

    fn flush_connection<C, T>(&mut self, connection: &C, transport: &mut T, interpolation: u8) -> bool
    where
        C: OutgoingConnection + ?Sized,
        T: Transport + ?Sized,
    {
        let key = connection.key();
        let last_replicate_tick = estimated_replicate_tick(connection, interpolation);

        let packet = match Self::write_packet(last_replicate_tick, connection.pending_fragments()) {
            Ok(packet) => packet,
            Err(error) => {
                warn!("Cannot write state update for connection {}: {}", key.to_u64(), error);
                return false;
            }
        };

        let mut channel = Channel::Unreliable;
        if packet.len() > transport.max_unreliable_payload() {
            debug!(
                "state update of {} bytes for connection {} exceeds unreliable limit, sending reliably",
                packet.len(),
                key.to_u64()
            );
            channel = Channel::Reliable;
            self.reliable_promotions += 1;
        }

        if let Err(error) = transport.send(channel, key, &packet) {
            warn!("Server Error: Cannot send state update to connection {}: {}", key.to_u64(), error);
            self.send_failures += 1;
            return false;
        }

        self.packets_sent += 1;
        true
    }

    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }

    pub fn reliable_promotions(&self) -> u64 {
        self.reliable_promotions
    }

    pub fn send_failures(&self) -> u64 {
        self.send_failures
    }
}
