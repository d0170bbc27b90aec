use tether_serde::{BitReader, BitWrite, Serde, SerdeErr, UnsignedVariableInteger};

use crate::{error::StateUpdateError, Tick};

/// First byte of every state-update packet
pub const STATE_UPDATE_PACKET_ID: u8 = 0x0B;

type TickVarint = UnsignedVariableInteger<7>;

/// Header of a state-update packet.
///
/// Layout: `packet_id: u8`, `last_replicate_tick: varint`,
/// `payload_length: i32`, then `payload_length` payload bytes. Receivers that
/// do not care about an update read the tick, then the length, then skip
/// exactly that many bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateUpdateHeader {
    pub last_replicate_tick: Tick,
    pub payload_length: usize,
}

impl StateUpdateHeader {
    pub fn new(last_replicate_tick: Tick, payload_length: usize) -> Self {
        Self {
            last_replicate_tick,
            payload_length,
        }
    }

    /// Writes the packet id followed by the header fields
    pub fn ser(&self, writer: &mut dyn BitWrite) -> Result<(), StateUpdateError> {
        let length = i32::try_from(self.payload_length).map_err(|_| {
            StateUpdateError::PayloadTooLarge {
                length: self.payload_length,
            }
        })?;

        STATE_UPDATE_PACKET_ID.ser(writer);
        TickVarint::new(self.last_replicate_tick).ser(writer);
        length.ser(writer);
        Ok(())
    }

    /// Reads and checks the packet id, then the header fields
    pub fn de(reader: &mut BitReader) -> Result<Self, StateUpdateError> {
        let packet_id = u8::de(reader)?;
        if packet_id != STATE_UPDATE_PACKET_ID {
            return Err(StateUpdateError::UnexpectedPacketId {
                found: packet_id,
                expected: STATE_UPDATE_PACKET_ID,
            });
        }
        Self::de_fields(reader)
    }

    /// Reads the header fields of a packet whose id was already consumed
    pub fn de_fields(reader: &mut BitReader) -> Result<Self, StateUpdateError> {
        let tick = TickVarint::de(reader)?.get();
        let last_replicate_tick = Tick::try_from(tick).map_err(|_| SerdeErr)?;

        let length = i32::de(reader)?;
        let payload_length = usize::try_from(length)
            .map_err(|_| StateUpdateError::NegativePayloadLength { length })?;

        Ok(Self {
            last_replicate_tick,
            payload_length,
        })
    }

    /// Reads the header fields of a packet whose id was already consumed and
    /// moves the reader past its payload
    pub fn skip(reader: &mut BitReader) -> Result<Self, StateUpdateError> {
        let header = Self::de_fields(reader)?;
        header.skip_payload(reader)?;
        Ok(header)
    }

    /// Bytes taken by the header on the wire, packet id included
    pub fn byte_length(&self) -> usize {
        let tick_bits = TickVarint::new(self.last_replicate_tick).bit_length() as usize;
        1 + tick_bits / 8 + 4
    }

    /// Borrows the payload that follows this header
    pub fn read_payload<'b>(&self, reader: &mut BitReader<'b>) -> Result<&'b [u8], StateUpdateError> {
        self.check_available(reader)?;
        Ok(reader.read_aligned(self.payload_length)?)
    }

    /// Moves the reader past the payload without looking at it
    pub fn skip_payload(&self, reader: &mut BitReader) -> Result<(), StateUpdateError> {
        self.check_available(reader)?;
        Ok(reader.skip_bytes(self.payload_length)?)
    }

    fn check_available(&self, reader: &BitReader) -> Result<(), StateUpdateError> {
        let available = reader.bytes_remaining();
        if self.payload_length > available {
            return Err(StateUpdateError::TruncatedPayload {
                declared: self.payload_length,
                available,
            });
        }
        Ok(())
    }
}

/// A decoded state update borrowing its payload from the packet buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateUpdate<'b> {
    pub last_replicate_tick: Tick,
    pub payload: &'b [u8],
}

impl<'b> StateUpdate<'b> {
    pub fn read(reader: &mut BitReader<'b>) -> Result<Self, StateUpdateError> {
        let header = StateUpdateHeader::de(reader)?;
        let payload = header.read_payload(reader)?;
        Ok(Self {
            last_replicate_tick: header.last_replicate_tick,
            payload,
        })
    }

    /// Reads a state update's header and skips its payload, returning the
    /// header that was skipped
    pub fn skip(reader: &mut BitReader) -> Result<StateUpdateHeader, StateUpdateError> {
        let header = StateUpdateHeader::de(reader)?;
        header.skip_payload(reader)?;
        Ok(header)
    }
}
