use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<true, BITS>;

/// Unsigned integer written with an explicit bit width.
///
/// When `VARIABLE` is set the value is split into `BITS`-wide groups, each
/// preceded by a single "proceed" bit, so small values stay small on the wire.
/// With `BITS = 7` every group is exactly one byte.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const VARIABLE: bool, const BITS: u8> {
    value: u64,
}

impl<const VARIABLE: bool, const BITS: u8> SerdeInteger<VARIABLE, BITS> {
    /// Returns `None` when a fixed-width integer cannot hold `value`
    pub fn try_new<T: Into<u64>>(value: T) -> Option<Self> {
        let value = value.into();
        if BITS == 0 || BITS > 64 {
            return None;
        }
        if !VARIABLE && BITS < 64 && value >= (1u64 << BITS) {
            return None;
        }
        Some(Self { value })
    }

    /// # Panics
    /// Panics if the value does not fit into a fixed-width integer of `BITS` bits
    pub fn new<T: Into<u64>>(value: T) -> Self {
        Self::try_new(value).expect("value does not fit into the declared bit width")
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    fn group_count(&self) -> u32 {
        if !VARIABLE {
            return 1;
        }
        let mut groups = 1;
        let mut rest = self.value;
        while BITS < 64 && rest >= (1u64 << BITS) {
            rest >>= BITS;
            groups += 1;
        }
        groups
    }
}

impl<const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;
        if !VARIABLE {
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
            return;
        }

        loop {
            let proceed = BITS < 64 && value >= (1u64 << BITS);
            writer.write_bit(proceed);
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
            if !proceed {
                return;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if BITS == 0 || BITS > 64 {
            return Err(SerdeErr);
        }

        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let proceed = if VARIABLE { reader.read_bit()? } else { false };
            for _ in 0..BITS {
                let bit = reader.read_bit()?;
                if bit {
                    if shift >= 64 {
                        return Err(SerdeErr);
                    }
                    value |= 1u64 << shift;
                }
                shift += 1;
            }
            if !proceed {
                return Ok(Self { value });
            }
            if shift >= 64 {
                return Err(SerdeErr);
            }
        }
    }

    fn bit_length(&self) -> u32 {
        let proceed_bits = u32::from(VARIABLE);
        self.group_count() * (u32::from(BITS) + proceed_bits)
    }
}

impl<const BITS: u8> ConstBitLength for SerdeInteger<false, BITS> {
    fn const_bit_length() -> u32 {
        u32::from(BITS)
    }
}
