use crate::error::SerdeErr;

/// Reads bits back out of a buffer produced by [`crate::BitWriter`]
pub struct BitReader<'b> {
    buffer: &'b [u8],
    bit_index: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            bit_index: 0,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.bit_index % 8 == 0
    }

    pub fn bits_remaining(&self) -> usize {
        (self.buffer.len() * 8).saturating_sub(self.bit_index)
    }

    /// Whole bytes left to read. Partial bytes are not counted.
    pub fn bytes_remaining(&self) -> usize {
        self.bits_remaining() / 8
    }

    pub fn has_remaining(&self) -> bool {
        self.bits_remaining() > 0
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let byte = self.buffer.get(self.bit_index / 8).ok_or(SerdeErr)?;
        let bit = (byte >> (self.bit_index % 8)) & 1 != 0;
        self.bit_index += 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.is_aligned() {
            let byte = *self.buffer.get(self.bit_index / 8).ok_or(SerdeErr)?;
            self.bit_index += 8;
            return Ok(byte);
        }
        if self.bits_remaining() < 8 {
            return Err(SerdeErr);
        }
        let mut byte = 0u8;
        for index in 0..8 {
            if self.read_bit()? {
                byte |= 1 << index;
            }
        }
        Ok(byte)
    }

    /// Borrows the next `count` bytes directly from the underlying buffer.
    /// Fails if the reader is not on a byte boundary or runs out of data.
    pub fn read_aligned(&mut self, count: usize) -> Result<&'b [u8], SerdeErr> {
        if !self.is_aligned() || count > self.bytes_remaining() {
            return Err(SerdeErr);
        }
        let start = self.bit_index / 8;
        self.bit_index += count * 8;
        Ok(&self.buffer[start..start + count])
    }

    /// Copies the next `count` bytes, aligned or not
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SerdeErr> {
        if self.is_aligned() {
            return self.read_aligned(count).map(<[u8]>::to_vec);
        }
        if count > self.bytes_remaining() {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }

    pub fn skip_bytes(&mut self, count: usize) -> Result<(), SerdeErr> {
        if count * 8 > self.bits_remaining() {
            return Err(SerdeErr);
        }
        self.bit_index += count * 8;
        Ok(())
    }
}
