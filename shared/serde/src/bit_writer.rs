/// Sink for serialized bits
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }
}

/// Growable bit writer. Bits are packed least-significant first, so a stream
/// made only of whole bytes is byte-for-byte identical to those bytes.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bit_count: u32,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(bytes),
            bit_count: 0,
        }
    }

    /// Whether the next write starts on a byte boundary
    pub fn is_aligned(&self) -> bool {
        self.scratch_index == 0
    }

    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    /// Number of bytes `to_bytes` would return right now
    pub fn byte_count(&self) -> usize {
        self.buffer.len() + usize::from(self.scratch_index > 0)
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        if self.scratch_index > 0 {
            self.buffer.push(self.scratch);
            self.scratch = 0;
            self.scratch_index = 0;
        }
        self.buffer
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.scratch |= 1 << self.scratch_index;
        }
        self.scratch_index += 1;
        self.bit_count += 1;

        if self.scratch_index == 8 {
            self.buffer.push(self.scratch);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.is_aligned() {
            self.buffer.push(byte);
            self.bit_count += 8;
            return;
        }
        for index in 0..8 {
            self.write_bit((byte >> index) & 1 != 0);
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if self.is_aligned() {
            self.buffer.extend_from_slice(bytes);
            self.bit_count += (bytes.len() as u32) * 8;
            return;
        }
        for byte in bytes {
            self.write_byte(*byte);
        }
    }
}

/// Counts the bits that would be written, without storing anything
#[derive(Default)]
pub struct BitCounter {
    bit_count: u32,
}

impl BitCounter {
    pub fn new() -> Self {
        Self { bit_count: 0 }
    }

    pub fn bits_needed(&self) -> u32 {
        self.bit_count
    }
}

impl BitWrite for BitCounter {
    fn write_bit(&mut self, _: bool) {
        self.bit_count += 1;
    }

    fn write_byte(&mut self, _: u8) {
        self.bit_count += 8;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bit_count += (bytes.len() as u32) * 8;
    }
}
