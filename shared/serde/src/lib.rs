//! # Tether Serde
//! Bit-level reading & writing used by the tether wire format.
//!
//! Everything written through [`BitWriter`] is packed least-significant bit
//! first. Values whose bit length is a multiple of 8 keep the stream byte
//! aligned, which lets readers borrow payload slices straight out of the
//! packet buffer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_reader;
mod bit_writer;
mod constants;
mod error;
mod impls;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitCounter, BitWrite, BitWriter};
pub use constants::{MTU_SIZE_BITS, MTU_SIZE_BYTES};
pub use error::SerdeErr;
pub use integer::{SerdeInteger, UnsignedInteger, UnsignedVariableInteger};
pub use serde::{ConstBitLength, Serde};
