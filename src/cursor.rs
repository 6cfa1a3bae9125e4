use byteorder::{BigEndian, ByteOrder};
use snafu::ensure;

use crate::error::{self, DecodeError};

/// Bounds-checked view over an input byte slice, used only during decode.
///
/// The position never exceeds the input length. Every read either
/// advances the position by exactly the consumed byte count or fails
/// without mutating it; the bounds check happens before any byte is
/// consumed.
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Cursor { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        ensure!(
            n <= self.remaining(),
            error::Truncated {
                offset: self.position,
                needed: n,
                remaining: self.remaining(),
            }
        );
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(BigEndian::read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(BigEndian::read_i32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(BigEndian::read_f64(self.take(8)?))
    }

    /// Reads exactly `n` bytes. `n` always comes from a previously
    /// decoded length field, never from the caller directly.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        self.take(n)
    }
}
