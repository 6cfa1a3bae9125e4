use std::convert::TryInto;

use byteorder::{BigEndian, ByteOrder};
use num_bigint::BigInt;

use crate::bigint::integer_to_digits;
use crate::constants::{tag, VERSION};
use crate::error::{self, EncodeError};
use crate::term::Integer;

/// Accumulates tag + payload byte sequences into an output buffer.
///
/// Raw appends are infallible (the sink is a plain `Vec`); the fallible
/// surface only reports representability failures, e.g. an atom longer
/// than the wire's length field.
pub struct Writer {
    out: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer { out: Vec::new() }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }

    pub fn version(&mut self) {
        self.out.push(VERSION);
    }

    fn push_u16(&mut self, int: u16) {
        let mut buf = [0; 2];
        BigEndian::write_u16(&mut buf, int);
        self.out.extend_from_slice(&buf);
    }

    fn push_u32(&mut self, int: u32) {
        let mut buf = [0; 4];
        BigEndian::write_u32(&mut buf, int);
        self.out.extend_from_slice(&buf);
    }
}

/// Raw interface: one method per emitted tag, byte-exact payloads.
impl Writer {
    pub fn raw_small_integer_ext(&mut self, int: u8) {
        self.out.push(tag::SMALL_INTEGER_EXT);
        self.out.push(int);
    }

    pub fn raw_integer_ext(&mut self, int: i32) {
        self.out.push(tag::INTEGER_EXT);
        let mut buf = [0; 4];
        BigEndian::write_i32(&mut buf, int);
        self.out.extend_from_slice(&buf);
    }

    pub fn raw_small_big_ext(&mut self, sign: u8, digits: &[u8]) {
        debug_assert!(digits.len() <= 255);
        self.out.push(tag::SMALL_BIG_EXT);
        self.out.push(digits.len() as u8);
        self.out.push(sign);
        self.out.extend_from_slice(digits);
    }

    pub fn raw_large_big_ext(&mut self, sign: u8, digits: &[u8]) {
        self.out.push(tag::LARGE_BIG_EXT);
        self.push_u32(digits.len() as u32);
        self.out.push(sign);
        self.out.extend_from_slice(digits);
    }

    pub fn raw_new_float_ext(&mut self, num: f64) {
        self.out.push(tag::NEW_FLOAT_EXT);
        let mut buf = [0; 8];
        BigEndian::write_f64(&mut buf, num);
        self.out.extend_from_slice(&buf);
    }

    pub fn raw_nil_ext(&mut self) {
        self.out.push(tag::NIL_EXT);
    }

    pub fn raw_small_atom_utf8_ext(&mut self, name: &str) {
        debug_assert!(name.len() <= 255);
        self.out.push(tag::SMALL_ATOM_UTF8_EXT);
        self.out.push(name.len() as u8);
        self.out.extend_from_slice(name.as_bytes());
    }

    pub fn raw_atom_utf8_ext(&mut self, name: &str) {
        debug_assert!(name.len() <= 65535);
        self.out.push(tag::ATOM_UTF8_EXT);
        self.push_u16(name.len() as u16);
        self.out.extend_from_slice(name.as_bytes());
    }

    pub fn raw_small_tuple_ext(&mut self, arity: u8) {
        self.out.push(tag::SMALL_TUPLE_EXT);
        self.out.push(arity);
    }

    pub fn raw_large_tuple_ext(&mut self, arity: u32) {
        self.out.push(tag::LARGE_TUPLE_EXT);
        self.push_u32(arity);
    }

    pub fn raw_map_ext(&mut self, arity: u32) {
        self.out.push(tag::MAP_EXT);
        self.push_u32(arity);
    }

    pub fn raw_list_ext(&mut self, length: u32) {
        self.out.push(tag::LIST_EXT);
        self.push_u32(length);
    }

    pub fn raw_binary_ext(&mut self, data: &[u8]) {
        self.out.push(tag::BINARY_EXT);
        self.push_u32(data.len() as u32);
        self.out.extend_from_slice(data);
    }
}

/// Kind-dispatched surface: picks the tag by the value's range or
/// length, mirroring the decoder's tag table.
impl Writer {
    pub fn integer(&mut self, int: &Integer) -> Result<(), EncodeError> {
        match int {
            Integer::Small(int) if (0..=255).contains(int) => {
                self.raw_small_integer_ext(*int as u8);
                Ok(())
            }
            Integer::Small(int) => {
                if let Ok(int) = (*int).try_into() {
                    self.raw_integer_ext(int);
                    Ok(())
                } else {
                    self.big(int)
                }
            }
            Integer::Big(int) => self.big(int),
        }
    }

    fn big<I: Into<Integer> + Clone>(&mut self, int: &I) -> Result<(), EncodeError> {
        let (sign, digits) = integer_to_digits(&int.clone().into());
        if digits.len() <= 255 {
            self.raw_small_big_ext(sign, &digits);
            Ok(())
        } else if digits.len() <= u32::max_value() as usize {
            self.raw_large_big_ext(sign, &digits);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("integer magnitude needs {} digits", digits.len()),
            }
            .fail()
        }
    }

    pub fn big_integer(&mut self, int: &BigInt) -> Result<(), EncodeError> {
        self.integer(&int.clone().into())
    }

    pub fn float(&mut self, num: f64) {
        self.raw_new_float_ext(num);
    }

    pub fn atom(&mut self, name: &str) -> Result<(), EncodeError> {
        if name.len() <= 255 {
            self.raw_small_atom_utf8_ext(name);
            Ok(())
        } else if name.len() <= 65535 {
            self.raw_atom_utf8_ext(name);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("atom of {} bytes exceeds ATOM_UTF8_EXT", name.len()),
            }
            .fail()
        }
    }

    pub fn binary(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        if data.len() <= u32::max_value() as usize {
            self.raw_binary_ext(data);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("binary of {} bytes exceeds BINARY_EXT", data.len()),
            }
            .fail()
        }
    }

    /// Header only; the caller writes `arity` element terms after.
    pub fn tuple_header(&mut self, arity: usize) -> Result<(), EncodeError> {
        if arity <= 255 {
            self.raw_small_tuple_ext(arity as u8);
            Ok(())
        } else if let Ok(arity) = arity.try_into() {
            self.raw_large_tuple_ext(arity);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("tuple arity {} exceeds LARGE_TUPLE_EXT", arity),
            }
            .fail()
        }
    }

    /// Header only; the caller writes the elements and the NIL_EXT
    /// tail. A zero-length list should be written as `raw_nil_ext`
    /// instead.
    pub fn list_header(&mut self, length: usize) -> Result<(), EncodeError> {
        if let Ok(length) = length.try_into() {
            self.raw_list_ext(length);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("list length {} exceeds LIST_EXT", length),
            }
            .fail()
        }
    }

    /// Header only; the caller writes `arity` key/value term pairs.
    pub fn map_header(&mut self, arity: usize) -> Result<(), EncodeError> {
        if let Ok(arity) = arity.try_into() {
            self.raw_map_ext(arity);
            Ok(())
        } else {
            error::Unencodable {
                reason: format!("map arity {} exceeds MAP_EXT", arity),
            }
            .fail()
        }
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}
