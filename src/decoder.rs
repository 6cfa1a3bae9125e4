use log::trace;
use snafu::{ensure, OptionExt};

use crate::bigint::digits_to_integer;
use crate::constants::{tag, VERSION};
use crate::cursor::Cursor;
use crate::error::{self, DecodeError};
use crate::term::{Float, Integer, Term};

/// Maximum nesting of compound terms a decode call will follow before
/// failing with `TooDeep`.
pub const DEFAULT_DEPTH_LIMIT: usize = 256;

/// Decodes a single term from `input`, using the default depth limit.
///
/// The version byte is checked once, before the top-level term;
/// trailing bytes after the term are ignored.
pub fn decode(input: &[u8]) -> Result<Term, DecodeError> {
    Decoder::new(input).decode()
}

pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    limit: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_depth_limit(input, DEFAULT_DEPTH_LIMIT)
    }

    pub fn with_depth_limit(input: &'a [u8], limit: usize) -> Self {
        Decoder {
            cursor: Cursor::new(input),
            limit,
            depth: limit,
        }
    }

    pub fn decode(mut self) -> Result<Term, DecodeError> {
        let version = self.cursor.read_u8()?;
        ensure!(version == VERSION, error::InvalidVersion { version });
        self.term()
    }

    /// Per-term dispatch: one tag byte, then the handler from the tag
    /// table. Compound handlers re-enter here for their elements
    /// without re-reading the version byte.
    fn term(&mut self) -> Result<Term, DecodeError> {
        ensure!(self.depth > 0, error::TooDeep { limit: self.limit });
        self.depth -= 1;
        let tag = self.cursor.read_u8()?;
        let handler = TAG_TABLE[tag as usize].context(error::UnknownTag { tag })?;
        let term = handler(self)?;
        self.depth += 1;
        Ok(term)
    }

    /// Decodes `count` consecutive terms. The preallocation is clamped
    /// to the remaining input so an adversarial arity cannot force a
    /// huge allocation before truncation is detected.
    fn terms(&mut self, count: usize) -> Result<Vec<Term>, DecodeError> {
        let mut elems = Vec::with_capacity(count.min(self.cursor.remaining()));
        for _ in 0..count {
            elems.push(self.term()?);
        }
        Ok(elems)
    }
}

type TagFn = fn(&mut Decoder<'_>) -> Result<Term, DecodeError>;

/// Tag byte to decode function. `None` entries yield `UnknownTag`.
static TAG_TABLE: [Option<TagFn>; 256] = tag_table();

const fn tag_table() -> [Option<TagFn>; 256] {
    let mut table: [Option<TagFn>; 256] = [None; 256];
    table[tag::SMALL_INTEGER_EXT as usize] = Some(small_integer_ext as TagFn);
    table[tag::INTEGER_EXT as usize] = Some(integer_ext as TagFn);
    table[tag::FLOAT_EXT as usize] = Some(float_ext as TagFn);
    table[tag::NEW_FLOAT_EXT as usize] = Some(new_float_ext as TagFn);
    table[tag::SMALL_TUPLE_EXT as usize] = Some(small_tuple_ext as TagFn);
    table[tag::LARGE_TUPLE_EXT as usize] = Some(large_tuple_ext as TagFn);
    table[tag::MAP_EXT as usize] = Some(map_ext as TagFn);
    table[tag::NIL_EXT as usize] = Some(nil_ext as TagFn);
    table[tag::STRING_EXT as usize] = Some(string_ext as TagFn);
    table[tag::LIST_EXT as usize] = Some(list_ext as TagFn);
    table[tag::BINARY_EXT as usize] = Some(binary_ext as TagFn);
    table[tag::SMALL_BIG_EXT as usize] = Some(small_big_ext as TagFn);
    table[tag::LARGE_BIG_EXT as usize] = Some(large_big_ext as TagFn);
    table[tag::ATOM_EXT as usize] = Some(atom_ext as TagFn);
    table[tag::SMALL_ATOM_EXT as usize] = Some(small_atom_ext as TagFn);
    table[tag::ATOM_UTF8_EXT as usize] = Some(atom_ext as TagFn);
    table[tag::SMALL_ATOM_UTF8_EXT as usize] = Some(small_atom_ext as TagFn);
    table
}

fn small_integer_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("small_integer_ext");
    let int = dec.cursor.read_u8()?;
    Ok(Term::Integer(Integer::Small(int as i64)))
}

fn integer_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("integer_ext");
    let int = dec.cursor.read_i32()?;
    Ok(Term::Integer(Integer::Small(int as i64)))
}

/// Legacy float-as-string: a fixed 31-byte ASCII decimal field, NUL
/// padded. Decode only.
fn float_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("float_ext");
    let offset = dec.cursor.position();
    let bytes = dec.cursor.read_bytes(31)?;
    let end = bytes.iter().position(|byte| *byte == 0).unwrap_or(bytes.len());
    let num = std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|text| text.trim().parse::<f64>().ok())
        .context(error::InvalidFloat { offset })?;
    Ok(Term::Float(Float(num)))
}

fn new_float_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("new_float_ext");
    let num = dec.cursor.read_f64()?;
    Ok(Term::Float(Float(num)))
}

fn small_tuple_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("small_tuple_ext");
    let arity = dec.cursor.read_u8()?;
    Ok(Term::Tuple(dec.terms(arity as usize)?))
}

fn large_tuple_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("large_tuple_ext");
    let arity = dec.cursor.read_u32()?;
    Ok(Term::Tuple(dec.terms(arity as usize)?))
}

fn map_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("map_ext");
    let arity = dec.cursor.read_u32()? as usize;
    let mut pairs = Vec::with_capacity(arity.min(dec.cursor.remaining()));
    for _ in 0..arity {
        let key = dec.term()?;
        let value = dec.term()?;
        pairs.push((key, value));
    }
    Ok(Term::Map(pairs))
}

fn nil_ext(_dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("nil_ext");
    Ok(Term::List(Vec::new()))
}

fn string_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("string_ext");
    let length = dec.cursor.read_u16()?;
    let data = dec.cursor.read_bytes(length as usize)?;
    Ok(Term::ByteList(data.to_vec()))
}

fn list_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("list_ext");
    let length = dec.cursor.read_u32()?;
    let elems = dec.terms(length as usize)?;
    let tail = dec.cursor.read_u8()?;
    ensure!(tail == tag::NIL_EXT, error::ImproperList { tag: tail });
    Ok(Term::List(elems))
}

fn binary_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("binary_ext");
    let length = dec.cursor.read_u32()?;
    let data = dec.cursor.read_bytes(length as usize)?;
    Ok(Term::Binary(data.to_vec()))
}

fn small_big_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("small_big_ext");
    let count = dec.cursor.read_u8()?;
    big_ext(dec, count as usize)
}

fn large_big_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("large_big_ext");
    let count = dec.cursor.read_u32()?;
    big_ext(dec, count as usize)
}

fn big_ext(dec: &mut Decoder<'_>, count: usize) -> Result<Term, DecodeError> {
    // sign byte 1 is negative, anything else positive
    let sign = dec.cursor.read_u8()?;
    let digits = dec.cursor.read_bytes(count)?;
    Ok(Term::Integer(digits_to_integer(sign, digits)))
}

fn atom_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("atom_ext");
    let len = dec.cursor.read_u16()?;
    atom(dec, len as usize)
}

fn small_atom_ext(dec: &mut Decoder<'_>) -> Result<Term, DecodeError> {
    trace!("small_atom_ext");
    let len = dec.cursor.read_u8()?;
    atom(dec, len as usize)
}

fn atom(dec: &mut Decoder<'_>, len: usize) -> Result<Term, DecodeError> {
    let offset = dec.cursor.position();
    let bytes = dec.cursor.read_bytes(len)?;
    let name = std::str::from_utf8(bytes)
        .ok()
        .context(error::InvalidAtom { offset })?;
    Ok(Term::Atom(name.to_owned()))
}
