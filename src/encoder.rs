use std::collections::{BTreeMap, HashMap};
use std::convert::TryInto;

use num_bigint::BigInt;

use crate::error::EncodeError;
use crate::term::{Float, Integer, Term};
use crate::writer::Writer;

/// Encodes a value into a complete buffer, prefixed with the version
/// byte.
pub fn encode<T: Encoder + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new();
    writer.version();
    value.encode(&mut writer)?;
    Ok(writer.into_bytes())
}

/// The host-binding surface: a value either has an impl that writes it
/// as one of the closed term kinds, or it does not encode. A
/// "convert to mapping" capability is expressed by implementing this
/// trait in terms of the map impls; the codec never reflects.
pub trait Encoder {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError>;
}

impl Encoder for Term {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Term::Integer(int) => writer.integer(int),
            Term::Float(num) => {
                writer.float(num.0);
                Ok(())
            }
            Term::Atom(name) => writer.atom(name),
            Term::Binary(data) => writer.binary(data),
            // never emitted as STRING_EXT; a byte list goes back out
            // as a plain list of small integers
            Term::ByteList(bytes) => {
                if bytes.is_empty() {
                    writer.raw_nil_ext();
                    return Ok(());
                }
                writer.list_header(bytes.len())?;
                for byte in bytes {
                    writer.raw_small_integer_ext(*byte);
                }
                writer.raw_nil_ext();
                Ok(())
            }
            Term::List(elems) => encode_list(elems, writer),
            Term::Tuple(elems) => {
                writer.tuple_header(elems.len())?;
                for elem in elems {
                    elem.encode(writer)?;
                }
                Ok(())
            }
            Term::Map(pairs) => {
                writer.map_header(pairs.len())?;
                for (key, value) in pairs {
                    key.encode(writer)?;
                    value.encode(writer)?;
                }
                Ok(())
            }
        }
    }
}

impl Encoder for Integer {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(self)
    }
}

impl Encoder for Float {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.float(self.0);
        Ok(())
    }
}

impl<T: Encoder + ?Sized> Encoder for &T {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        <T as Encoder>::encode(*self, writer)
    }
}

/// Wrapper marking a string as an atom.
#[derive(Debug, Copy, Clone)]
pub struct A<'a>(pub &'a str);
impl Encoder for A<'_> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.atom(self.0)
    }
}

/// Wrapper marking a byte slice as a binary.
#[derive(Debug, Copy, Clone)]
pub struct Bin<'a>(pub &'a [u8]);
impl Encoder for Bin<'_> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.binary(self.0)
    }
}

impl Encoder for str {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.binary(self.as_bytes())
    }
}
impl Encoder for String {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.binary(self.as_bytes())
    }
}

impl Encoder for bool {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.atom(if *self { "true" } else { "false" })
    }
}

impl<T: Encoder> Encoder for Option<T> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(writer),
            None => writer.atom("nil"),
        }
    }
}

impl Encoder for f64 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.float(*self);
        Ok(())
    }
}

impl Encoder for u8 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.raw_small_integer_ext(*self);
        Ok(())
    }
}
impl Encoder for i8 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for i16 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for u16 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for i32 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for u32 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for i64 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self))
    }
}
impl Encoder for u64 {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        match (*self).try_into() {
            Ok(int) => writer.integer(&Integer::Small(int)),
            Err(_) => writer.integer(&Integer::Big(BigInt::from(*self))),
        }
    }
}
impl Encoder for usize {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        (*self as u64).encode(writer)
    }
}
impl Encoder for isize {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.integer(&Integer::Small(*self as i64))
    }
}
impl Encoder for BigInt {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.big_integer(self)
    }
}

fn encode_list<T: Encoder>(elems: &[T], writer: &mut Writer) -> Result<(), EncodeError> {
    if elems.is_empty() {
        writer.raw_nil_ext();
        return Ok(());
    }
    writer.list_header(elems.len())?;
    for elem in elems {
        elem.encode(writer)?;
    }
    writer.raw_nil_ext();
    Ok(())
}

impl<T: Encoder> Encoder for [T] {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        encode_list(self, writer)
    }
}
impl<T: Encoder> Encoder for Vec<T> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        encode_list(self, writer)
    }
}

impl<K: Encoder, V: Encoder> Encoder for HashMap<K, V> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.map_header(self.len())?;
        for (key, value) in self.iter() {
            key.encode(writer)?;
            value.encode(writer)?;
        }
        Ok(())
    }
}
impl<K: Encoder, V: Encoder> Encoder for BTreeMap<K, V> {
    fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
        writer.map_header(self.len())?;
        for (key, value) in self.iter() {
            key.encode(writer)?;
            value.encode(writer)?;
        }
        Ok(())
    }
}

macro_rules! impl_tuple_encoder {
    ($count:expr, ($(($typ:ident, $name:ident)),*)) => {
        impl<$($typ: Encoder, )*> Encoder for ($($typ, )*) {
            fn encode(&self, writer: &mut Writer) -> Result<(), EncodeError> {
                writer.tuple_header($count)?;

                let ($($name,)*) = self;
                $(
                    $name.encode(writer)?;
                )*

                Ok(())
            }
        }
    };
}

impl_tuple_encoder!(0, ());
impl_tuple_encoder!(1, ((A, a)));
impl_tuple_encoder!(2, ((A, a), (B, b)));
impl_tuple_encoder!(3, ((A, a), (B, b), (C, c)));
impl_tuple_encoder!(4, ((A, a), (B, b), (C, c), (D, d)));
impl_tuple_encoder!(5, ((A, a), (B, b), (C, c), (D, d), (E, e)));
impl_tuple_encoder!(6, ((A, a), (B, b), (C, c), (D, d), (E, e), (F, f)));
impl_tuple_encoder!(7, ((A, a), (B, b), (C, c), (D, d), (E, e), (F, f), (G, g)));
impl_tuple_encoder!(
    8,
    (
        (A, a),
        (B, b),
        (C, c),
        (D, d),
        (E, e),
        (F, f),
        (G, g),
        (H, h)
    )
);
