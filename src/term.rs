use std::fmt::{self, Display, Formatter};

use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// An arbitrary-precision signed integer.
///
/// The `Small`/`Big` split is an internal optimisation; equality is
/// value-based across the two representations, and wire decoding always
/// shrinks to `Small` when the value fits.
#[derive(Debug, Clone, Hash)]
pub enum Integer {
    Small(i64),
    Big(BigInt),
}

impl Integer {
    pub fn shrink(self) -> Self {
        match self {
            Integer::Small(int) => Integer::Small(int),
            Integer::Big(int) => {
                if let Some(small) = int.to_i64() {
                    Integer::Small(small)
                } else {
                    Integer::Big(int)
                }
            }
        }
    }

    pub fn to_bigint(&self) -> BigInt {
        match self {
            Integer::Small(int) => (*int).into(),
            Integer::Big(int) => int.clone(),
        }
    }
}

impl PartialEq for Integer {
    fn eq(&self, rhs: &Integer) -> bool {
        match (self, rhs) {
            (Integer::Small(lhs), Integer::Small(rhs)) => lhs.eq(rhs),
            (Integer::Small(lhs), Integer::Big(rhs)) => BigInt::from(*lhs).eq(rhs),
            (Integer::Big(lhs), Integer::Small(rhs)) => lhs.eq(&BigInt::from(*rhs)),
            (Integer::Big(lhs), Integer::Big(rhs)) => lhs.eq(rhs),
        }
    }
}
impl Eq for Integer {}

impl From<i64> for Integer {
    fn from(int: i64) -> Integer {
        Integer::Small(int)
    }
}
impl From<i32> for Integer {
    fn from(int: i32) -> Integer {
        Integer::Small(int as i64)
    }
}
impl From<u8> for Integer {
    fn from(int: u8) -> Integer {
        Integer::Small(int as i64)
    }
}
impl From<BigInt> for Integer {
    fn from(int: BigInt) -> Integer {
        Integer::Big(int).shrink()
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Integer::Small(int) => int.fmt(f),
            Integer::Big(int) => int.fmt(f),
        }
    }
}

/// A 64-bit IEEE-754 float compared on its exact bit pattern, so
/// round-trips are bit-exact. Under this equality `0.0 != -0.0` and
/// `NaN == NaN`.
#[derive(Debug, Clone, Copy)]
pub struct Float(pub f64);

impl PartialEq for Float {
    fn eq(&self, rhs: &Float) -> bool {
        self.0.to_bits() == rhs.0.to_bits()
    }
}
impl Eq for Float {}

impl From<f64> for Float {
    fn from(num: f64) -> Float {
        Float(num)
    }
}

impl Display for Float {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A decoded term tree. Fully resolved before it is returned; plain
/// owned values with no shared state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Integer(Integer),
    Float(Float),
    /// A UTF-8 text label, distinct from a general string.
    Atom(String),
    /// An opaque byte sequence.
    Binary(Vec<u8>),
    /// Legacy STRING_EXT string-as-list of byte-sized integers.
    ByteList(Vec<u8>),
    /// Proper lists only; NIL_EXT decodes to the empty list.
    List(Vec<Term>),
    Tuple(Vec<Term>),
    /// Pairs in encounter order; keys unrestricted, not deduplicated.
    Map(Vec<(Term, Term)>),
}

impl Term {
    pub fn int<I: Into<Integer>>(int: I) -> Term {
        Term::Integer(int.into())
    }

    pub fn atom<S: Into<String>>(name: S) -> Term {
        Term::Atom(name.into())
    }

    /// Gateway convention: atoms `true` and `false` carry booleans.
    /// The codec itself never folds these; callers opt in.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Atom(name) if name == "true" => Some(true),
            Term::Atom(name) if name == "false" => Some(false),
            _ => None,
        }
    }

    /// Gateway convention: atoms `nil` and `null` both mean "no value".
    pub fn is_nil(&self) -> bool {
        match self {
            Term::Atom(name) => name == "nil" || name == "null",
            _ => false,
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Term::Integer(int) => int.fmt(f),
            Term::Float(num) => num.fmt(f),
            Term::Atom(name) => write!(f, "{}", name),
            Term::Binary(bytes) => match std::str::from_utf8(bytes) {
                Ok(string) => write!(f, "<<{:?}>>", string),
                Err(_) => {
                    write!(f, "<<")?;
                    for (idx, byte) in bytes.iter().enumerate() {
                        if idx > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", byte)?;
                    }
                    write!(f, ">>")
                }
            },
            Term::ByteList(bytes) => {
                write!(f, "[")?;
                for (idx, byte) in bytes.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", byte)?;
                }
                write!(f, "]")
            }
            Term::List(elems) => {
                write!(f, "[")?;
                for (idx, elem) in elems.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    elem.fmt(f)?;
                }
                write!(f, "]")
            }
            Term::Tuple(elems) => {
                write!(f, "{{")?;
                for (idx, elem) in elems.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    elem.fmt(f)?;
                }
                write!(f, "}}")
            }
            Term::Map(pairs) => {
                write!(f, "#{{")?;
                for (idx, (key, value)) in pairs.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{} => {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
