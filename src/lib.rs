//! Codec for the Erlang External Term Format: decodes byte buffers
//! into [`Term`] trees and encodes native values back into byte
//! buffers.

mod constants;
pub use constants::{tag, VERSION};

mod error;
pub use error::{DecodeError, EncodeError};

mod cursor;
pub use cursor::Cursor;

mod term;
pub use term::{Float, Integer, Term};

mod bigint;
pub use bigint::{digits_to_integer, integer_to_digits};

mod decoder;
pub use decoder::{decode, Decoder, DEFAULT_DEPTH_LIMIT};

mod writer;
pub use writer::Writer;

mod encoder;
pub use encoder::{encode, Bin, Encoder, A};

#[cfg(test)]
mod test;
