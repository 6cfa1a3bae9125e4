use snafu::Snafu;

/// An enum of possible errors that can occur while decoding a term.
///
/// Every error aborts the whole `decode` call; no partial term is ever
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum DecodeError {
    #[snafu(display("invalid version byte {}, expected 131", version))]
    InvalidVersion { version: u8 },

    #[snafu(display("unknown term tag {}", tag))]
    UnknownTag { tag: u8 },

    /// A declared length field exceeds the remaining input.
    #[snafu(display(
        "input truncated at offset {}: needed {} bytes, {} remaining",
        offset,
        needed,
        remaining
    ))]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The tail of a LIST_EXT was not NIL_EXT. Improper lists are
    /// rejected, never coerced.
    #[snafu(display("improper list: tail tag {} is not NIL_EXT", tag))]
    ImproperList { tag: u8 },

    #[snafu(display("atom at offset {} is not valid UTF-8", offset))]
    InvalidAtom { offset: usize },

    /// A legacy FLOAT_EXT field did not parse as a decimal number.
    #[snafu(display("unparseable FLOAT_EXT field at offset {}", offset))]
    InvalidFloat { offset: usize },

    #[snafu(display("term nesting exceeded the depth limit of {}", limit))]
    TooDeep { limit: usize },
}

/// An enum of possible errors that can occur while encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility = "pub(crate)")]
pub enum EncodeError {
    #[snafu(display("value cannot be encoded: {}", reason))]
    Unencodable { reason: String },
}
