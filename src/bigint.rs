//! Conversion between the wire's sign + little-endian base-256
//! magnitude digits and an arbitrary-precision [`Integer`].

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::term::Integer;

/// Reconstructs an integer from a SMALL_BIG_EXT / LARGE_BIG_EXT
/// payload: magnitude = sum of digit[i] * 256^i, negated when the sign
/// byte is exactly 1.
pub fn digits_to_integer(sign: u8, digits: &[u8]) -> Integer {
    let sign = if sign == 1 { Sign::Minus } else { Sign::Plus };
    Integer::Big(BigInt::from_bytes_le(sign, digits)).shrink()
}

/// Produces the minimal little-endian digit sequence for the magnitude
/// and a sign byte (0 for >= 0, 1 for < 0). The digit sequence is empty
/// iff the value is zero; num-bigint renders zero as a single 0 digit,
/// but the wire convention wants the empty sequence with sign 0.
pub fn integer_to_digits(int: &Integer) -> (u8, Vec<u8>) {
    let big = int.to_bigint();
    if big.is_zero() {
        return (0, Vec::new());
    }
    let (sign, digits) = big.to_bytes_le();
    let sign = if sign == Sign::Minus { 1 } else { 0 };
    (sign, digits)
}
