use pretty_assertions::assert_eq;

use crate::{decode, encode, tag, A};
use crate::{Bin, DecodeError, Decoder, EncodeError, Float, Integer, Term};

use num_bigint::BigInt;
use std::collections::BTreeMap;

fn init_logger() {
    let _ = env_logger::try_init();
}

#[test]
fn version_byte_is_checked() {
    init_logger();
    assert_eq!(
        decode(&[130]),
        Err(DecodeError::InvalidVersion { version: 130 })
    );
    assert_eq!(
        decode(&[]),
        Err(DecodeError::Truncated {
            offset: 0,
            needed: 1,
            remaining: 0,
        })
    );
}

#[test]
fn unknown_tag() {
    assert_eq!(decode(&[131, 200]), Err(DecodeError::UnknownTag { tag: 200 }));
}

#[test]
fn truncated_integer() {
    assert_eq!(
        decode(&[131, 98, 1]),
        Err(DecodeError::Truncated {
            offset: 2,
            needed: 4,
            remaining: 1,
        })
    );
}

#[test]
fn small_integer() {
    init_logger();
    assert_eq!(decode(&[131, 97, 21]), Ok(Term::int(21)));
}

#[test]
fn integer() {
    assert_eq!(decode(&[131, 98, 0, 0, 0, 10]), Ok(Term::int(10)));
    assert_eq!(
        decode(&[131, 98, 255, 255, 255, 255]),
        Ok(Term::int(-1))
    );
}

#[test]
fn tuple() {
    assert_eq!(
        decode(&[131, 104, 2, 97, 1, 97, 2]),
        Ok(Term::Tuple(vec![Term::int(1), Term::int(2)]))
    );
    // LARGE_TUPLE_EXT spelling decodes identically
    assert_eq!(
        decode(&[131, 105, 0, 0, 0, 2, 97, 1, 97, 2]),
        Ok(Term::Tuple(vec![Term::int(1), Term::int(2)]))
    );
}

#[test]
fn nil_is_the_empty_list() {
    assert_eq!(decode(&[131, 106]), Ok(Term::List(vec![])));
}

#[test]
fn proper_list() {
    assert_eq!(
        decode(&[131, 108, 0, 0, 0, 2, 97, 1, 97, 2, 106]),
        Ok(Term::List(vec![Term::int(1), Term::int(2)]))
    );
}

#[test]
fn improper_list_is_rejected() {
    assert_eq!(
        decode(&[131, 108, 0, 0, 0, 2, 97, 1, 97, 2, 97, 3]),
        Err(DecodeError::ImproperList { tag: 97 })
    );
}

#[test]
fn byte_list() {
    assert_eq!(
        decode(&[131, 107, 0, 3, 104, 105, 33]),
        Ok(Term::ByteList(vec![104, 105, 33]))
    );
}

#[test]
fn binary() {
    assert_eq!(
        decode(&[131, 109, 0, 0, 0, 3, 104, 105, 33]),
        Ok(Term::Binary(b"hi!".to_vec()))
    );
}

#[test]
fn small_big() {
    assert_eq!(
        decode(&[131, 110, 8, 0, 21, 95, 208, 172, 75, 155, 182, 1]),
        Ok(Term::int(123456789123456789i64))
    );
    assert_eq!(
        decode(&[131, 110, 2, 1, 1, 1]),
        Ok(Term::int(-257))
    );
}

#[test]
fn large_big_decodes_like_small_big() {
    assert_eq!(
        decode(&[131, 111, 0, 0, 0, 8, 0, 21, 95, 208, 172, 75, 155, 182, 1]),
        Ok(Term::int(123456789123456789i64))
    );
}

#[test]
fn new_float_is_bit_exact() {
    let mut input = vec![131, 70];
    input.extend_from_slice(&1.23456789f64.to_be_bytes());
    assert_eq!(decode(&input), Ok(Term::Float(Float(1.23456789))));
}

#[test]
fn legacy_float_ext() {
    let mut field = b"1.00000000000000000000e+00".to_vec();
    field.resize(31, 0);
    let mut input = vec![131, 99];
    input.extend_from_slice(&field);
    assert_eq!(decode(&input), Ok(Term::Float(Float(1.0))));
}

#[test]
fn legacy_float_ext_rejects_garbage() {
    let mut field = b"not a number".to_vec();
    field.resize(31, 0);
    let mut input = vec![131, 99];
    input.extend_from_slice(&field);
    assert_eq!(decode(&input), Err(DecodeError::InvalidFloat { offset: 2 }));
}

#[test]
fn atoms() {
    assert_eq!(
        decode(&[131, 118, 0, 2, 111, 107]),
        Ok(Term::atom("ok"))
    );
    assert_eq!(decode(&[131, 119, 2, 111, 107]), Ok(Term::atom("ok")));
}

#[test]
fn legacy_atom_tags_decode_like_utf8_ones() {
    assert_eq!(
        decode(&[131, 100, 0, 2, 111, 107]),
        decode(&[131, 118, 0, 2, 111, 107])
    );
    assert_eq!(
        decode(&[131, 115, 2, 111, 107]),
        decode(&[131, 119, 2, 111, 107])
    );
}

#[test]
fn atom_must_be_utf8() {
    assert_eq!(
        decode(&[131, 119, 1, 255]),
        Err(DecodeError::InvalidAtom { offset: 3 })
    );
}

#[test]
fn map_pairs_keep_encounter_order() {
    let input = [
        131, 116, 0, 0, 0, 2, //
        119, 1, 98, 97, 1, // b => 1
        119, 1, 97, 97, 2, // a => 2
    ];
    assert_eq!(
        decode(&input),
        Ok(Term::Map(vec![
            (Term::atom("b"), Term::int(1)),
            (Term::atom("a"), Term::int(2)),
        ]))
    );
}

#[test]
fn trailing_bytes_are_ignored() {
    assert_eq!(decode(&[131, 97, 5, 99, 99, 99]), Ok(Term::int(5)));
}

#[test]
fn every_tag_outside_the_table_is_unknown() {
    let known = [
        tag::SMALL_INTEGER_EXT,
        tag::INTEGER_EXT,
        tag::FLOAT_EXT,
        tag::NEW_FLOAT_EXT,
        tag::SMALL_TUPLE_EXT,
        tag::LARGE_TUPLE_EXT,
        tag::MAP_EXT,
        tag::NIL_EXT,
        tag::STRING_EXT,
        tag::LIST_EXT,
        tag::BINARY_EXT,
        tag::SMALL_BIG_EXT,
        tag::LARGE_BIG_EXT,
        tag::ATOM_EXT,
        tag::SMALL_ATOM_EXT,
        tag::ATOM_UTF8_EXT,
        tag::SMALL_ATOM_UTF8_EXT,
    ];
    for tag in 0..=255u8 {
        let result = decode(&[131, tag]);
        if known.contains(&tag) {
            // tags with a payload fail with Truncated here, never
            // UnknownTag; NIL_EXT succeeds outright
            assert_ne!(result, Err(DecodeError::UnknownTag { tag }), "tag {}", tag);
        } else {
            assert_eq!(result, Err(DecodeError::UnknownTag { tag }), "tag {}", tag);
        }
    }
}

/// `depth` nested single-element lists around a NIL_EXT, `depth + 1`
/// terms deep in total.
fn nested_list(depth: usize) -> Vec<u8> {
    let mut input = vec![131];
    for _ in 0..depth {
        input.extend_from_slice(&[108, 0, 0, 0, 1]);
    }
    input.push(106);
    input.extend(std::iter::repeat(106).take(depth));
    input
}

#[test]
fn depth_limit_boundaries() {
    let limit = 8;

    let at_limit = nested_list(limit - 1);
    assert!(Decoder::with_depth_limit(&at_limit, limit).decode().is_ok());

    let past_limit = nested_list(limit);
    assert_eq!(
        Decoder::with_depth_limit(&past_limit, limit).decode(),
        Err(DecodeError::TooDeep { limit })
    );
}

#[test]
fn default_depth_limit_handles_realistic_nesting() {
    assert!(decode(&nested_list(64)).is_ok());
    assert_eq!(
        decode(&nested_list(4096)),
        Err(DecodeError::TooDeep {
            limit: crate::DEFAULT_DEPTH_LIMIT,
        })
    );
}

#[test]
fn integer_encoding_thresholds() {
    assert_eq!(encode(&Term::int(0)).unwrap(), [131, 97, 0]);
    assert_eq!(encode(&Term::int(255)).unwrap(), [131, 97, 255]);
    assert_eq!(encode(&Term::int(256)).unwrap(), [131, 98, 0, 0, 1, 0]);
    assert_eq!(
        encode(&Term::int(-1)).unwrap(),
        [131, 98, 255, 255, 255, 255]
    );
    assert_eq!(
        encode(&Term::int(i32::max_value() as i64)).unwrap(),
        [131, 98, 127, 255, 255, 255]
    );
    assert_eq!(
        encode(&Term::int(i32::min_value() as i64)).unwrap(),
        [131, 98, 128, 0, 0, 0]
    );
    // one past the INTEGER_EXT range on either side
    assert_eq!(
        encode(&Term::int(i32::max_value() as i64 + 1)).unwrap(),
        [131, 110, 4, 0, 0, 0, 0, 128]
    );
    assert_eq!(
        encode(&Term::int(i32::min_value() as i64 - 1)).unwrap(),
        [131, 110, 4, 1, 1, 0, 0, 128]
    );
}

#[test]
fn big_integer_crosses_to_large_big_at_256_digits() {
    // 2^2040 is the smallest power of two needing 256 magnitude digits
    let int = BigInt::from(1) << 2040;
    let encoded = encode(&Term::Integer(Integer::Big(int))).unwrap();
    assert_eq!(&encoded[..7], &[131, 111, 0, 0, 1, 0, 0]);
    assert_eq!(encoded.len(), 7 + 256);
    assert_eq!(*encoded.last().unwrap(), 1);

    // one digit fewer stays SMALL_BIG_EXT
    let int = BigInt::from(1) << 2032;
    let encoded = encode(&Term::Integer(Integer::Big(int))).unwrap();
    assert_eq!(&encoded[..4], &[131, 110, 255, 0]);
    assert_eq!(encoded.len(), 4 + 255);
}

#[test]
fn atom_encoding_thresholds() {
    let small = "a".repeat(255);
    let encoded = encode(&A(&small)).unwrap();
    assert_eq!(&encoded[..3], &[131, 119, 255]);

    let large = "a".repeat(256);
    let encoded = encode(&A(&large)).unwrap();
    assert_eq!(&encoded[..4], &[131, 118, 1, 0]);

    let oversized = "a".repeat(65536);
    assert!(matches!(
        encode(&A(&oversized)),
        Err(EncodeError::Unencodable { .. })
    ));
}

#[test]
fn tuple_arity_thresholds() {
    let small = Term::Tuple(vec![Term::int(0); 255]);
    assert_eq!(&encode(&small).unwrap()[..3], &[131, 104, 255]);

    let large = Term::Tuple(vec![Term::int(0); 256]);
    assert_eq!(&encode(&large).unwrap()[..6], &[131, 105, 0, 0, 1, 0]);
}

#[test]
fn encoded_lists_are_nil_terminated() {
    assert_eq!(encode(&Vec::<u8>::new()).unwrap(), [131, 106]);
    assert_eq!(
        encode(&vec![1u8, 2]).unwrap(),
        [131, 108, 0, 0, 0, 2, 97, 1, 97, 2, 106]
    );
}

#[test]
fn strings_encode_as_binaries() {
    assert_eq!(
        encode(&"hi!").unwrap(),
        [131, 109, 0, 0, 0, 3, 104, 105, 33]
    );
    assert_eq!(
        encode(&Bin(&[0, 255])).unwrap(),
        [131, 109, 0, 0, 0, 2, 0, 255]
    );
}

#[test]
fn bools_and_options_follow_the_atom_convention() {
    assert_eq!(
        encode(&true).unwrap(),
        [131, 119, 4, 116, 114, 117, 101]
    );
    assert_eq!(
        encode(&false).unwrap(),
        [131, 119, 5, 102, 97, 108, 115, 101]
    );
    assert_eq!(
        encode(&None::<i32>).unwrap(),
        [131, 119, 3, 110, 105, 108]
    );
    assert_eq!(encode(&Some(5i32)).unwrap(), [131, 97, 5]);

    assert_eq!(decode(&encode(&true).unwrap()).unwrap().as_bool(), Some(true));
    assert!(decode(&encode(&None::<i32>).unwrap()).unwrap().is_nil());
}

#[test]
fn rust_tuples_encode_as_small_tuples() {
    assert_eq!(
        encode(&(A("ok"), 1u8)).unwrap(),
        [131, 104, 2, 119, 2, 111, 107, 97, 1]
    );
}

#[test]
fn rust_maps_encode_as_map_ext() {
    let mut map = BTreeMap::new();
    map.insert("a", 1u8);
    map.insert("b", 2u8);
    assert_eq!(
        encode(&map).unwrap(),
        [
            131, 116, 0, 0, 0, 2, //
            109, 0, 0, 0, 1, 97, 97, 1, //
            109, 0, 0, 0, 1, 98, 97, 2,
        ]
    );
}

#[test]
fn byte_lists_re_encode_as_plain_lists() {
    let term = decode(&[131, 107, 0, 2, 1, 2]).unwrap();
    assert_eq!(term, Term::ByteList(vec![1, 2]));
    let encoded = encode(&term).unwrap();
    assert_eq!(encoded, [131, 108, 0, 0, 0, 2, 97, 1, 97, 2, 106]);
    assert_eq!(
        decode(&encoded).unwrap(),
        Term::List(vec![Term::int(1), Term::int(2)])
    );
}

#[test]
fn round_trips() {
    init_logger();

    let terms = vec![
        Term::int(0),
        Term::int(255),
        Term::int(-1),
        Term::int(123456789123456789i64),
        Term::Integer(Integer::Big(BigInt::from(1) << 80)),
        Term::Integer(Integer::Big(-(BigInt::from(1) << 80))),
        Term::Float(Float(1.23456789)),
        Term::Float(Float(-0.0)),
        Term::Float(Float(f64::NAN)),
        Term::atom("gateway"),
        Term::Binary(vec![0, 1, 2, 255]),
        Term::List(vec![]),
        Term::List(vec![Term::int(1), Term::atom("two")]),
        Term::Tuple(vec![
            Term::atom("ok"),
            Term::List(vec![Term::int(1)]),
            Term::Map(vec![(Term::int(1), Term::int(2))]),
        ]),
        Term::Map(vec![
            (Term::atom("op"), Term::int(10)),
            (Term::Binary(b"d".to_vec()), Term::List(vec![])),
        ]),
    ];

    for term in terms {
        let encoded = encode(&term).unwrap();
        assert_eq!(encoded[0], 131);
        assert_eq!(decode(&encoded).unwrap(), term, "term {}", term);
    }
}
