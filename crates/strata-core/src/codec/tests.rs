use crate::{
    codec::{
        BoolCodec, BytesCodec, IdentityCodec, IntCodec, KeyCodec, TextCodec, bind, composite2,
        composite3, composite6,
    },
    error::{DecodeError, Error},
    slice::Slice,
};

#[test]
fn identity_passes_bytes_through_unchanged() {
    let raw = Slice::from_static(b"already-a-key");

    let encoded = IdentityCodec.encode_key(&raw).unwrap();
    assert_eq!(encoded, raw);
    assert_eq!(IdentityCodec.decode_key(&encoded).unwrap(), raw);
}

#[test]
fn bound_functions_roundtrip() {
    let codec = bind(
        |value: &u32| Ok(Slice::from(value.to_be_bytes().to_vec())),
        |encoded: &Slice| {
            let bytes: [u8; 4] =
                encoded
                    .as_bytes()
                    .try_into()
                    .map_err(|_| DecodeError::InvalidPayload {
                        element: 0,
                        context: "expected 4 bytes",
                    })?;
            Ok(u32::from_be_bytes(bytes))
        },
    );

    let encoded = codec.encode_key(&0xDEAD_BEEF).unwrap();
    assert_eq!(codec.decode_key(&encoded).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn scalar_codecs_roundtrip() {
    let encoded = IntCodec.encode_key(&-42).unwrap();
    assert_eq!(IntCodec.decode_key(&encoded).unwrap(), -42);

    let encoded = TextCodec.encode_key(&"abc".to_string()).unwrap();
    assert_eq!(TextCodec.decode_key(&encoded).unwrap(), "abc");

    let encoded = BytesCodec.encode_key(&vec![0u8, 1, 2]).unwrap();
    assert_eq!(BytesCodec.decode_key(&encoded).unwrap(), vec![0u8, 1, 2]);

    let encoded = BoolCodec.encode_key(&true).unwrap();
    assert!(BoolCodec.decode_key(&encoded).unwrap());
}

#[test]
fn scalar_codec_order_is_byte_order() {
    let low = IntCodec.encode_key(&-5).unwrap();
    let mid = IntCodec.encode_key(&0).unwrap();
    let high = IntCodec.encode_key(&5).unwrap();

    assert!(low < mid);
    assert!(mid < high);
}

#[test]
fn composite_roundtrips_and_rejects_trailing_bytes() {
    let codec = composite2(IntCodec, TextCodec);
    let value = (7i64, "users".to_string());

    let encoded = codec.encode_key(&value).unwrap();
    assert_eq!(codec.decode_key(&encoded).unwrap(), value);

    let mut extended = encoded.to_vec();
    extended.push(0xAA);
    let err = codec
        .decode_key(&Slice::from(extended))
        .expect_err("trailing bytes must fail");
    assert!(matches!(
        err,
        Error::Decode(DecodeError::TrailingBytes { remaining: 1 })
    ));
}

#[test]
fn composite_decode_error_names_the_failing_part() {
    let codec = composite3(IntCodec, TextCodec, IntCodec);
    let encoded = codec.encode_key(&(7i64, "ab".to_string(), 9i64)).unwrap();

    // Cut into the third part's payload; the error must point at it.
    let cut = encoded.len() - 4;
    let err = codec
        .decode_key(&Slice::copy_from(&encoded.as_bytes()[..cut]))
        .expect_err("truncated key must fail");
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Truncated { element: 2, .. })
    ));
}

#[test]
fn composite_head_encodes_a_byte_prefix_of_the_full_key() {
    let codec = composite3(IntCodec, TextCodec, BoolCodec);
    let full = codec.encode_key(&(3i64, "abc".to_string(), true)).unwrap();

    let two_of_three = codec.head().encode_key(&(3i64, "abc".to_string())).unwrap();
    assert!(full.starts_with(&two_of_three));

    let one_of_three = codec.head().head().encode_key(&3i64).unwrap();
    assert!(two_of_three.starts_with(&one_of_three));
}

#[test]
fn decode_prefix_returns_parts_and_remainder() {
    let pair = composite2(IntCodec, TextCodec);
    let triple = composite3(IntCodec, TextCodec, IntCodec);

    let full = triple.encode_key(&(1i64, "ab".to_string(), 99i64)).unwrap();
    let ((first, second), rest) = pair.decode_prefix(&full).unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, "ab");
    assert_eq!(IntCodec.decode_key(&rest).unwrap(), 99);
}

#[test]
fn identity_closes_a_composite_key() {
    let codec = composite2(IntCodec, IdentityCodec);
    let value = (5i64, Slice::from_static(b"raw-tail"));

    let encoded = codec.encode_key(&value).unwrap();
    assert_eq!(codec.decode_key(&encoded).unwrap(), value);
}

#[test]
fn six_part_composite_roundtrips() {
    let codec = composite6(IntCodec, TextCodec, BoolCodec, IntCodec, BytesCodec, IntCodec);
    let value = (
        1i64,
        "b".to_string(),
        false,
        -3i64,
        vec![9u8, 8],
        i64::MAX,
    );

    let encoded = codec.encode_key(&value).unwrap();
    assert_eq!(codec.decode_key(&encoded).unwrap(), value);
}

#[test]
fn oversized_encoded_key_is_rejected_before_io() {
    let codec = bind(
        |_value: &u8| Ok(Slice::from(vec![0x61; crate::MAX_KEY_BYTES + 1])),
        |_encoded: &Slice| Ok(0u8),
    );

    let err = codec.encode_key(&0).expect_err("oversized key must fail");
    assert!(matches!(err, Error::CapacityExceeded { .. }));
}

#[test]
fn wrong_element_kind_is_a_decode_error() {
    let encoded = TextCodec.encode_key(&"abc".to_string()).unwrap();
    let err = IntCodec
        .decode_key(&encoded)
        .expect_err("wrong tag must fail");
    assert!(matches!(
        err,
        Error::Decode(DecodeError::InvalidPayload { .. })
    ));
}
