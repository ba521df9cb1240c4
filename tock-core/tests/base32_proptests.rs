//! Property-based tests for the Base32 codec.

use data_encoding::BASE32;
use proptest::prelude::*;
use tock_core::{base32, secret, Error};

proptest! {
    /// Encoding then decoding returns the original bytes.
    #[test]
    fn roundtrip(bytes in proptest::collection::vec(any::<u8>(), 1..128)) {
        let encoded = base32::encode(&bytes);
        prop_assert_eq!(bytes, base32::decode(&encoded).unwrap());
    }

    /// The hand-written encoder matches the reference implementation byte for byte.
    #[test]
    fn encode_matches_reference(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(BASE32.encode(&bytes), base32::encode(&bytes));
    }

    /// Canonical padded input decodes the same way as in the reference implementation.
    #[test]
    fn decode_matches_reference(bytes in proptest::collection::vec(any::<u8>(), 1..128)) {
        let encoded = BASE32.encode(&bytes);
        prop_assert_eq!(BASE32.decode(encoded.as_bytes()).unwrap(), base32::decode(&encoded).unwrap());
    }

    /// Encoded output is always padded to full 8 character blocks.
    #[test]
    fn encode_length_multiple_of_eight(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let encoded = base32::encode(&bytes);
        prop_assert_eq!(0, encoded.len() % 8);
        prop_assert_eq!(base32::encoded_len(bytes.len()), encoded.len());
    }

    /// Decoding is case-insensitive and ignores any amount of trailing padding.
    #[test]
    fn decode_lowercase_and_padding(
        text in "[A-Z2-7]{1,64}",
        padding in 0_usize..16,
    ) {
        let expected = base32::decode(&text).unwrap();
        let lowered = format!("{}{}", text.to_lowercase(), "=".repeat(padding));
        prop_assert_eq!(expected, base32::decode(&lowered).unwrap());
    }

    /// Decoded length is `floor(5 * chars / 8)` for any valid input.
    #[test]
    fn decode_length(text in "[A-Z2-7]{1,64}") {
        prop_assert_eq!(5 * text.len() / 8, base32::decode(&text).unwrap().len());
    }

    /// Any character outside the alphabet is reported with its position.
    #[test]
    fn decode_rejects_foreign_characters(
        prefix in "[A-Z2-7]{0,16}",
        bad in "[0189!#@ ]",
        suffix in "[A-Z2-7]{0,16}",
    ) {
        let text = format!("{prefix}{bad}{suffix}");
        let result = base32::decode(&text);
        let is_invalid = matches!(
            result,
            Err(Error::InvalidEncoding { position, .. }) if position == prefix.len()
        );
        prop_assert!(is_invalid);
    }

    /// Normalized user input decodes to the same bytes as the clean form.
    #[test]
    fn normalize_then_decode(bytes in proptest::collection::vec(any::<u8>(), 1..40)) {
        let encoded = base32::encode(&bytes);
        let messy: String = encoded
            .to_lowercase()
            .chars()
            .enumerate()
            .flat_map(|(i, c)| if i % 4 == 3 { vec![c, ' '] } else { vec![c] })
            .collect();

        let normalized = secret::normalize(&messy);
        prop_assert_eq!(bytes, base32::decode(&normalized).unwrap());
    }
}

#[test]
fn roundtrip_full_groups() {
    for len in [5, 10, 15, 20] {
        let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
        let encoded = base32::encode(&bytes);
        assert!(!encoded.contains('='));
        assert_eq!(bytes, base32::decode(&encoded).unwrap());
    }
}

#[test]
fn generated_secrets_roundtrip() {
    for len in [1, 10, secret::DEFAULT_SECRET_LEN, 32, 64] {
        let text = secret::generate(len).unwrap();
        assert_eq!(len, base32::decode(&text).unwrap().len());
        assert_eq!(text, base32::encode(&base32::decode(&text).unwrap()));
    }
}
