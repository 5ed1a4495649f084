//! Property-based round-trip and identity checks over the public API,
//! covering §8's invariants beyond the literal seed scenarios.

use mojicode::{decode, encode, EncodingId, Outcome};
use proptest::prelude::*;

/// Every codec honoring the error-binary convention round-trips *any* byte
/// buffer exactly: well-formed sub-sequences decode and re-encode
/// faithfully, and anything else survives as an error-binary escape.
fn error_binary_round_trip(encoding: EncodingId, bytes: &[u8]) {
    let (decoded, status) = decode(encoding, bytes);
    assert!(status.is_ok());
    let (reencoded, status) = encode(encoding, &decoded.units);
    assert!(status.is_ok());
    assert_eq!(reencoded.bytes, bytes);
}

proptest! {
    #[test]
    fn shift_jis_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::ShiftJis, &bytes);
    }

    #[test]
    fn euc_jp_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::EucJp, &bytes);
    }

    #[test]
    fn utf8_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::Utf8, &bytes);
    }

    #[test]
    fn cesu8_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::Cesu8, &bytes);
    }

    #[test]
    fn latin1_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::Latin1, &bytes);
    }

    #[test]
    fn code_page_error_binary_round_trip(bytes: Vec<u8>) {
        error_binary_round_trip(EncodingId::WindowsCodePage(1252), &bytes);
    }

    /// Latin-1's mapping is total: every byte buffer is already well-formed,
    /// so decoding never sets `LostSome`.
    #[test]
    fn latin1_decode_is_always_ok(bytes: Vec<u8>) {
        let (decoded, _) = decode(EncodingId::Latin1, &bytes);
        prop_assert_eq!(decoded.outcome, Outcome::Ok);
        prop_assert_eq!(decoded.units.len(), bytes.len());
    }

    /// ASCII bytes are identical code points and round-trip byte-for-byte in
    /// every byte-oriented codec except UTF-7/UTF-16/UTF-32/ISO-2022-JP,
    /// which don't treat a raw ASCII byte buffer as their native wire form.
    #[test]
    fn ascii_identity_across_byte_oriented_codecs(bytes in proptest::collection::vec(0x20u8..=0x7e, 0..64)) {
        for encoding in [
            EncodingId::ShiftJis,
            EncodingId::EucJp,
            EncodingId::Utf8,
            EncodingId::Cesu8,
            EncodingId::Latin1,
            EncodingId::WindowsCodePage(1252),
        ] {
            let (decoded, _) = decode(encoding, &bytes);
            prop_assert_eq!(decoded.outcome, Outcome::Ok);
            let units: Vec<u16> = bytes.iter().map(|&b| b as u16).collect();
            prop_assert_eq!(&decoded.units, &units);
            let (reencoded, _) = encode(encoding, &decoded.units);
            prop_assert_eq!(reencoded.bytes, bytes.clone());
        }
    }

    /// ASCII-only Unicode-unit sequences round-trip through every codec,
    /// including the ones whose wire form isn't itself raw ASCII bytes.
    #[test]
    fn ascii_units_round_trip_through_unicode_codecs(units in proptest::collection::vec(0x20u16..=0x7e, 0..64)) {
        for encoding in [
            EncodingId::Unicode16Le,
            EncodingId::Unicode16Be,
            EncodingId::Unicode32Le,
            EncodingId::Unicode32Be,
            EncodingId::Utf7,
            EncodingId::Jis,
        ] {
            let (encoded, status) = encode(encoding, &units);
            prop_assert!(status.is_ok());
            prop_assert_eq!(encoded.outcome, Outcome::Ok);
            let (decoded, status) = decode(encoding, &encoded.bytes);
            prop_assert!(status.is_ok());
            prop_assert_eq!(decoded.outcome, Outcome::Ok);
            prop_assert_eq!(&decoded.units, &units);
        }
    }
}
