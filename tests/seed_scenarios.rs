//! Concrete literal-input/literal-expected-output scenarios.

use mojicode::{bom_of, decode, encode, mime_header_decode, EncodingId, Outcome};

#[test]
fn sjis_kana_kanji_round_trip() {
    let bytes = [0xb6, 0xc5, 0x82, 0xa9, 0x82, 0xc8, 0x83, 0x4a, 0x83, 0x69, 0x8a, 0xbf, 0x8e, 0x9a];
    let (result, status) = decode(EncodingId::ShiftJis, &bytes);
    assert!(status.is_ok());
    assert_eq!(result.outcome, Outcome::Ok);
    assert_eq!(
        result.units,
        vec![0xff76, 0xff85, 0x304b, 0x306a, 0x30ab, 0x30ca, 0x6f22, 0x5b57]
    );

    let (reencoded, status) = encode(EncodingId::ShiftJis, &result.units);
    assert!(status.is_ok());
    assert_eq!(reencoded.bytes, bytes);
}

#[test]
fn sjis_unrepresentable_character_becomes_question_mark() {
    // 森鷗外
    let units = [0x68ee, 0x9dd7, 0x5916];
    let (result, status) = encode(EncodingId::ShiftJis, &units);
    assert!(status.is_ok());
    assert_eq!(result.outcome, Outcome::LostSome);
    assert_eq!(result.bytes, vec![0x90, 0x58, 0x3f, 0x8a, 0x4f]);
}

#[test]
fn iso2022jp_round_trip() {
    let bytes = [
        0x1b, 0x28, 0x49, 0x36, 0x45, 0x1b, 0x24, 0x42, 0x24, 0x2b, 0x24, 0x4a, 0x25, 0x2b, 0x25, 0x4a, 0x34, 0x41,
        0x3b, 0x7a, 0x1b, 0x28, 0x42,
    ];
    let (result, status) = decode(EncodingId::Jis, &bytes);
    assert!(status.is_ok());
    assert_eq!(result.outcome, Outcome::Ok);
    assert_eq!(
        result.units,
        vec![0xff76, 0xff85, 0x304b, 0x306a, 0x30ab, 0x30ca, 0x6f22, 0x5b57]
    );
}

#[test]
fn utf8_and_utf32le_boms() {
    assert_eq!(bom_of(EncodingId::Utf8), Some(&[0xef, 0xbb, 0xbf][..]));
    assert_eq!(bom_of(EncodingId::Unicode32Le), Some(&[0xff, 0xfe, 0x00, 0x00][..]));
}

#[test]
fn mime_header_base64_iso2022jp_matching_charset_decodes() {
    let input = b"From: =?iso-2022-jp?B?GyRCJTUlLyVpGyhC?=";
    let (decoded, out) = mime_header_decode(EncodingId::Jis, input);
    assert!(decoded);
    assert_eq!(out, b"From: \x1b$B%5%/%i\x1b(B");
}

#[test]
fn mime_header_mismatched_charset_passes_through() {
    let input = b"From: =?iso-2022-jp?B?GyRCJTUlLyVpGyhC?=";
    let (decoded, out) = mime_header_decode(EncodingId::Utf8, input);
    assert!(!decoded);
    assert_eq!(out, &input[..]);
}

#[test]
fn utf7_literal_plus_round_trip() {
    let (result, status) = decode(EncodingId::Utf7, b"C+-+-");
    assert!(status.is_ok());
    assert_eq!(result.outcome, Outcome::Ok);
    assert_eq!(result.units, "C++".encode_utf16().collect::<Vec<_>>());

    let (reencoded, status) = encode(EncodingId::Utf7, &result.units);
    assert!(status.is_ok());
    assert_eq!(reencoded.bytes, b"C+-+-");
}

#[test]
fn sjis_error_binary_escape_round_trips() {
    let (result, status) = decode(EncodingId::ShiftJis, &[0x80, 0x40]);
    assert!(status.is_ok());
    assert_eq!(result.outcome, Outcome::LostSome);
    assert_eq!(result.units, vec![0xdc80, 0x0040]);

    let (reencoded, status) = encode(EncodingId::ShiftJis, &result.units);
    assert!(status.is_ok());
    assert_eq!(reencoded.bytes, vec![0x80, 0x40]);
}
