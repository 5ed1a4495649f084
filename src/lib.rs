// This is a part of mojicode, adapted from rust-encoding.
// Copyright (c) 2013-2014, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

/*!

# mojicode

Character encoding conversion for a Japanese-aware text editor.

Every supported encoding is reached through [`EncodingId`] and the six
functions below; nothing downstream needs to know which `Codec`
implementation backs a given identifier.

```
use mojicode::{decode, encode, EncodingId, Outcome};

let (result, _) = decode(EncodingId::ShiftJis, &[0x82, 0xa0]); // "あ"
assert_eq!(result.outcome, Outcome::Ok);
assert_eq!(result.units, vec![0x3042]);

let (back, _) = encode(EncodingId::ShiftJis, &result.units);
assert_eq!(back.bytes, vec![0x82, 0xa0]);
```

Undecodable bytes are never dropped silently: a decoder that cannot
interpret a byte escapes it into the reserved low-surrogate range
`U+DC00..=U+DCFF` (see [`types::error_binary_byte`] /
[`types::error_binary_escape`]), and an encoder that honors the
convention (`Codec::honors_error_binary`) restores that exact byte on
the way back out. ISO-2022-JP and UTF-7 do not honor it, since neither
has a notion of a single undecodable byte that survives their escape
grammar; encoding an error-binary unit through either falls back to
`?` and [`Outcome::LostSome`].

*/

pub mod codec;
pub mod mime;
pub mod registry;
pub mod types;
mod util;

pub use types::{DisplayHexConfig, EncodingId, EolKind, Outcome};

/// The result of a single [`decode`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub outcome: Outcome,
    /// Number of input bytes consumed (always `bytes.len()`; decoding never
    /// stops partway through, even on error).
    pub source_len: usize,
    pub units: Vec<u16>,
}

/// The result of a single [`encode`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeResult {
    pub outcome: Outcome,
    /// Number of input units consumed (always `units.len()`).
    pub source_len: usize,
    pub bytes: Vec<u8>,
}

/// Decodes `bytes` from `encoding` into UTF-16 code units.
///
/// `Err` is reserved for an `encoding` this crate does not recognize (an
/// unmapped `EncodingId::WindowsCodePage` number); reaching it at all trips
/// [`registry::create`]'s debug assertion, since a well-behaved caller is
/// expected to have already filtered `encoding` against a known-good set.
pub fn decode(encoding: EncodingId, bytes: &[u8]) -> (DecodeResult, Result<(), UnknownEncoding>) {
    match registry::create(encoding) {
        Some(codec) => {
            let (units, outcome) = codec.decode(bytes);
            (
                DecodeResult { outcome, source_len: bytes.len(), units },
                Ok(()),
            )
        }
        None => (
            DecodeResult { outcome: Outcome::LostSome, source_len: 0, units: Vec::new() },
            Err(UnknownEncoding(encoding)),
        ),
    }
}

/// Encodes `units` into bytes in `encoding`.
pub fn encode(encoding: EncodingId, units: &[u16]) -> (EncodeResult, Result<(), UnknownEncoding>) {
    match registry::create(encoding) {
        Some(codec) => {
            let (bytes, outcome) = codec.encode(units);
            (
                EncodeResult { outcome, source_len: units.len(), bytes },
                Ok(()),
            )
        }
        None => (
            EncodeResult { outcome: Outcome::LostSome, source_len: 0, bytes: Vec::new() },
            Err(UnknownEncoding(encoding)),
        ),
    }
}

/// The byte-order mark `encoding` prepends to its output, if any.
pub fn bom_of(encoding: EncodingId) -> Option<&'static [u8]> {
    registry::create(encoding).and_then(|codec| codec.bom())
}

/// The encoded form of a line-terminator `kind` in `encoding`.
pub fn eol_of(encoding: EncodingId, kind: EolKind) -> Option<&'static [u8]> {
    registry::create(encoding).and_then(|codec| codec.eol(kind))
}

/// Decodes every RFC 2047 encoded word in `bytes` whose declared charset
/// matches `encoding`, splicing the raw decoded bytes back into the output
/// in place of the token. See [`mime::mime_header_decode`] for the exact
/// charset-matching rules.
pub fn mime_header_decode(encoding: EncodingId, bytes: &[u8]) -> (bool, Vec<u8>) {
    mime::mime_header_decode(encoding, bytes)
}

/// Renders `units` as a short hex label in `encoding`'s native byte form,
/// per `config`.
pub fn display_hex(encoding: EncodingId, units: &[u16], config: DisplayHexConfig) -> Option<String> {
    registry::create(encoding).map(|codec| codec.display_hex(units, config))
}

/// `encoding` named an `EncodingId::WindowsCodePage` number this crate does
/// not map to a real code page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownEncoding(pub EncodingId);

impl std::fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized encoding: {}", self.0.name())
    }
}

impl std::error::Error for UnknownEncoding {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_then_encode_round_trips_shift_jis() {
        let (decoded, ok) = decode(EncodingId::ShiftJis, &[0x82, 0xa0, 0x82, 0xa2]);
        assert!(ok.is_ok());
        assert_eq!(decoded.outcome, Outcome::Ok);
        assert_eq!(decoded.units, vec![0x3042, 0x3044]);

        let (encoded, ok) = encode(EncodingId::ShiftJis, &decoded.units);
        assert!(ok.is_ok());
        assert_eq!(encoded.bytes, vec![0x82, 0xa0, 0x82, 0xa2]);
    }

    #[test]
    #[should_panic(expected = "unrecognized encoding")]
    fn unknown_code_page_trips_the_debug_assert() {
        decode(EncodingId::WindowsCodePage(1), b"x");
    }

    #[test]
    fn bom_and_eol_delegate_to_codec() {
        assert_eq!(bom_of(EncodingId::Utf8), Some(&[0xef, 0xbb, 0xbf][..]));
        assert_eq!(bom_of(EncodingId::ShiftJis), None);
        assert_eq!(eol_of(EncodingId::Utf8, EolKind::CrLf), Some(&b"\r\n"[..]));
    }

    #[test]
    fn mime_header_decode_delegates_to_mime_module() {
        let (decoded, out) = mime_header_decode(EncodingId::Utf8, b"=?utf-8?Q?Hi?=");
        assert!(decoded);
        assert_eq!(out, b"Hi");
    }

    #[test]
    fn display_hex_delegates_to_codec() {
        let config = DisplayHexConfig::default();
        let rendered = display_hex(EncodingId::ShiftJis, &[0x3042], config).unwrap();
        assert_eq!(rendered, "82A0");
    }
}
