// This is a part of mojicode.
//! UTF-8: strict RFC 3629 validation, with per-byte error-binary recovery
//! instead of the teacher's encoding-independent `str` assumption (the
//! teacher repo delegates UTF-8 to the standard library's own string type
//! and has no dedicated codec for it; this module gives it the same
//! `Codec` shape as every legacy encoding here).

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{decode_surrogate_pair, display_hex_wide, encode_surrogate_pair};

#[derive(Debug, Clone, Copy)]
pub struct Utf8Codec;

/// Decodes one RFC 3629 code point starting at `bytes[0]`.
///
/// `allow_surrogate_triplet` lets a 3-byte sequence encode a lone surrogate
/// (`U+D800..=U+DFFF`), which is ill-formed in strict UTF-8 but is exactly
/// how CESU-8 represents a non-BMP character's two halves; `allow_4byte`
/// disables the 4-byte lead-byte range entirely, since CESU-8 never emits
/// one. Returns `None` on any structural or range violation, leaving
/// recovery (how many bytes to skip as error-binary) to the caller.
pub(super) fn decode_one(
    bytes: &[u8],
    allow_surrogate_triplet: bool,
    allow_4byte: bool,
) -> Option<(u32, usize)> {
    let lead = *bytes.first()?;
    if lead < 0x80 {
        return Some((lead as u32, 1));
    }
    if (0xc2..=0xdf).contains(&lead) {
        let b1 = *bytes.get(1)?;
        if !(0x80..=0xbf).contains(&b1) {
            return None;
        }
        let cp = ((lead as u32 & 0x1f) << 6) | (b1 as u32 & 0x3f);
        return Some((cp, 2));
    }
    if (0xe0..=0xef).contains(&lead) {
        let b1 = *bytes.get(1)?;
        let b2 = *bytes.get(2)?;
        if !(0x80..=0xbf).contains(&b1) || !(0x80..=0xbf).contains(&b2) {
            return None;
        }
        let cp = ((lead as u32 & 0x0f) << 12) | ((b1 as u32 & 0x3f) << 6) | (b2 as u32 & 0x3f);
        if cp < 0x800 {
            return None; // overlong
        }
        if (0xd800..=0xdfff).contains(&cp) && !allow_surrogate_triplet {
            return None;
        }
        return Some((cp, 3));
    }
    if allow_4byte && (0xf0..=0xf4).contains(&lead) {
        let b1 = *bytes.get(1)?;
        let b2 = *bytes.get(2)?;
        let b3 = *bytes.get(3)?;
        if !(0x80..=0xbf).contains(&b1) || !(0x80..=0xbf).contains(&b2) || !(0x80..=0xbf).contains(&b3) {
            return None;
        }
        let cp = ((lead as u32 & 0x07) << 18)
            | ((b1 as u32 & 0x3f) << 12)
            | ((b2 as u32 & 0x3f) << 6)
            | (b3 as u32 & 0x3f);
        if cp < 0x10000 || cp > 0x10ffff {
            return None;
        }
        return Some((cp, 4));
    }
    None
}

impl Codec for Utf8Codec {
    fn name(&self) -> &'static str {
        "utf-8"
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < bytes.len() {
            match decode_one(&bytes[i..], false, true) {
                Some((cp, width)) => {
                    if cp >= 0x10000 {
                        let (hi, lo) = encode_surrogate_pair(cp);
                        out.push(hi);
                        out.push(lo);
                    } else {
                        out.push(cp as u16);
                    }
                    i += width;
                }
                None => {
                    out.push(error_binary_escape(bytes[i]));
                    outcome = Outcome::LostSome;
                    i += 1;
                }
            }
        }
        (out, outcome)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < units.len() {
            let u = units[i];
            if let Some(b) = error_binary_byte(u) {
                out.push(b);
                i += 1;
                continue;
            }
            if (0xd800..=0xdbff).contains(&u) {
                if let Some(&lo) = units.get(i + 1) {
                    if let Some(cp) = decode_surrogate_pair(u, lo) {
                        if let Some(c) = char::from_u32(cp) {
                            let mut buf = [0u8; 4];
                            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                            i += 2;
                            continue;
                        }
                    }
                }
                out.push(b'?');
                outcome = Outcome::LostSome;
                i += 1;
                continue;
            }
            match char::from_u32(u as u32) {
                Some(c) => {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                None => {
                    out.push(b'?');
                    outcome = Outcome::LostSome;
                }
            }
            i += 1;
        }
        (out, outcome)
    }

    fn bom(&self) -> Option<&'static [u8]> {
        Some(&[0xef, 0xbb, 0xbf])
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        match kind {
            EolKind::None => Some(b""),
            EolKind::CrLf => Some(b"\r\n"),
            EolKind::Lf => Some(b"\n"),
            EolKind::Cr => Some(b"\r"),
            EolKind::Nel => Some(&[0xc2, 0x85]),
            EolKind::Ls => Some(&[0xe2, 0x80, 0xa8]),
            EolKind::Ps => Some(&[0xe2, 0x80, 0xa9]),
        }
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(
            units,
            config.show_codepoint_in_utf8,
            config.show_codepoint_for_supplementary,
            |c| {
                let mut buf = [0u8; 4];
                Some(c.encode_utf8(&mut buf).as_bytes().to_vec())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ascii_and_bmp() {
        let bytes = "Hi, \u{65e5}\u{672c}".as_bytes();
        let (units, outcome) = Utf8Codec.decode(bytes);
        assert_eq!(outcome, Outcome::Ok);
        let (reencoded, outcome2) = Utf8Codec.encode(&units);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn round_trips_supplementary_as_surrogate_pair() {
        let s = "\u{1f600}";
        let (units, outcome) = Utf8Codec.decode(s.as_bytes());
        assert_eq!(outcome, Outcome::Ok);
        assert_eq!(units, vec![0xd83d, 0xde00]);
        let (bytes, outcome2) = Utf8Codec.encode(&units);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(bytes, s.as_bytes());
    }

    #[test]
    fn overlong_sequence_is_error_binary() {
        let (units, outcome) = Utf8Codec.decode(&[0xc0, 0x80]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units, vec![error_binary_escape(0xc0), error_binary_escape(0x80)]);
    }

    #[test]
    fn encoded_surrogate_is_ill_formed() {
        let (units, outcome) = Utf8Codec.decode(&[0xed, 0xa0, 0x80]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units.len(), 3);
    }

    #[test]
    fn truncated_sequence_escapes_each_byte() {
        let (units, outcome) = Utf8Codec.decode(&[0xe6, 0x97]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units, vec![error_binary_escape(0xe6), error_binary_escape(0x97)]);
    }
}
