// This is a part of mojicode, adapted from rust-encoding.
// Copyright (c) 2013, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Internal utilities shared by several codecs.

use crate::types::{error_binary_byte, EolKind};
use encoding_rs::Encoding;

/// The ASCII byte form of a line-terminator kind, shared by every
/// ASCII-compatible single- or multi-byte codec (Shift-JIS, EUC-JP, Latin-1,
/// Windows code pages). Unicode-only kinds (`Nel`, `Ls`, `Ps`) are absent.
pub fn ascii_eol(kind: EolKind) -> Option<&'static [u8]> {
    match kind {
        EolKind::None => Some(b""),
        EolKind::CrLf => Some(b"\r\n"),
        EolKind::Lf => Some(b"\n"),
        EolKind::Cr => Some(b"\r"),
        EolKind::Nel | EolKind::Ls | EolKind::Ps => None,
    }
}

/// Combines two surrogate units into the non-BMP code point they represent,
/// or `None` if they are not a valid high/low surrogate pair.
#[inline]
pub fn decode_surrogate_pair(hi: u16, lo: u16) -> Option<u32> {
    if (0xD800..=0xDBFF).contains(&hi) && (0xDC00..=0xDFFF).contains(&lo) {
        Some(0x10000 + ((hi as u32 - 0xD800) << 10) + (lo as u32 - 0xDC00))
    } else {
        None
    }
}

/// Splits a non-BMP code point into its surrogate pair.
#[inline]
pub fn encode_surrogate_pair(cp: u32) -> (u16, u16) {
    debug_assert!(cp >= 0x10000 && cp <= 0x10FFFF);
    let v = cp - 0x10000;
    let hi = 0xD800 + (v >> 10) as u16;
    let lo = 0xDC00 + (v & 0x3FF) as u16;
    (hi, lo)
}

/// Formats a byte slice as uppercase hexadecimal with no separators, e.g.
/// `[0x82, 0xA0]` -> `"82A0"`.
pub fn hex_upper(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(s, "{b:02X}").unwrap();
    }
    s
}

/// As `hex_upper`, but lowercase; used only by Latin-1's display-hex, which
/// preserves the source's lowercase rendering for that one encoding.
pub fn hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        write!(s, "{b:02x}").unwrap();
    }
    s
}

/// Decodes exactly `bytes` as one `encoding_rs` table lookup, succeeding only
/// if the whole slice forms a single code point with no replacement.
///
/// Used for fixed-width lookups (a JIS X 0208 pair, an EUC-JP 0x8E/0x8F
/// pair) where the caller already knows the intended width from the lead
/// byte and just needs the table value.
pub fn encoding_rs_lookup_exact(enc: &'static Encoding, bytes: &[u8]) -> Option<char> {
    let (cow, had_errors) = enc.decode_without_bom_handling(bytes);
    if had_errors {
        return None;
    }
    let mut chars = cow.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Decodes one code point starting at the front of `bytes` without knowing
/// its width in advance, by growing a trial window over `encoding_rs`'s
/// whole-buffer API until a width decodes cleanly to exactly one character.
///
/// Because `decode_without_bom_handling` treats the slice it is given as a
/// complete, final buffer, a truncated multi-byte sequence is reported as
/// malformed rather than silently accepted — so the shortest width that
/// decodes without error is the correct one. Returns the decoded character
/// and the number of bytes it consumed, or `None` if no width up to 4 bytes
/// decodes cleanly (the caller should then fall back to error-binary on a
/// single byte).
pub fn encoding_rs_decode_one(enc: &'static Encoding, bytes: &[u8]) -> Option<(char, usize)> {
    let max_width = bytes.len().min(4);
    for width in 1..=max_width {
        if let Some(c) = encoding_rs_lookup_exact(enc, &bytes[..width]) {
            return Some((c, width));
        }
    }
    None
}

/// Encodes a single character with `encoding_rs`, succeeding only if it has
/// an exact pre-image (no `?` / numeric-character-reference substitution).
pub fn encoding_rs_encode_one(enc: &'static Encoding, ch: char) -> Option<Vec<u8>> {
    let mut buf = [0u8; 4];
    let s = ch.encode_utf8(&mut buf);
    let (cow, _, had_errors) = enc.encode(s);
    if had_errors {
        None
    } else {
        Some(cow.into_owned())
    }
}

/// Shared display-hex formatter for every codec whose native form is wider
/// than one byte (Shift-JIS, EUC-JP, ISO-2022-JP, UTF-8). Latin-1's mapping
/// is total and always one byte wide, so it formats itself directly instead
/// of going through here.
///
/// `native_bytes` re-encodes a single BMP character into this codec's native
/// byte form; it is only consulted when `show_codepoint` is false.
pub fn display_hex_wide(
    units: &[u16],
    show_codepoint: bool,
    show_supplementary: bool,
    native_bytes: impl Fn(char) -> Option<Vec<u8>>,
) -> String {
    if units.is_empty() {
        return String::new();
    }

    // A trailing variation selector is itself a surrogate pair decoding into
    // U+E0100..=U+E01EF; split it off and format the base separately.
    if units.len() >= 4 {
        let n = units.len();
        if let Some(vs_cp) = decode_surrogate_pair(units[n - 2], units[n - 1]) {
            if (0xE0100..=0xE01EF).contains(&vs_cp) {
                let base = format_one(&units[..n - 2], show_codepoint, show_supplementary, &native_bytes);
                let vs = if show_supplementary {
                    format!("U+{vs_cp:05X}")
                } else {
                    hex_upper(&units_be_bytes(&units[n - 2..]))
                };
                return format!("{base}, {vs}");
            }
        }
    }

    format_one(units, show_codepoint, show_supplementary, &native_bytes)
}

fn units_be_bytes(units: &[u16]) -> Vec<u8> {
    units.iter().flat_map(|u| u.to_be_bytes()).collect()
}

fn format_one(
    units: &[u16],
    show_codepoint: bool,
    show_supplementary: bool,
    native_bytes: &impl Fn(char) -> Option<Vec<u8>>,
) -> String {
    if units.len() == 1 {
        if let Some(b) = error_binary_byte(units[0]) {
            return format!("?{b:02X}");
        }
        if show_codepoint {
            return format!("U+{:04X}", units[0]);
        }
        if let Some(c) = char::from_u32(units[0] as u32) {
            if let Some(bytes) = native_bytes(c) {
                return hex_upper(&bytes);
            }
        }
        return format!("U+{:04X}", units[0]);
    }
    if units.len() == 2 {
        if let Some(cp) = decode_surrogate_pair(units[0], units[1]) {
            if show_supplementary {
                return format!("U+{cp:05X}");
            }
            if let Some(bytes) = char::from_u32(cp).and_then(&native_bytes) {
                return hex_upper(&bytes);
            }
            return hex_upper(&units_be_bytes(units));
        }
    }
    hex_upper(&units_be_bytes(units))
}
