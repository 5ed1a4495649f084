// This is a part of mojicode.
//! CESU-8: like UTF-8, but a non-BMP code point is two independent 3-byte
//! sequences (one per surrogate half) instead of one 4-byte sequence.
//! Reuses `utf8::decode_one`'s scanner with its surrogate-triplet allowance
//! turned on and its 4-byte range turned off.

use crate::codec::utf8::decode_one;
use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{decode_surrogate_pair, display_hex_wide};

#[derive(Debug, Clone, Copy)]
pub struct Cesu8Codec;

/// Encodes one UTF-16 code unit as its own 1-to-3-byte UTF-8-style
/// sequence, without pairing surrogates — the defining difference from
/// plain UTF-8.
fn encode_unit(unit: u16) -> Vec<u8> {
    let cp = unit as u32;
    if cp < 0x80 {
        vec![cp as u8]
    } else if cp < 0x800 {
        vec![0xc0 | (cp >> 6) as u8, 0x80 | (cp & 0x3f) as u8]
    } else {
        vec![
            0xe0 | (cp >> 12) as u8,
            0x80 | ((cp >> 6) & 0x3f) as u8,
            0x80 | (cp & 0x3f) as u8,
        ]
    }
}

impl Codec for Cesu8Codec {
    fn name(&self) -> &'static str {
        "cesu-8"
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < bytes.len() {
            match decode_one(&bytes[i..], true, false) {
                Some((cp, width)) => {
                    out.push(cp as u16);
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
        let mut out = Vec::with_capacity(units.len() * 2);
        let outcome = Outcome::Ok;
        let mut i = 0;
        while i < units.len() {
            let u = units[i];
            // A high surrogate that pairs with the next unit names a non-BMP
            // character; CESU-8 still encodes each half as its own 3-byte
            // sequence, but neither half is an error-binary escape here.
            if (0xd800..=0xdbff).contains(&u) {
                if let Some(&lo) = units.get(i + 1) {
                    if decode_surrogate_pair(u, lo).is_some() {
                        out.extend(encode_unit(u));
                        out.extend(encode_unit(lo));
                        i += 2;
                        continue;
                    }
                }
            }
            if let Some(b) = error_binary_byte(u) {
                out.push(b);
                i += 1;
                continue;
            }
            out.extend(encode_unit(u));
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
        display_hex_wide(units, false, config.show_codepoint_for_supplementary, |c| {
            let mut buf = [0u16; 2];
            let mut out = Vec::new();
            for u in c.encode_utf16(&mut buf).iter() {
                out.extend(encode_unit(*u));
            }
            Some(out)
        })
    }
}
