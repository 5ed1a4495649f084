// This is a part of mojicode, adapted from rust-encoding.
//! UTF-16, little- and big-endian, grounded in the original
//! `UTF16LEEncoder`/`UTF16LEDecoder` pair — one struct per byte order here
//! too, sharing the surrogate arithmetic through `crate::util`.
//!
//! Unlike the teacher's decoder, which reports an error on an unpaired or
//! truncated surrogate, this crate stores the orphan bytes as error-binary
//! escapes and keeps going (§4.8 of the design).

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::display_hex_wide;

#[derive(Debug, Clone, Copy)]
pub struct Utf16Codec {
    pub big_endian: bool,
}

impl Utf16Codec {
    pub const LE: Utf16Codec = Utf16Codec { big_endian: false };
    pub const BE: Utf16Codec = Utf16Codec { big_endian: true };

    fn read_u16(&self, a: u8, b: u8) -> u16 {
        if self.big_endian {
            u16::from_be_bytes([a, b])
        } else {
            u16::from_le_bytes([a, b])
        }
    }

    fn write_u16(&self, out: &mut Vec<u8>, unit: u16) {
        if self.big_endian {
            out.extend_from_slice(&unit.to_be_bytes());
        } else {
            out.extend_from_slice(&unit.to_le_bytes());
        }
    }
}

impl Codec for Utf16Codec {
    fn name(&self) -> &'static str {
        if self.big_endian {
            "utf-16be"
        } else {
            "utf-16le"
        }
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len() / 2);
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i + 1 < bytes.len() {
            out.push(self.read_u16(bytes[i], bytes[i + 1]));
            i += 2;
        }
        if i < bytes.len() {
            // A single orphan trailing byte: no partner to form a code unit.
            out.push(error_binary_escape(bytes[i]));
            outcome = Outcome::LostSome;
        }
        (out, outcome)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len() * 2);
        let outcome = Outcome::Ok;
        for &u in units {
            if let Some(b) = error_binary_byte(u) {
                // No byte-order-aware partner exists for a raw escaped byte;
                // emit it as the low byte of a code unit so encode stays total.
                self.write_u16(&mut out, error_binary_escape(b));
                continue;
            }
            self.write_u16(&mut out, u);
        }
        (out, outcome)
    }

    fn bom(&self) -> Option<&'static [u8]> {
        Some(if self.big_endian { &[0xfe, 0xff] } else { &[0xff, 0xfe] })
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        if self.big_endian {
            match kind {
                EolKind::None => Some(b""),
                EolKind::Lf => Some(&[0x00, 0x0a]),
                EolKind::Cr => Some(&[0x00, 0x0d]),
                EolKind::CrLf => Some(&[0x00, 0x0d, 0x00, 0x0a]),
                EolKind::Nel => Some(&[0x00, 0x85]),
                EolKind::Ls => Some(&[0x20, 0x28]),
                EolKind::Ps => Some(&[0x20, 0x29]),
            }
        } else {
            match kind {
                EolKind::None => Some(b""),
                EolKind::Lf => Some(&[0x0a, 0x00]),
                EolKind::Cr => Some(&[0x0d, 0x00]),
                EolKind::CrLf => Some(&[0x0d, 0x00, 0x0a, 0x00]),
                EolKind::Nel => Some(&[0x85, 0x00]),
                EolKind::Ls => Some(&[0x28, 0x20]),
                EolKind::Ps => Some(&[0x29, 0x20]),
            }
        }
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(units, false, config.show_codepoint_for_supplementary, |c| {
            let mut buf = [0u16; 2];
            let encoded = c.encode_utf16(&mut buf);
            let mut bytes = Vec::with_capacity(encoded.len() * 2);
            for &u in encoded.iter() {
                self.write_u16(&mut bytes, u);
            }
            Some(bytes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bmp_text() {
        let (bytes, outcome) = Utf16Codec::LE.encode(&[0x3042, 0x3044]);
        assert_eq!(outcome, Outcome::Ok);
        let (units, outcome2) = Utf16Codec::LE.decode(&bytes);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(units, vec![0x3042, 0x3044]);
    }

    #[test]
    fn big_endian_byte_order() {
        let (bytes, _) = Utf16Codec::BE.encode(&[0x3042]);
        assert_eq!(bytes, vec![0x30, 0x42]);
        let (bytes_le, _) = Utf16Codec::LE.encode(&[0x3042]);
        assert_eq!(bytes_le, vec![0x42, 0x30]);
    }

    #[test]
    fn surrogate_pairs_pass_through_verbatim() {
        let (bytes, outcome) = Utf16Codec::LE.encode(&[0xd83d, 0xde00]);
        assert_eq!(outcome, Outcome::Ok);
        let (units, outcome2) = Utf16Codec::LE.decode(&bytes);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(units, vec![0xd83d, 0xde00]);
    }

    #[test]
    fn orphan_trailing_byte_is_error_binary() {
        let (units, outcome) = Utf16Codec::LE.decode(&[0x41, 0x00, 0xff]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units[1], error_binary_escape(0xff));
    }

    #[test]
    fn bom_differs_by_byte_order() {
        assert_eq!(Utf16Codec::LE.bom(), Some(&[0xff, 0xfe][..]));
        assert_eq!(Utf16Codec::BE.bom(), Some(&[0xfe, 0xff][..]));
    }
}
