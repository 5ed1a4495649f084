// This is a part of mojicode, adapted from rust-encoding.
//! UTF-32, little- and big-endian: 4 bytes per code point, decoded to one
//! unit (BMP) or a surrogate pair (non-BMP). Grounded in the same
//! byte-order-parametrized structure as `utf16.rs`; the teacher repo has no
//! UTF-32 codec of its own, so this module follows the UTF-16 one's shape.

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{decode_surrogate_pair, display_hex_wide, encode_surrogate_pair};

#[derive(Debug, Clone, Copy)]
pub struct Utf32Codec {
    pub big_endian: bool,
}

impl Utf32Codec {
    pub const LE: Utf32Codec = Utf32Codec { big_endian: false };
    pub const BE: Utf32Codec = Utf32Codec { big_endian: true };

    fn read_u32(&self, b: &[u8]) -> u32 {
        let arr = [b[0], b[1], b[2], b[3]];
        if self.big_endian {
            u32::from_be_bytes(arr)
        } else {
            u32::from_le_bytes(arr)
        }
    }

    fn write_u32(&self, out: &mut Vec<u8>, cp: u32) {
        if self.big_endian {
            out.extend_from_slice(&cp.to_be_bytes());
        } else {
            out.extend_from_slice(&cp.to_le_bytes());
        }
    }
}

impl Codec for Utf32Codec {
    fn name(&self) -> &'static str {
        if self.big_endian {
            "utf-32be"
        } else {
            "utf-32le"
        }
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len() / 2);
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i + 3 < bytes.len() {
            let cp = self.read_u32(&bytes[i..i + 4]);
            match char::from_u32(cp) {
                Some(c) if cp < 0x10000 => out.push(c as u16),
                Some(_) => {
                    let (hi, lo) = encode_surrogate_pair(cp);
                    out.push(hi);
                    out.push(lo);
                }
                None => {
                    for &b in &bytes[i..i + 4] {
                        out.push(error_binary_escape(b));
                    }
                    outcome = Outcome::LostSome;
                }
            }
            i += 4;
        }
        while i < bytes.len() {
            out.push(error_binary_escape(bytes[i]));
            outcome = Outcome::LostSome;
            i += 1;
        }
        (out, outcome)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len() * 4);
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < units.len() {
            let u = units[i];
            if let Some(b) = error_binary_byte(u) {
                self.write_u32(&mut out, b as u32);
                i += 1;
                continue;
            }
            if (0xd800..=0xdbff).contains(&u) {
                if let Some(&lo) = units.get(i + 1) {
                    if let Some(cp) = decode_surrogate_pair(u, lo) {
                        self.write_u32(&mut out, cp);
                        i += 2;
                        continue;
                    }
                }
                self.write_u32(&mut out, b'?' as u32);
                outcome = Outcome::LostSome;
                i += 1;
                continue;
            }
            self.write_u32(&mut out, u as u32);
            i += 1;
        }
        (out, outcome)
    }

    fn bom(&self) -> Option<&'static [u8]> {
        Some(if self.big_endian {
            &[0x00, 0x00, 0xfe, 0xff]
        } else {
            &[0xff, 0xfe, 0x00, 0x00]
        })
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        if self.big_endian {
            match kind {
                EolKind::None => Some(b""),
                EolKind::Lf => Some(&[0, 0, 0, 0x0a]),
                EolKind::Cr => Some(&[0, 0, 0, 0x0d]),
                EolKind::CrLf => Some(&[0, 0, 0, 0x0d, 0, 0, 0, 0x0a]),
                EolKind::Nel => Some(&[0, 0, 0, 0x85]),
                EolKind::Ls => Some(&[0, 0, 0x20, 0x28]),
                EolKind::Ps => Some(&[0, 0, 0x20, 0x29]),
            }
        } else {
            match kind {
                EolKind::None => Some(b""),
                EolKind::Lf => Some(&[0x0a, 0, 0, 0]),
                EolKind::Cr => Some(&[0x0d, 0, 0, 0]),
                EolKind::CrLf => Some(&[0x0d, 0, 0, 0, 0x0a, 0, 0, 0]),
                EolKind::Nel => Some(&[0x85, 0, 0, 0]),
                EolKind::Ls => Some(&[0x28, 0x20, 0, 0]),
                EolKind::Ps => Some(&[0x29, 0x20, 0, 0]),
            }
        }
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(units, false, config.show_codepoint_for_supplementary, |c| {
            let mut bytes = Vec::with_capacity(4);
            self.write_u32(&mut bytes, c as u32);
            Some(bytes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bmp_and_supplementary() {
        let (bytes, outcome) = Utf32Codec::LE.encode(&[0x3042, 0xd83d, 0xde00]);
        assert_eq!(outcome, Outcome::Ok);
        let (units, outcome2) = Utf32Codec::LE.decode(&bytes);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(units, vec![0x3042, 0xd83d, 0xde00]);
    }

    #[test]
    fn bom_values() {
        assert_eq!(Utf32Codec::LE.bom(), Some(&[0xff, 0xfe, 0x00, 0x00][..]));
        assert_eq!(Utf32Codec::BE.bom(), Some(&[0x00, 0x00, 0xfe, 0xff][..]));
    }

    #[test]
    fn truncated_tail_is_error_binary() {
        let (units, outcome) = Utf32Codec::LE.decode(&[0x41, 0x00, 0x00]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units.len(), 3);
    }
}
