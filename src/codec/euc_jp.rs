// This is a part of mojicode, adapted from rust-encoding.
//! EUC-JP, keyed on the lead-byte dispatch from the original `EUCJPDecoder`
//! (0x8E halfwidth-kana prefix, 0xA1..=0xFE JIS X 0208 pairs); the JIS X 0208
//! table lookup itself is delegated to `encoding_rs`'s `EUC_JP` table.
//!
//! JIS X 0212 (the `0x8F` three-byte prefix) is not supported — see
//! DESIGN.md's Open Question resolution — and is always treated as an
//! undecodable lead byte.

use encoding_rs::EUC_JP;

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{ascii_eol, display_hex_wide, encoding_rs_encode_one, encoding_rs_lookup_exact};

#[derive(Debug, Clone, Copy)]
pub struct EucJpCodec;

impl Codec for EucJpCodec {
    fn name(&self) -> &'static str {
        "euc-jp"
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b < 0x80 {
                out.push(b as u16);
                i += 1;
            } else if b == 0x8e {
                // Halfwidth katakana: 0x8E + 0xA1..=0xDF.
                if i + 1 >= bytes.len() {
                    out.push(error_binary_escape(b));
                    outcome = Outcome::LostSome;
                    i += 1;
                    continue;
                }
                let trail = bytes[i + 1];
                if (0xa1..=0xdf).contains(&trail) {
                    out.push(0xff61 + (trail as u16 - 0xa1));
                    i += 2;
                } else {
                    out.push(error_binary_escape(b));
                    outcome = Outcome::LostSome;
                    i += 1;
                }
            } else if b == 0x8f {
                // JIS X 0212 is out of scope; its lead byte is unrepresentable.
                out.push(error_binary_escape(b));
                outcome = Outcome::LostSome;
                i += 1;
            } else if (0xa1..=0xfe).contains(&b) {
                if i + 1 >= bytes.len() {
                    out.push(error_binary_escape(b));
                    outcome = Outcome::LostSome;
                    i += 1;
                    continue;
                }
                let trail = bytes[i + 1];
                match encoding_rs_lookup_exact(EUC_JP, &[b, trail]) {
                    Some(c) => {
                        push_char(&mut out, c);
                        i += 2;
                    }
                    None => {
                        out.push(error_binary_escape(b));
                        outcome = Outcome::LostSome;
                        if trail >= 0x80 {
                            out.push(error_binary_escape(trail));
                            i += 2;
                        } else {
                            i += 1;
                        }
                    }
                }
            } else {
                out.push(error_binary_escape(b));
                outcome = Outcome::LostSome;
                i += 1;
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
            if u < 0x80 {
                out.push(u as u8);
                i += 1;
                continue;
            }
            if (0xff61..=0xff9f).contains(&u) {
                out.push(0x8e);
                out.push((u - 0xff61 + 0xa1) as u8);
                i += 1;
                continue;
            }
            let (c, consumed) = match decode_one_char(units, i) {
                Some(v) => v,
                None => {
                    out.push(b'?');
                    outcome = Outcome::LostSome;
                    i += 1;
                    continue;
                }
            };
            match encoding_rs_encode_one(EUC_JP, c) {
                Some(bytes) => out.extend_from_slice(&bytes),
                None => {
                    out.push(b'?');
                    outcome = Outcome::LostSome;
                }
            }
            i += consumed;
        }
        (out, outcome)
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        ascii_eol(kind)
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(
            units,
            config.show_codepoint_in_euc,
            config.show_codepoint_for_supplementary,
            |c| encoding_rs_encode_one(EUC_JP, c),
        )
    }
}

fn decode_one_char(units: &[u16], i: usize) -> Option<(char, usize)> {
    let u = units[i];
    if (0xd800..=0xdbff).contains(&u) {
        let lo = *units.get(i + 1)?;
        let cp = crate::util::decode_surrogate_pair(u, lo)?;
        Some((char::from_u32(cp)?, 2))
    } else {
        Some((char::from_u32(u as u32)?, 1))
    }
}

fn push_char(out: &mut Vec<u16>, c: char) {
    let cp = c as u32;
    if cp >= 0x10000 {
        let (hi, lo) = crate::util::encode_surrogate_pair(cp);
        out.push(hi);
        out.push(lo);
    } else {
        out.push(cp as u16);
    }
}
