// This is a part of mojicode.
//! UTF-7 (RFC 2152): a 7-bit-safe encoding with ASCII characters passed
//! through directly and everything else packed into modified-Base64 runs
//! opened by `+` and closed by any non-alphabet byte. Not present in the
//! teacher repo (like UTF-7/CESU-8, this is supplemented per the original
//! editor's encoding menu); written in the same per-byte state-machine
//! style as the legacy Japanese codecs.
//!
//! Does not honor the error-binary convention: an error-binary unit is
//! always replaced with `?` on encode rather than silently round-tripped
//! through an opaque Base64 run.

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{ascii_eol, display_hex_wide};

#[derive(Debug, Clone, Copy)]
pub struct Utf7Codec;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

fn alphabet_value(b: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == b).map(|i| i as u8)
}

fn is_direct(u: u16) -> bool {
    u == 0x09 || u == 0x0a || u == 0x0d || ((0x20..=0x7e).contains(&u) && u != b'+' as u16)
}

impl Codec for Utf7Codec {
    fn name(&self) -> &'static str {
        "utf-7"
    }

    fn honors_error_binary(&self) -> bool {
        false
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'+' {
                let b = bytes[i];
                if b < 0x80 {
                    out.push(b as u16);
                } else {
                    out.push(error_binary_escape(b));
                    outcome = Outcome::LostSome;
                }
                i += 1;
                continue;
            }

            // `+-` is a literal `+`.
            if bytes.get(i + 1) == Some(&b'-') {
                out.push(b'+' as u16);
                i += 2;
                continue;
            }

            i += 1; // consume the opening `+`
            let mut acc: u32 = 0;
            let mut bits: u32 = 0;
            while i < bytes.len() {
                match alphabet_value(bytes[i]) {
                    Some(v) => {
                        acc = (acc << 6) | v as u32;
                        bits += 6;
                        i += 1;
                        if bits >= 16 {
                            bits -= 16;
                            out.push(((acc >> bits) & 0xffff) as u16);
                        }
                    }
                    None => break,
                }
            }
            if i < bytes.len() && bytes[i] == b'-' {
                i += 1;
            }
        }
        (out, outcome)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len());
        let mut outcome = Outcome::Ok;
        let mut acc: u32 = 0;
        let mut bits: u32 = 0;
        let mut in_run = false;

        macro_rules! flush_run {
            () => {
                if in_run {
                    // Emit remaining bits zero-padded to a multiple of 6.
                    if bits > 0 {
                        let pad = (6 - bits % 6) % 6;
                        acc <<= pad;
                        bits += pad;
                        while bits > 0 {
                            bits -= 6;
                            out.push(ALPHABET[((acc >> bits) & 0x3f) as usize]);
                        }
                    }
                    out.push(b'-');
                    in_run = false;
                    acc = 0;
                    bits = 0;
                }
            };
        }

        for &u in units {
            if let Some(_b) = error_binary_byte(u) {
                flush_run!();
                out.push(b'?');
                outcome = Outcome::LostSome;
                continue;
            }
            if u == b'+' as u16 {
                flush_run!();
                out.extend_from_slice(b"+-");
                continue;
            }
            if is_direct(u) {
                flush_run!();
                out.push(u as u8);
                continue;
            }
            if !in_run {
                out.push(b'+');
                in_run = true;
            }
            acc = (acc << 16) | u as u32;
            bits += 16;
            while bits >= 6 {
                bits -= 6;
                out.push(ALPHABET[((acc >> bits) & 0x3f) as usize]);
            }
        }
        flush_run!();
        (out, outcome)
    }

    fn bom(&self) -> Option<&'static [u8]> {
        Some(b"+/v8-")
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        ascii_eol(kind)
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(units, false, config.show_codepoint_for_supplementary, |c| {
            let mut buf = [0u8; 4];
            Some(c.encode_utf8(&mut buf).as_bytes().to_vec())
        })
    }
}
