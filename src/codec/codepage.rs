// This is a part of mojicode.
//! Generic Windows code pages: delegates entirely to one of `encoding_rs`'s
//! static tables, keyed by the Windows code-page number. Unlike Shift-JIS
//! and EUC-JP, this codec has no encoding-specific byte-range knowledge of
//! its own — lead/trail framing is unknown in general, so it is recovered
//! generically by growing a trial window until `encoding_rs` accepts it
//! (see `util::encoding_rs_decode_one`).

use encoding_rs::Encoding;

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{ascii_eol, display_hex_wide, encoding_rs_decode_one, encoding_rs_encode_one};

#[derive(Debug, Clone, Copy)]
pub struct CodePageCodec {
    pub number: u16,
    encoding: &'static Encoding,
}

impl CodePageCodec {
    /// Looks up the `encoding_rs` table for a Windows code-page number.
    /// Returns `None` for numbers this crate does not recognize, per the
    /// registry's "unknown identifier -> explicit absent value" contract.
    pub fn for_code_page(number: u16) -> Option<CodePageCodec> {
        lookup(number).map(|encoding| CodePageCodec { number, encoding })
    }
}

fn lookup(number: u16) -> Option<&'static Encoding> {
    use encoding_rs::*;
    Some(match number {
        874 => WINDOWS_874,
        932 => SHIFT_JIS,
        936 => GBK,
        949 => EUC_KR,
        950 => BIG5,
        1200 => UTF_16LE,
        1201 => UTF_16BE,
        1250 => WINDOWS_1250,
        1251 => WINDOWS_1251,
        1252 => WINDOWS_1252,
        1253 => WINDOWS_1253,
        1254 => WINDOWS_1254,
        1255 => WINDOWS_1255,
        1256 => WINDOWS_1256,
        1257 => WINDOWS_1257,
        1258 => WINDOWS_1258,
        10000 => MACINTOSH,
        10007 => X_MAC_CYRILLIC,
        20866 => KOI8_R,
        21866 => KOI8_U,
        28591 => WINDOWS_1252, // closest available table; true Latin-1 is `EncodingId::Latin1`
        28592 => ISO_8859_2,
        28593 => ISO_8859_3,
        28594 => ISO_8859_4,
        28595 => ISO_8859_5,
        28596 => ISO_8859_6,
        28597 => ISO_8859_7,
        28598 => ISO_8859_8,
        28603 => ISO_8859_13,
        28605 => ISO_8859_15,
        38598 => ISO_8859_8_I,
        50220 | 50221 | 50222 => ISO_2022_JP,
        51932 => EUC_JP,
        51949 => EUC_KR,
        54936 => GB18030,
        65001 => UTF_8,
        _ => return None,
    })
}

impl Codec for CodePageCodec {
    fn name(&self) -> &'static str {
        self.encoding.name()
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut i = 0;
        while i < bytes.len() {
            match encoding_rs_decode_one(self.encoding, &bytes[i..]) {
                Some((c, width)) => {
                    push_char(&mut out, c);
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
            let (c, consumed) = match decode_one_char(units, i) {
                Some(v) => v,
                None => {
                    out.push(b'?');
                    outcome = Outcome::LostSome;
                    i += 1;
                    continue;
                }
            };
            match encoding_rs_encode_one(self.encoding, c) {
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

    fn display_hex(&self, units: &[u16], _config: DisplayHexConfig) -> String {
        display_hex_wide(units, false, false, |c| encoding_rs_encode_one(self.encoding, c))
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
