// This is a part of mojicode, adapted from rust-encoding.
//! Shift-JIS, keyed on the lead/trail byte ranges from the original
//! `ShiftJISDecoder`/`ShiftJISEncoder` state machine; the JIS X 0208 table
//! lookup itself is delegated to `encoding_rs`'s `SHIFT_JIS` table.
//!
//! A handful of NEC-selected IBM extension characters in the 0xFA-0xFC lead
//! range have two distinct Shift-JIS byte forms that both decode to the
//! same code point, but `encoding_rs`'s encoder only reproduces one of
//! them. Decoding the other form and re-encoding would silently change the
//! bytes, so a pair is only accepted here if re-encoding its decoded
//! character reproduces the same two bytes; otherwise both bytes escape to
//! error-binary individually.

use encoding_rs::SHIFT_JIS;

use crate::types::{error_binary_byte, error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{ascii_eol, display_hex_wide, encoding_rs_encode_one, encoding_rs_lookup_exact};

#[derive(Debug, Clone, Copy)]
pub struct ShiftJisCodec;

fn is_lead_byte(b: u8) -> bool {
    matches!(b, 0x81..=0x9f | 0xe0..=0xfc)
}

impl Codec for ShiftJisCodec {
    fn name(&self) -> &'static str {
        "shift-jis"
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
            } else if (0xa1..=0xdf).contains(&b) {
                out.push(0xff61 + (b as u16 - 0xa1));
                i += 1;
            } else if is_lead_byte(b) {
                if i + 1 >= bytes.len() {
                    out.push(error_binary_escape(b));
                    outcome = Outcome::LostSome;
                    i += 1;
                    continue;
                }
                let trail = bytes[i + 1];
                match encoding_rs_lookup_exact(SHIFT_JIS, &[b, trail])
                    .filter(|&c| encoding_rs_encode_one(SHIFT_JIS, c).as_deref() == Some(&[b, trail][..]))
                {
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
            match encoding_rs_encode_one(SHIFT_JIS, c) {
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
            config.show_codepoint_in_sjis,
            config.show_codepoint_for_supplementary,
            |c| encoding_rs_encode_one(SHIFT_JIS, c),
        )
    }
}

/// Reads the code point at `units[i]`, combining a surrogate pair if present.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ascii_and_halfwidth_kana() {
        let (units, outcome) = ShiftJisCodec.decode(b"A\xa1\xdf");
        assert_eq!(units, vec![0x41, 0xff61, 0xff9f]);
        assert_eq!(outcome, Outcome::Ok);
    }

    #[test]
    fn round_trips_hiragana() {
        // "かな" in Shift-JIS.
        let bytes = [0x82, 0xa9, 0x82, 0xc8];
        let (units, outcome) = ShiftJisCodec.decode(&bytes);
        assert_eq!(outcome, Outcome::Ok);
        let (reencoded, outcome2) = ShiftJisCodec.encode(&units);
        assert_eq!(outcome2, Outcome::Ok);
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn error_binary_round_trips_lone_lead_byte() {
        let (units, outcome) = ShiftJisCodec.decode(&[0x81]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units, vec![error_binary_escape(0x81)]);
        let (bytes, _) = ShiftJisCodec.encode(&units);
        assert_eq!(bytes, vec![0x81]);
    }

    #[test]
    fn invalid_trail_byte_reprocessed() {
        // 0x81 followed by an ASCII byte is not a valid pair; only the lead
        // is escaped, the trail is re-read as plain ASCII.
        let (units, outcome) = ShiftJisCodec.decode(&[0x81, 0x20]);
        assert_eq!(outcome, Outcome::LostSome);
        assert_eq!(units, vec![error_binary_escape(0x81), 0x20]);
    }

    #[test]
    fn encode_unrepresentable_becomes_question_mark() {
        let (bytes, outcome) = ShiftJisCodec.encode(&[0x0041, 0x2603]);
        assert_eq!(bytes, vec![0x41, b'?']);
        assert_eq!(outcome, Outcome::LostSome);
    }

    #[test]
    fn nec_ibm_duplicate_pairs_never_silently_change_bytes() {
        // Across the IBM-extension lead range, a pair that decodes with
        // `Ok` must always re-encode to the exact same two bytes; it must
        // never decode-then-encode to a *different* pair (the NEC-selected
        // IBM extension duplicate-mapping gap).
        for lead in 0xfau16..=0xfc {
            for trail in 0x40u16..=0xfc {
                if trail == 0x7f {
                    continue;
                }
                let lead = lead as u8;
                let trail = trail as u8;
                let (units, outcome) = ShiftJisCodec.decode(&[lead, trail]);
                if outcome == Outcome::Ok {
                    let (reencoded, _) = ShiftJisCodec.encode(&units);
                    assert_eq!(reencoded, vec![lead, trail]);
                }
            }
        }
    }
}
