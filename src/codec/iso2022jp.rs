// This is a part of mojicode, adapted from rust-encoding.
//! ISO-2022-JP, a stateful 7-bit encoding keyed on the escape-sequence state
//! machine from the original `stateful_decoder!` definition (`ISO2022JPState`:
//! `ASCII`/`Katakana`/`Lead`, `EscapeStart`/`EscapeMiddle24`/`EscapeMiddle28`).
//!
//! JIS X 0208 pair lookup is delegated to `encoding_rs`'s `EUC_JP` table: the
//! ISO-2022-JP 7-bit form and the EUC-JP 8-bit form of JIS X 0208 are the
//! same 94x94 grid, differing only in whether bit 7 of each byte is set.
//! JIS X 0212 (`ESC $ ( D`) is not supported, matching the distilled spec.
//!
//! Does not honor the error-binary convention: an undecodable byte becomes
//! an error-binary escape on decode same as any other codec, but on encode
//! that escape unit is not a valid Unicode scalar value, so it falls
//! through the normal "unrepresentable" path to `?` without any special
//! casing here.

use encoding_rs::EUC_JP;

use crate::types::{error_binary_escape, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{decode_surrogate_pair, display_hex_wide, encode_surrogate_pair, encoding_rs_encode_one};

#[derive(Debug, Clone, Copy)]
pub struct Iso2022JpCodec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ascii,
    Katakana,
    Jis0208,
}

impl Codec for Iso2022JpCodec {
    fn name(&self) -> &'static str {
        "iso-2022-jp"
    }

    fn honors_error_binary(&self) -> bool {
        false
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        let mut out = Vec::with_capacity(bytes.len());
        let mut outcome = Outcome::Ok;
        let mut state = State::Ascii;
        let mut i = 0;
        let len = bytes.len();

        while i < len {
            let b = bytes[i];
            if b == 0x1b {
                match parse_escape(&bytes[i..]) {
                    Some((new_state, consumed)) => {
                        state = new_state;
                        i += consumed;
                    }
                    None => {
                        let consumed = escape_error_width(&bytes[i..]);
                        for &e in &bytes[i..i + consumed] {
                            out.push(error_binary_escape(e));
                        }
                        outcome = Outcome::LostSome;
                        i += consumed;
                    }
                }
                continue;
            }

            match state {
                State::Ascii => {
                    if b < 0x80 {
                        out.push(b as u16);
                    } else {
                        out.push(error_binary_escape(b));
                        outcome = Outcome::LostSome;
                    }
                    i += 1;
                }
                State::Katakana => {
                    if (0x21..=0x5f).contains(&b) {
                        out.push(0xff61 + (b as u16 - 0x21));
                    } else if is_passthrough_control(b) {
                        out.push(b as u16);
                    } else {
                        out.push(error_binary_escape(b));
                        outcome = Outcome::LostSome;
                    }
                    i += 1;
                }
                State::Jis0208 => {
                    if b == 0x0a || b == 0x0d {
                        // A bare LF/CR implicitly returns the stream to ASCII.
                        out.push(b as u16);
                        state = State::Ascii;
                        i += 1;
                        continue;
                    }
                    if is_passthrough_control(b) {
                        out.push(b as u16);
                        i += 1;
                        continue;
                    }
                    if !(0x21..=0x7e).contains(&b) {
                        out.push(error_binary_escape(b));
                        outcome = Outcome::LostSome;
                        i += 1;
                        continue;
                    }
                    if i + 1 >= len {
                        out.push(error_binary_escape(b));
                        outcome = Outcome::LostSome;
                        i += 1;
                        continue;
                    }
                    let trail = bytes[i + 1];
                    match jis_forward(b, trail) {
                        Some(c) => {
                            push_char(&mut out, c);
                            i += 2;
                        }
                        None => {
                            out.push(error_binary_escape(b));
                            outcome = Outcome::LostSome;
                            if (0x21..=0x7e).contains(&trail) {
                                out.push(error_binary_escape(trail));
                                i += 2;
                            } else {
                                i += 1;
                            }
                        }
                    }
                }
            }
        }
        (out, outcome)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len());
        let mut outcome = Outcome::Ok;
        let mut state = State::Ascii;
        let mut i = 0;
        while i < units.len() {
            let u = units[i];
            if u < 0x80 {
                ensure(&mut out, &mut state, State::Ascii);
                out.push(u as u8);
                i += 1;
                continue;
            }
            if (0xff61..=0xff9f).contains(&u) {
                ensure(&mut out, &mut state, State::Katakana);
                out.push((u - 0xff61 + 0x21) as u8);
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
            match jis_backward(c) {
                Some((lead, trail)) => {
                    ensure(&mut out, &mut state, State::Jis0208);
                    out.push(lead);
                    out.push(trail);
                }
                None => {
                    out.push(b'?');
                    outcome = Outcome::LostSome;
                }
            }
            i += consumed;
        }
        ensure(&mut out, &mut state, State::Ascii);
        (out, outcome)
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        match kind {
            EolKind::None => Some(b""),
            EolKind::CrLf => Some(b"\r\n"),
            EolKind::Lf => Some(b"\n"),
            EolKind::Cr => Some(b"\r"),
            EolKind::Nel | EolKind::Ls | EolKind::Ps => None,
        }
    }

    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String {
        display_hex_wide(
            units,
            config.show_codepoint_in_jis,
            config.show_codepoint_for_supplementary,
            |c| jis_backward(c).map(|(l, t)| vec![l, t]),
        )
    }
}

/// `HT`, `BS`, `FF`, `VT` round-trip as-is regardless of G0 state, without
/// resetting it back to ASCII the way a bare `LF`/`CR` does.
fn is_passthrough_control(b: u8) -> bool {
    matches!(b, 0x08 | 0x09 | 0x0b | 0x0c)
}

fn ensure(out: &mut Vec<u8>, state: &mut State, want: State) {
    if *state == want {
        return;
    }
    match want {
        State::Ascii => out.extend_from_slice(b"\x1b(B"),
        State::Katakana => out.extend_from_slice(b"\x1b(I"),
        State::Jis0208 => out.extend_from_slice(b"\x1b$B"),
    }
    *state = want;
}

/// Parses an escape sequence starting at `bytes[0] == 0x1b`. Returns the new
/// state and the number of bytes consumed, or `None` if the sequence is not
/// one of the recognized transitions.
fn parse_escape(bytes: &[u8]) -> Option<(State, usize)> {
    let b1 = *bytes.get(1)?;
    match b1 {
        0x28 => match *bytes.get(2)? {
            0x42 | 0x4a => Some((State::Ascii, 3)),
            0x49 => Some((State::Katakana, 3)),
            _ => None,
        },
        0x24 => match *bytes.get(2)? {
            0x40 | 0x42 => Some((State::Jis0208, 3)),
            _ => None, // ESC $ ( D (JIS X 0212) is a recognized but unsupported extension.
        },
        _ => None,
    }
}

/// How many bytes an unrecognized escape consumes as error-binary, so decode
/// can resynchronize past it without re-reading the `ESC` byte forever.
fn escape_error_width(bytes: &[u8]) -> usize {
    match bytes.get(1) {
        Some(0x28) | Some(0x24) => bytes.len().min(3),
        Some(_) => 2,
        None => 1,
    }
}

fn jis_forward(lead: u8, trail: u8) -> Option<char> {
    crate::util::encoding_rs_lookup_exact(EUC_JP, &[lead | 0x80, trail | 0x80])
}

fn jis_backward(c: char) -> Option<(u8, u8)> {
    let bytes = encoding_rs_encode_one(EUC_JP, c)?;
    if bytes.len() == 2 && bytes[0] >= 0xa1 && bytes[1] >= 0xa1 {
        Some((bytes[0] & 0x7f, bytes[1] & 0x7f))
    } else {
        None
    }
}

fn decode_one_char(units: &[u16], i: usize) -> Option<(char, usize)> {
    let u = units[i];
    if (0xd800..=0xdbff).contains(&u) {
        let lo = *units.get(i + 1)?;
        let cp = decode_surrogate_pair(u, lo)?;
        Some((char::from_u32(cp)?, 2))
    } else {
        Some((char::from_u32(u as u32)?, 1))
    }
}

fn push_char(out: &mut Vec<u16>, c: char) {
    let cp = c as u32;
    if cp >= 0x10000 {
        let (hi, lo) = encode_surrogate_pair(cp);
        out.push(hi);
        out.push(lo);
    } else {
        out.push(cp as u16);
    }
}
