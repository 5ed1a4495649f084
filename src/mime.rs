// This is a part of mojicode.
//! RFC 2047 MIME header encoded-word decoding (`=?CHARSET?ENC?TEXT?=`).
//!
//! Scans a header value for encoded words whose declared charset matches
//! the caller's target encoding, Base64- or Quoted-Printable-decodes the
//! payload, and splices the resulting *bytes* (not re-decoded text) back
//! into the output in place of the token. Tokens naming a different
//! charset, or malformed in any way, pass through unchanged.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::types::EncodingId;

/// Decodes every encoded word in `bytes` whose charset matches `target`.
/// Returns whether at least one word was decoded, and the resulting bytes.
pub fn mime_header_decode(target: EncodingId, bytes: &[u8]) -> (bool, Vec<u8>) {
    let mut out = Vec::with_capacity(bytes.len());
    let mut decoded_any = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'=' && bytes.get(i + 1) == Some(&b'?') {
            if let Some(word) = parse_encoded_word(&bytes[i..]) {
                if charset_matches(word.charset, target) {
                    if let Some(payload) = decode_payload(word.encoding, word.text) {
                        out.extend_from_slice(&payload);
                        decoded_any = true;
                        i += word.len;
                        continue;
                    }
                }
                out.extend_from_slice(&bytes[i..i + word.len]);
                i += word.len;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    (decoded_any, out)
}

struct EncodedWord<'a> {
    charset: &'a [u8],
    encoding: u8,
    text: &'a [u8],
    len: usize,
}

/// Parses `=?CHARSET?ENC?TEXT?=` starting at `input[0]`. `ENC` is expected
/// to be exactly one character (`B`/`b`/`Q`/`q`); anything else is left for
/// the caller to reject as an unsupported encoding.
fn parse_encoded_word(input: &[u8]) -> Option<EncodedWord<'_>> {
    debug_assert!(input.starts_with(b"=?"));
    let charset_start = 2;
    let charset_end = charset_start + input[charset_start..].iter().position(|&b| b == b'?')?;
    let charset = &input[charset_start..charset_end];

    let encoding = *input.get(charset_end + 1)?;
    if input.get(charset_end + 2) != Some(&b'?') {
        return None;
    }
    let text_start = charset_end + 3;

    let rel_end = find_subsequence(&input[text_start..], b"?=")?;
    let text = &input[text_start..text_start + rel_end];
    let len = text_start + rel_end + 2;
    Some(EncodedWord { charset, encoding, text, len })
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn charset_matches(charset: &[u8], target: EncodingId) -> bool {
    let want = match target {
        EncodingId::Jis => "iso-2022-jp",
        EncodingId::Utf8 => "utf-8",
        EncodingId::ShiftJis => "shift_jis",
        EncodingId::EucJp => "euc-jp",
        _ => return false,
    };
    charset.eq_ignore_ascii_case(want.as_bytes())
}

fn decode_payload(encoding: u8, text: &[u8]) -> Option<Vec<u8>> {
    match encoding {
        b'B' | b'b' => STANDARD.decode(text).ok(),
        b'Q' | b'q' => Some(decode_quoted_printable(text)),
        _ => None,
    }
}

/// RFC 2047 §4.2 quoted-printable: `_` is a literal space, `=XX` is a raw
/// byte, everything else passes through.
fn decode_quoted_printable(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' if i + 2 < input.len() => match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                (Some(h), Some(l)) => {
                    out.push((h << 4) | l);
                    i += 3;
                }
                _ => {
                    out.push(b'=');
                    i += 1;
                }
            },
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_word_matching_target_charset_is_decoded() {
        let input = b"From: =?iso-2022-jp?B?GyRCJTUlLyVpGyhC?=";
        let (decoded, out) = mime_header_decode(EncodingId::Jis, input);
        assert!(decoded);
        assert_eq!(out, b"From: \x1b$B%5%/%i\x1b(B");
    }

    #[test]
    fn mismatched_charset_passes_through_verbatim() {
        let input = b"From: =?iso-2022-jp?B?GyRCJTUlLyVpGyhC?=";
        let (decoded, out) = mime_header_decode(EncodingId::Utf8, input);
        assert!(!decoded);
        assert_eq!(out, &input[..]);
    }

    #[test]
    fn quoted_printable_word_is_decoded() {
        let input = b"Subject: =?utf-8?Q?Hello=2C_World!?=";
        let (decoded, out) = mime_header_decode(EncodingId::Utf8, input);
        assert!(decoded);
        assert_eq!(out, b"Subject: Hello, World!");
    }

    #[test]
    fn text_without_encoded_words_is_untouched() {
        let input = b"Subject: plain text";
        let (decoded, out) = mime_header_decode(EncodingId::Utf8, input);
        assert!(!decoded);
        assert_eq!(out, &input[..]);
    }
}
