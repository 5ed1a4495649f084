// This is a part of mojicode, adapted from rust-encoding.
//! ISO-8859-1 (Latin-1): an identity mapping on the low 256 code points.

use crate::types::{error_binary_byte, Codec, DisplayHexConfig, EolKind, Outcome};
use crate::util::{ascii_eol, hex_lower};

#[derive(Debug, Clone, Copy)]
pub struct Latin1Codec;

impl Codec for Latin1Codec {
    fn name(&self) -> &'static str {
        "iso-8859-1"
    }

    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome) {
        // Total mapping: every byte is a valid Latin-1 code point, so decode
        // never loses information and never needs error-binary.
        (bytes.iter().map(|&b| b as u16).collect(), Outcome::Ok)
    }

    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome) {
        let mut out = Vec::with_capacity(units.len());
        let mut outcome = Outcome::Ok;
        for &u in units {
            if let Some(b) = error_binary_byte(u) {
                out.push(b);
            } else if u < 0x100 {
                out.push(u as u8);
            } else {
                out.push(b'?');
                outcome = Outcome::LostSome;
            }
        }
        (out, outcome)
    }

    fn eol(&self, kind: EolKind) -> Option<&'static [u8]> {
        ascii_eol(kind)
    }

    fn display_hex(&self, units: &[u16], _config: DisplayHexConfig) -> String {
        if units.is_empty() {
            return String::new();
        }
        let bytes: Vec<u8> = units
            .iter()
            .map(|&u| error_binary_byte(u).unwrap_or(u as u8))
            .collect();
        hex_lower(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_total() {
        let (units, outcome) = Latin1Codec.decode(&[0x41, 0xE9, 0x00, 0xFF]);
        assert_eq!(units, vec![0x41, 0xE9, 0x00, 0xFF]);
        assert_eq!(outcome, Outcome::Ok);
    }

    #[test]
    fn encode_round_trips_low_256() {
        let (bytes, outcome) = Latin1Codec.encode(&[0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(bytes, vec![99, 97, 102, 233]);
        assert_eq!(outcome, Outcome::Ok);
    }

    #[test]
    fn encode_replaces_unrepresentable() {
        let (bytes, outcome) = Latin1Codec.encode(&[0x41, 0x3042]);
        assert_eq!(bytes, vec![0x41, b'?']);
        assert_eq!(outcome, Outcome::LostSome);
    }

    #[test]
    fn error_binary_round_trips() {
        let (units, outcome) = Latin1Codec.decode(&[0xFF]);
        assert_eq!(outcome, Outcome::Ok); // Latin-1 decode never fails
        let (bytes, _) = Latin1Codec.encode(&units);
        assert_eq!(bytes, vec![0xFF]);
    }
}
