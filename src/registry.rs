// This is a part of mojicode, adapted from rust-encoding.
//! The `EncodingId -> Box<dyn Codec>` factory.
//!
//! Grounded in `CCodeFactory::CreateCodeBase`: a single switch from a closed
//! encoding identifier to a freshly constructed codec object, returning an
//! explicit absent value for anything unrecognized rather than panicking or
//! falling back to a default.

use crate::codec::cesu8::Cesu8Codec;
use crate::codec::codepage::CodePageCodec;
use crate::codec::euc_jp::EucJpCodec;
use crate::codec::iso2022jp::Iso2022JpCodec;
use crate::codec::latin1::Latin1Codec;
use crate::codec::shift_jis::ShiftJisCodec;
use crate::codec::utf16::Utf16Codec;
use crate::codec::utf32::Utf32Codec;
use crate::codec::utf7::Utf7Codec;
use crate::codec::utf8::Utf8Codec;
use crate::types::{Codec, EncodingId};

/// Builds the codec for `id`, or `None` if `id` names an encoding this crate
/// does not recognize (only possible for `EncodingId::WindowsCodePage` with
/// an unmapped number). Callers are expected to have already filtered `id`
/// against a known-good set (a label lookup, a user-facing encoding picker);
/// reaching an unmapped code page here is flagged in debug builds, matching
/// the `assert_warning` convention the factory this is grounded on uses for
/// an identifier outside its recognized set.
pub fn create(id: EncodingId) -> Option<Box<dyn Codec>> {
    let codec: Option<Box<dyn Codec>> = match id {
        EncodingId::ShiftJis => Some(Box::new(ShiftJisCodec)),
        EncodingId::Jis => Some(Box::new(Iso2022JpCodec)),
        EncodingId::EucJp => Some(Box::new(EucJpCodec)),
        EncodingId::Unicode16Le => Some(Box::new(Utf16Codec::LE)),
        EncodingId::Unicode16Be => Some(Box::new(Utf16Codec::BE)),
        EncodingId::Unicode32Le => Some(Box::new(Utf32Codec::LE)),
        EncodingId::Unicode32Be => Some(Box::new(Utf32Codec::BE)),
        EncodingId::Utf8 => Some(Box::new(Utf8Codec)),
        EncodingId::Utf7 => Some(Box::new(Utf7Codec)),
        EncodingId::Cesu8 => Some(Box::new(Cesu8Codec)),
        EncodingId::Latin1 => Some(Box::new(Latin1Codec)),
        EncodingId::WindowsCodePage(cp) => {
            CodePageCodec::for_code_page(cp).map(|c| Box::new(c) as Box<dyn Codec>)
        }
    };
    debug_assert!(codec.is_some(), "unrecognized encoding: {}", id.name());
    codec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fixed_encoding_constructs() {
        let ids = [
            EncodingId::ShiftJis,
            EncodingId::Jis,
            EncodingId::EucJp,
            EncodingId::Unicode16Le,
            EncodingId::Unicode16Be,
            EncodingId::Unicode32Le,
            EncodingId::Unicode32Be,
            EncodingId::Utf8,
            EncodingId::Utf7,
            EncodingId::Cesu8,
            EncodingId::Latin1,
        ];
        for id in ids {
            assert!(create(id).is_some(), "{id:?} should construct");
        }
    }

    #[test]
    fn known_code_page_constructs() {
        assert!(create(EncodingId::WindowsCodePage(932)).is_some());
    }

    #[test]
    #[should_panic(expected = "unrecognized encoding")]
    fn unknown_code_page_trips_the_debug_assert() {
        create(EncodingId::WindowsCodePage(1));
    }
}
