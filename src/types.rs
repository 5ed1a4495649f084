// This is a part of mojicode, adapted from rust-encoding.
// Copyright (c) 2013-2014, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! Core data types shared by every codec: the encoding identifier, the
//! lossy/lossless conversion outcome, the line-terminator catalog, and the
//! `Codec` trait every encoding implements.

use std::borrow::Cow;

/// First code point of the error-binary escape range.
///
/// A unit in `ERROR_BINARY_BASE..=ERROR_BINARY_BASE + 0xFF` is never produced
/// by a legitimate decode; it exclusively carries a single raw byte that a
/// decoder could not interpret, so that re-encoding can restore it exactly.
pub const ERROR_BINARY_BASE: u16 = 0xDC00;

/// Returns the raw byte carried by an error-binary escape unit, if `unit`
/// falls in the reserved range.
#[inline]
pub fn error_binary_byte(unit: u16) -> Option<u8> {
    if (ERROR_BINARY_BASE..=ERROR_BINARY_BASE + 0xFF).contains(&unit) {
        Some((unit - ERROR_BINARY_BASE) as u8)
    } else {
        None
    }
}

/// Builds the error-binary escape unit for a raw undecodable byte.
#[inline]
pub fn error_binary_escape(byte: u8) -> u16 {
    ERROR_BINARY_BASE + byte as u16
}

/// A closed catalog of the byte encodings this crate converts to and from.
///
/// `Latin1` is kept distinct from `WindowsCodePage` even though code page
/// 28591 is ISO-8859-1, so that Latin-1's total (never-lossy-on-decode)
/// mapping is not accidentally routed through the lossier generic code-page
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingId {
    ShiftJis,
    Jis,
    EucJp,
    Unicode16Le,
    Unicode16Be,
    Unicode32Le,
    Unicode32Be,
    Utf8,
    Utf7,
    Cesu8,
    Latin1,
    WindowsCodePage(u16),
}

impl EncodingId {
    /// A short, stable, lowercase name. Not normative, but unique across the
    /// built-in encodings and useful for diagnostics and test assertions.
    pub fn name(&self) -> Cow<'static, str> {
        match *self {
            EncodingId::ShiftJis => "shift-jis".into(),
            EncodingId::Jis => "iso-2022-jp".into(),
            EncodingId::EucJp => "euc-jp".into(),
            EncodingId::Unicode16Le => "utf-16le".into(),
            EncodingId::Unicode16Be => "utf-16be".into(),
            EncodingId::Unicode32Le => "utf-32le".into(),
            EncodingId::Unicode32Be => "utf-32be".into(),
            EncodingId::Utf8 => "utf-8".into(),
            EncodingId::Utf7 => "utf-7".into(),
            EncodingId::Cesu8 => "cesu-8".into(),
            EncodingId::Latin1 => "iso-8859-1".into(),
            EncodingId::WindowsCodePage(cp) => format!("windows-{cp}").into(),
        }
    }
}

/// The success/lossy flag returned with every conversion.
///
/// `LostSome` is sticky: once any sub-sequence fails to convert faithfully,
/// folding further per-character outcomes can never bring a result back to
/// `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    LostSome,
}

impl Outcome {
    #[inline]
    pub fn is_lossy(self) -> bool {
        matches!(self, Outcome::LostSome)
    }

    /// Folds another outcome in; `LostSome` dominates.
    #[inline]
    pub fn merge(self, other: Outcome) -> Outcome {
        if self.is_lossy() || other.is_lossy() {
            Outcome::LostSome
        } else {
            Outcome::Ok
        }
    }
}

impl std::ops::BitOr for Outcome {
    type Output = Outcome;
    #[inline]
    fn bitor(self, rhs: Outcome) -> Outcome {
        self.merge(rhs)
    }
}

impl std::ops::BitOrAssign for Outcome {
    #[inline]
    fn bitor_assign(&mut self, rhs: Outcome) {
        *self = self.merge(rhs);
    }
}

impl Default for Outcome {
    fn default() -> Outcome {
        Outcome::Ok
    }
}

/// The recognized line-terminator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolKind {
    None,
    CrLf,
    Lf,
    Cr,
    Nel,
    Ls,
    Ps,
}

/// Display-hex formatting configuration (§4.11 of the design).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayHexConfig {
    pub show_codepoint_in_sjis: bool,
    pub show_codepoint_in_jis: bool,
    pub show_codepoint_in_euc: bool,
    pub show_codepoint_in_utf8: bool,
    pub show_codepoint_for_supplementary: bool,
}

/// Uniform contract every codec implements.
///
/// Object-safe by construction: every method borrows `&self` and takes or
/// returns owned buffers or slices, so `Box<dyn Codec>` works exactly like
/// the teacher's `Box<dyn Encoding>`.
pub trait Codec: Send + Sync {
    /// The canonical name of this codec, for diagnostics only.
    fn name(&self) -> &'static str;

    /// Decodes a byte buffer into a Unicode unit sequence. Never panics;
    /// undecodable sub-sequences are represented per the codec's
    /// error-binary policy and the outcome is set to `LostSome`.
    fn decode(&self, bytes: &[u8]) -> (Vec<u16>, Outcome);

    /// Encodes a Unicode unit sequence into a byte buffer. Error-binary
    /// units are restored to their original byte if and only if this codec
    /// honors the convention (see `honors_error_binary`); otherwise they
    /// are replaced with `?` and the outcome becomes `LostSome`.
    fn encode(&self, units: &[u16]) -> (Vec<u8>, Outcome);

    /// Whether this codec round-trips error-binary escape units back to
    /// their original byte on encode. `false` for ISO-2022-JP and UTF-7.
    fn honors_error_binary(&self) -> bool {
        true
    }

    /// The byte-order mark this codec prepends, if any.
    fn bom(&self) -> Option<&'static [u8]> {
        None
    }

    /// The encoded form of a line-terminator kind in this encoding.
    fn eol(&self, kind: EolKind) -> Option<&'static [u8]>;

    /// Renders a caret-adjacent Unicode slice as a short hex label.
    fn display_hex(&self, units: &[u16], config: DisplayHexConfig) -> String;
}
