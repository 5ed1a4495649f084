// This is a part of mojicode, adapted from rust-encoding.
//! One module per encoding family, each implementing `crate::types::Codec`.

pub mod cesu8;
pub mod codepage;
pub mod euc_jp;
pub mod iso2022jp;
pub mod latin1;
pub mod shift_jis;
pub mod utf16;
pub mod utf32;
pub mod utf7;
pub mod utf8;
