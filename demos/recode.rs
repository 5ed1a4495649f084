// This is a part of mojicode, adapted from rust-encoding.
// Copyright (c) 2014, Kang Seonghoon.
// See README.md and LICENSE.txt for details.

//! A small command-line recoder, renamed from the teacher's own
//! `examples/recode.rs` to avoid colliding with the read-only retrieval
//! pack's `examples/` directory. Reads stdin (or a file), decodes it from
//! `--from`, re-encodes to `--to`, and writes the result to stdout.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use mojicode::EncodingId;

fn usage() -> ! {
    eprintln!("usage: recode --from NAME --to NAME [FILE]");
    eprintln!("  NAME is one of: utf-8, utf-16le, utf-16be, utf-32le, utf-32be, utf-7,");
    eprintln!("                  cesu-8, shift-jis, euc-jp, iso-2022-jp, iso-8859-1,");
    eprintln!("                  windows-NNNN (a Windows code-page number)");
    std::process::exit(2);
}

fn parse_encoding(name: &str) -> EncodingId {
    match name.to_ascii_lowercase().as_str() {
        "utf-8" | "utf8" => EncodingId::Utf8,
        "utf-16le" => EncodingId::Unicode16Le,
        "utf-16be" => EncodingId::Unicode16Be,
        "utf-32le" => EncodingId::Unicode32Le,
        "utf-32be" => EncodingId::Unicode32Be,
        "utf-7" | "utf7" => EncodingId::Utf7,
        "cesu-8" | "cesu8" => EncodingId::Cesu8,
        "shift-jis" | "shift_jis" | "sjis" => EncodingId::ShiftJis,
        "euc-jp" => EncodingId::EucJp,
        "iso-2022-jp" => EncodingId::Jis,
        "iso-8859-1" | "latin1" => EncodingId::Latin1,
        other => match other.strip_prefix("windows-").and_then(|n| n.parse().ok()) {
            Some(cp) => EncodingId::WindowsCodePage(cp),
            None => usage(),
        },
    }
}

fn main() -> ExitCode {
    let mut from = None;
    let mut to = None;
    let mut file = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from" | "-f" => from = Some(args.next().unwrap_or_else(|| usage())),
            "--to" | "-t" => to = Some(args.next().unwrap_or_else(|| usage())),
            "-h" | "--help" => usage(),
            path => file = Some(path.to_string()),
        }
    }

    let from = parse_encoding(&from.unwrap_or_else(|| usage()));
    let to = parse_encoding(&to.unwrap_or_else(|| usage()));

    let input = match file {
        Some(path) => fs::read(&path).unwrap_or_else(|e| {
            eprintln!("recode: cannot read {path}: {e}");
            std::process::exit(1);
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).expect("failed to read stdin");
            buf
        }
    };

    let (decoded, status) = mojicode::decode(from, &input);
    if status.is_err() {
        eprintln!("recode: {status:?}");
        return ExitCode::FAILURE;
    }
    let (encoded, status) = mojicode::encode(to, &decoded.units);
    if status.is_err() {
        eprintln!("recode: {status:?}");
        return ExitCode::FAILURE;
    }

    io::stdout().write_all(&encoded.bytes).expect("failed to write stdout");
    if decoded.outcome.is_lossy() || encoded.outcome.is_lossy() {
        eprintln!("recode: conversion was lossy");
    }
    ExitCode::SUCCESS
}
