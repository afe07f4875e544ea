//! Parser for code-definition files.
//!
//! ```text
//! # [[5,1,3]]
//! name: five-qubit
//! distance: 3
//! errors: XYZ
//! strategy: joint
//! readout: parity
//! stabilizer: XZZXI
//! stabilizer: IXZZX
//! stabilizer: XIXZZ
//! stabilizer: ZXIXZ
//! logical: XXXXX ZZZZZ
//! ```
//!
//! `errors`, `strategy` and `readout` are optional and default to `XYZ`,
//! `joint` and `parity`. Each `logical` line gives one `X̄ Z̄` pair.

use anyhow::{Context, Result, anyhow, bail};
use nom::IResult;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{map, map_res, rest};
use nom::error::{Error, ErrorKind};
use nom::sequence::{separated_pair, terminated, tuple};
use qec_core::code::{
    CodeDefinition, DecodingStrategy, ErrorSupport, LogicalQubit, Readout, StabilizerCode,
};
use qec_core::pauli::PauliString;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug)]
enum Entry {
    Name(String),
    Distance(usize),
    Errors(ErrorSupport),
    Strategy(DecodingStrategy),
    Readout(Readout),
    Stabilizer(PauliString),
    Logical(PauliString, PauliString),
}

fn key(input: &str) -> IResult<&str, &str> {
    terminated(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        tuple((space0, char(':'), space0)),
    )(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

fn pauli_word(input: &str) -> IResult<&str, PauliString> {
    map_res(take_while1(|c: char| "IXYZixyz_".contains(c)), |w: &str| {
        w.parse::<PauliString>()
    })(input)
}

fn entry(line: &str) -> IResult<&str, Entry> {
    let (value, key) = key(line)?;
    match key.to_ascii_lowercase().as_str() {
        "name" => map(rest, |v: &str| Entry::Name(v.trim().to_string()))(value),
        "distance" => map_res(digit1, |d: &str| d.parse().map(Entry::Distance))(value),
        "errors" => map_res(word, |w: &str| w.parse().map(Entry::Errors))(value),
        "strategy" => map_res(word, |w: &str| w.parse().map(Entry::Strategy))(value),
        "readout" => map_res(word, |w: &str| w.parse().map(Entry::Readout))(value),
        "stabilizer" => map(pauli_word, Entry::Stabilizer)(value),
        "logical" => map(separated_pair(pauli_word, space1, pauli_word), |(x, z)| {
            Entry::Logical(x, z)
        })(value),
        _ => Err(nom::Err::Failure(Error::new(line, ErrorKind::Tag))),
    }
}

fn parse_line(line: &str) -> Result<Entry> {
    let (remaining, entry) = entry(line).map_err(|e| anyhow!("{e}"))?;
    if !remaining.trim().is_empty() {
        bail!("unexpected trailing input '{}'", remaining.trim());
    }
    Ok(entry)
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &str, lineno: usize) -> Result<()> {
    if slot.replace(value).is_some() {
        bail!("line {lineno}: '{key}' given twice");
    }
    Ok(())
}

/// Parses a code-definition text without validating the code.
pub fn parse_code_definition(text: &str) -> Result<CodeDefinition> {
    let mut name = None;
    let mut distance = None;
    let mut errors = None;
    let mut strategy = None;
    let mut readout = None;
    let mut generators = Vec::new();
    let mut logicals = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let entry = parse_line(line).with_context(|| format!("line {lineno}: '{line}'"))?;
        match entry {
            Entry::Name(n) if n.is_empty() => bail!("line {lineno}: empty name"),
            Entry::Name(n) => set_once(&mut name, n, "name", lineno)?,
            Entry::Distance(d) => set_once(&mut distance, d, "distance", lineno)?,
            Entry::Errors(e) => set_once(&mut errors, e, "errors", lineno)?,
            Entry::Strategy(s) => set_once(&mut strategy, s, "strategy", lineno)?,
            Entry::Readout(r) => set_once(&mut readout, r, "readout", lineno)?,
            Entry::Stabilizer(g) => generators.push(g),
            Entry::Logical(x, z) => logicals.push(LogicalQubit { x, z }),
        }
    }

    let name = name.context("missing 'name'")?;
    let distance = distance.context("missing 'distance'")?;
    let num_qubits = generators
        .first()
        .map(PauliString::num_qubits)
        .context("no 'stabilizer' lines")?;

    let mut def = CodeDefinition::new(name, num_qubits, generators, logicals, distance);
    def.errors = errors.unwrap_or(ErrorSupport::ALL);
    def.strategy = strategy.unwrap_or(DecodingStrategy::Joint);
    def.readout = readout.unwrap_or(Readout::Parity);
    Ok(def)
}

/// Parses and validates a code-definition text.
pub fn parse_code(text: &str) -> Result<StabilizerCode> {
    let def = parse_code_definition(text)?;
    let name = def.name.clone();
    StabilizerCode::new(def).with_context(|| format!("code '{name}' failed validation"))
}

/// Loads a code-definition file.
pub fn load_code_file<P: AsRef<Path>>(path: P) -> Result<StabilizerCode> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open code file {}", path.display()))?;
    parse_code(&text).with_context(|| format!("in {}", path.display()))
}

/// Renders `code` in the code-definition format.
pub fn format_code(code: &StabilizerCode) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never fails.
    write_code(&mut out, code).map(|()| out).unwrap_or_default()
}

fn write_code<W: fmt::Write>(out: &mut W, code: &StabilizerCode) -> fmt::Result {
    writeln!(out, "# {}", code.parameters())?;
    writeln!(out, "name: {}", code.name())?;
    writeln!(out, "distance: {}", code.distance())?;
    writeln!(out, "errors: {}", code.errors())?;
    writeln!(out, "strategy: {}", code.strategy())?;
    writeln!(out, "readout: {}", code.readout())?;
    for g in code.generators() {
        writeln!(out, "stabilizer: {g}")?;
    }
    for l in code.logicals() {
        writeln!(out, "logical: {} {}", l.x, l.z)?;
    }
    Ok(())
}
