//! I/O utilities for code definitions and shot records.
//!
//! Reads text code-definition files into validated stabilizer codes, and
//! reads and writes the packed binary shot records (`.b8` files) produced by
//! sampling runs and consumed by offline decoding.

/// Packed binary shot records.
///
/// Each shot is a run of bits padded to a whole number of bytes, stored
/// least-significant bit first. A shot's bits are the syndrome followed by
/// the data-qubit readout.
pub mod loader;

/// Parser for code-definition files.
///
/// The format is line oriented: `key: value` pairs, one per line, with `#`
/// starting a comment. Parsed definitions go through the same validation as
/// the built-in catalog.
pub mod parser;
