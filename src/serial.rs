//! External representations of a code sequence.
//!
//! Two interchangeable forms, both exact round-trips of the abstract
//! sequence. The binary form writes every code as two big-endian bytes;
//! 16 bits cover the full dictionary capacity, so no code is ever narrowed.
//! The text form joins base-10 codes with commas and exists for transports
//! that want readability over density.
use crate::error::{CorruptKind, Error};
use crate::Code;

/// Delimiter of the textual form.
pub const DELIMITER: char = ',';

/// Serialize into the fixed-width binary form.
pub fn to_binary(codes: &[Code]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len() * 2);
    for &code in codes {
        out.extend_from_slice(&code.to_be_bytes());
    }
    out
}

/// Parse the fixed-width binary form.
///
/// A stream ending in half a code word is rejected as corrupt rather than
/// padded out.
pub fn from_binary(bytes: &[u8]) -> Result<Vec<Code>, Error> {
    if bytes.len() % 2 != 0 {
        return Err(CorruptKind::TruncatedBinary(bytes.len()).into());
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| Code::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Render the comma-delimited decimal form.
pub fn to_text(codes: &[Code]) -> String {
    let mut out = String::with_capacity(codes.len() * 4);
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&code.to_string());
    }
    out
}

/// Parse the comma-delimited decimal form.
///
/// Every token must be a base-10 integer in the 16-bit code range; anything
/// else, including empty tokens and stray whitespace, is rejected as corrupt
/// rather than skipped.
pub fn from_text(text: &str) -> Result<Vec<Code>, Error> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut codes = Vec::new();
    for token in text.split(DELIMITER) {
        match token.parse::<Code>() {
            Ok(code) => codes.push(code),
            Err(_) => return Err(CorruptKind::MalformedToken(token.to_owned()).into()),
        }
    }
    Ok(codes)
}
