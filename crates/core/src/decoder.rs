//! bosc's single entry-point for turning hex text into a [`BytecodeSequence`].

use crate::sequence::{BytecodeSequence, ByteToken};
use bosc_utils::errors::FormatError;
use std::{fs, io, path::Path};
use tracing::debug;

/// Normalizes hex text by removing whitespace and an optional `0x` prefix.
///
/// Unlike a byte decoder this never pads: an odd digit count survives so the tokenizer can
/// reproduce it.
pub fn normalize_hex_string(input: &str) -> String {
    let clean: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    match clean.strip_prefix("0x") {
        Some(stripped) => stripped.to_string(),
        None => clean,
    }
}

/// Splits a hex string into two-digit tokens in order.
///
/// Digits are case-normalized. If the input has an odd number of digits, the final token is
/// a [`ByteToken::Nibble`] holding the leftover digit.
///
/// # Errors
/// [`FormatError::InvalidHexCharacter`] for any non-hex character.
///
/// # Examples
/// ```
/// use bosc_core::decoder::tokenize;
///
/// let seq = tokenize("6080604052").unwrap();
/// assert_eq!(seq.len(), 5);
/// assert_eq!(seq.to_hex(), "6080604052");
/// ```
pub fn tokenize(hex_str: &str) -> Result<BytecodeSequence, FormatError> {
    if let Some((index, c)) = hex_str
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit())
    {
        return Err(FormatError::InvalidHexCharacter { c, index });
    }

    let even = hex_str.len() - hex_str.len() % 2;
    let bytes = hex::decode(&hex_str[..even])?;
    let mut tokens: Vec<ByteToken> = bytes.into_iter().map(ByteToken::Byte).collect();

    if let Some(last) = hex_str[even..].chars().next() {
        debug!("odd-length input, keeping trailing digit {last:?} as a nibble");
        // the filter above guarantees a hex digit
        let digit = last.to_digit(16).unwrap_or_default() as u8;
        tokens.push(ByteToken::Nibble(digit));
    }

    Ok(tokens.into())
}

/// Reads a bytecode text file: one bytecode per non-empty line, normalized.
pub fn read_bytecode_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(content
        .lines()
        .map(normalize_hex_string)
        .filter(|line| !line.is_empty())
        .collect())
}
