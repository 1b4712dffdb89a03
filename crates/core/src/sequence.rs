//! Token model for bytecode: one [`ByteToken`] per EVM byte, kept in execution order.
//!
//! A [`BytecodeSequence`] only ever changes shape through [`BytecodeSequence::insert_at`];
//! in-place token rewrites (`set`, `swap`) leave its length alone.
use crate::opcode::Opcode;
use bosc_utils::errors::EditError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Index, IndexMut, Range};

/// A single bytecode byte as it appeared in the hex input.
///
/// Inputs of odd length end in a lone hex digit; that digit is kept as a `Nibble` so the
/// output reproduces the input instead of silently padding it. A nibble never matches an
/// opcode.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteToken {
    /// Two hex digits.
    Byte(u8),
    /// One trailing hex digit from an odd-length input.
    Nibble(u8),
}

impl ByteToken {
    /// Raw numeric value of the token.
    pub const fn value(self) -> u8 {
        match self {
            Self::Byte(b) | Self::Nibble(b) => b,
        }
    }

    /// Decodes the token as an opcode with its immediate size.
    pub const fn opcode(self) -> Option<(Opcode, usize)> {
        match self {
            Self::Byte(b) => Some(Opcode::parse(b)),
            Self::Nibble(_) => None,
        }
    }

    /// Returns true if the token is the given opcode byte.
    pub fn is(self, opcode: Opcode) -> bool {
        self == Self::Byte(opcode.to_byte())
    }
}

impl From<u8> for ByteToken {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

impl From<Opcode> for ByteToken {
    fn from(opcode: Opcode) -> Self {
        Self::Byte(opcode.to_byte())
    }
}

impl fmt::Display for ByteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "{b:02x}"),
            Self::Nibble(n) => write!(f, "{n:x}"),
        }
    }
}

impl fmt::Debug for ByteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// An ordered run of bytecode tokens; index order is execution order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BytecodeSequence(Vec<ByteToken>);

impl BytecodeSequence {
    /// Creates an empty sequence.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a sequence of complete byte tokens.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().map(ByteToken::Byte).collect())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the sequence holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<ByteToken> {
        self.0.get(index).copied()
    }

    /// Borrow the tokens.
    pub fn tokens(&self) -> &[ByteToken] {
        &self.0
    }

    /// Token values as raw bytes; a trailing nibble contributes its digit value.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.iter().map(|t| t.value()).collect()
    }

    /// Inserts `payload` before `point`, shifting every token at or after `point` right by
    /// `payload.len()`.
    ///
    /// # Errors
    /// [`EditError::OutOfBounds`] if `point > len`.
    pub fn insert_at(&mut self, point: usize, payload: &[ByteToken]) -> Result<(), EditError> {
        if point > self.0.len() {
            return Err(EditError::OutOfBounds {
                point,
                len: self.0.len(),
            });
        }
        self.0.splice(point..point, payload.iter().copied());
        Ok(())
    }

    /// Same as [`insert_at`](Self::insert_at) for a payload of complete bytes.
    pub fn insert_bytes(&mut self, point: usize, payload: &[u8]) -> Result<(), EditError> {
        let tokens: Vec<ByteToken> = payload.iter().copied().map(ByteToken::Byte).collect();
        self.insert_at(point, &tokens)
    }

    /// Overwrites the token at `index`.
    pub fn set(&mut self, index: usize, token: ByteToken) -> Result<(), EditError> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(EditError::OutOfBounds { point: index, len })?;
        *slot = token;
        Ok(())
    }

    /// Exchanges two tokens in place.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// Copies the tokens in `range` into a new sequence.
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self(self.0[range].to_vec())
    }

    /// Returns `self` followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        concat(self, other)
    }

    /// Iterates the instruction-aligned view: `(index, opcode)` for every token that starts
    /// an instruction. PUSH immediates are stepped over; a trailing nibble is skipped.
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions {
            tokens: &self.0,
            pos: 0,
        }
    }

    /// Lowercase hex rendering with no separators.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

/// Returns a new sequence holding `a` followed by `b`.
pub fn concat(a: &BytecodeSequence, b: &BytecodeSequence) -> BytecodeSequence {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(&a.0);
    out.extend_from_slice(&b.0);
    BytecodeSequence(out)
}

/// Iterator returned by [`BytecodeSequence::instructions`].
#[derive(Debug)]
pub struct Instructions<'a> {
    tokens: &'a [ByteToken],
    pos: usize,
}

impl Iterator for Instructions<'_> {
    type Item = (usize, Opcode);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.tokens.len() {
            let index = self.pos;
            match self.tokens[index].opcode() {
                Some((opcode, imm)) => {
                    self.pos = index + 1 + imm;
                    return Some((index, opcode));
                }
                None => self.pos += 1,
            }
        }
        None
    }
}

impl Index<usize> for BytecodeSequence {
    type Output = ByteToken;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for BytecodeSequence {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl From<Vec<ByteToken>> for BytecodeSequence {
    fn from(tokens: Vec<ByteToken>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<ByteToken> for BytecodeSequence {
    fn from_iter<I: IntoIterator<Item = ByteToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for BytecodeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for BytecodeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl Serialize for BytecodeSequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
