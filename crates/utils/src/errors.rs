use std::path::PathBuf;
use thiserror::Error;

/// Malformed hex input handed to the tokenizer.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid hex character {c:?} at position {index}")]
    InvalidHexCharacter {
        /// The offending character.
        c: char,
        /// Its position in the input.
        index: usize,
    },
    /// The even-length part could not be decoded.
    #[error("hex decode failed: {0}")]
    HexDecode(#[from] hex::FromHexError),
}

/// Errors raised by the sequence edit primitives.
#[derive(Debug, Error)]
pub enum EditError {
    /// Insertion point lies outside `[0, len]`.
    #[error("insertion point {point} out of bounds for sequence of length {len}")]
    OutOfBounds {
        /// Requested index.
        point: usize,
        /// Sequence length.
        len: usize,
    },
}

/// Errors raised by the branch scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No boundary-safe opcode exists in the sequence.
    #[error("no safe insertion point found")]
    NoCandidate,
    /// A pinned insertion point falls inside an instruction, e.g. a PUSH immediate.
    #[error("insertion point {0} is not an instruction boundary")]
    NotInstructionBoundary(usize),
}

/// Errors raised while patching jump operands.
#[derive(Debug, Error)]
pub enum FixupError {
    /// The patched operand no longer fits a single byte.
    #[error("push operand at index {index} overflows: 0x{value:02x} + {delta} > 0xff")]
    OperandOverflow {
        /// Index of the operand token.
        index: usize,
        /// Operand before patching.
        value: u8,
        /// Inserted length that was to be added.
        delta: usize,
    },
}

/// Error type for transform operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No usable insertion point, or a pinned one inside an instruction.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// An edit fell outside the sequence.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// A jump operand could not be patched.
    #[error(transparent)]
    Fixup(#[from] FixupError),
}

/// Errors that can occur during obfuscation.
#[derive(Debug, Error)]
pub enum ObfuscateError {
    /// The input is not valid hex.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    /// A pass failed; nothing is written for this input.
    #[error("pass {pass} failed: {source}")]
    Pass {
        pass: &'static str,
        #[source]
        source: TransformError,
    },
    /// File read/write error.
    #[error("file error: {0}")]
    File(#[from] std::io::Error),
    /// The output writer refuses to overwrite.
    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
    /// Invalid transform pass specified.
    #[error("invalid pass: {0}")]
    InvalidPass(String),
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
