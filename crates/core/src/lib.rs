//! Byte-level rewriting engine for EVM bytecode.
//!
//! Hex text is tokenized into a [`BytecodeSequence`], split into its deploy/runtime/auxdata
//! [`Envelope`](strip::Envelope), edited with [`BytecodeSequence::insert_at`], and kept
//! branch-correct with [`fixup::fixup`].

pub mod decoder;
pub mod encoder;
pub mod fixup;
pub mod opcode;
pub mod scanner;
pub mod sequence;
pub mod strip;

pub use opcode::Opcode;
pub use sequence::{concat, BytecodeSequence, ByteToken};

/// Tokenizes `hex`, returning the sequence and its envelope in one step.
///
/// # Example
/// ```rust
/// let (seq, envelope) = bosc_core::process_bytecode("6000f3fe5b00").unwrap();
/// assert_eq!(seq.len(), 6);
/// assert_eq!(envelope.runtime_body.to_hex(), "fe5b00");
/// ```
pub fn process_bytecode(
    hex: &str,
) -> Result<(BytecodeSequence, strip::Envelope), bosc_utils::errors::FormatError> {
    let seq = decoder::tokenize(hex)?;
    let envelope = strip::Envelope::split(&seq);
    Ok((seq, envelope))
}
