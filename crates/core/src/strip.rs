/// Module for splitting deployed bytecode into its deploy prefix, runtime body, and
/// trailing auxdata, and for putting an obfuscated body back into the same envelope.
///
/// The runtime starts right after the first `RETURN` (`f3`) of the constructor. The auxdata
/// starts at the first `LOG1`..`LOG4` opcode (`a1`..`a4`) at or past the runtime start,
/// which is where the compiler's CBOR metadata map begins. Both searches use the
/// instruction-aligned view, so bytes inside PUSH immediates never count.
///
/// # Usage
/// ```rust
/// use bosc_core::decoder::tokenize;
/// use bosc_core::strip::Envelope;
///
/// let seq = tokenize("6000f3fe6001a165627a").unwrap();
/// let envelope = Envelope::split(&seq);
/// assert_eq!(envelope.runtime_body.to_hex(), "fe6001");
/// assert_eq!(envelope.join(&envelope.runtime_body), seq);
/// ```
use crate::opcode::Opcode;
use crate::sequence::{concat, BytecodeSequence};
use serde::Serialize;
use tracing::{debug, warn};

/// The three regions of a deployed-bytecode blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// Constructor code up to and including the first `RETURN`.
    pub deploy_prefix: BytecodeSequence,
    /// The code that is obfuscated.
    pub runtime_body: BytecodeSequence,
    /// Compiler metadata; empty when no marker was found.
    pub auxdata_suffix: BytecodeSequence,
}

impl Envelope {
    /// Splits `seq` into prefix, body, and auxdata.
    ///
    /// A blob without a `RETURN` is taken to be runtime-only and gets an empty prefix.
    pub fn split(seq: &BytecodeSequence) -> Self {
        let start = match seq.instructions().find(|(_, op)| *op == Opcode::RETURN) {
            Some((i, _)) => i + 1,
            None => {
                warn!("no RETURN boundary found, treating input as runtime-only");
                0
            }
        };

        let end = seq
            .instructions()
            .find(|(i, op)| *i >= start && op.is_auxdata_marker())
            .map_or(seq.len(), |(i, _)| i);

        debug!(
            "envelope: prefix {} tokens, body {} tokens, auxdata {} tokens",
            start,
            end - start,
            seq.len() - end
        );

        Self {
            deploy_prefix: seq.slice(0..start),
            runtime_body: seq.slice(start..end),
            auxdata_suffix: seq.slice(end..seq.len()),
        }
    }

    /// Re-joins `body` between this envelope's prefix and auxdata.
    pub fn join(&self, body: &BytecodeSequence) -> BytecodeSequence {
        join(&self.deploy_prefix, body, &self.auxdata_suffix)
    }

    /// Returns true if a constructor prefix was found.
    pub fn has_constructor(&self) -> bool {
        !self.deploy_prefix.is_empty()
    }

    /// Returns true if an auxdata suffix was found.
    pub fn has_auxdata(&self) -> bool {
        !self.auxdata_suffix.is_empty()
    }
}

/// `deploy_prefix ++ body ++ auxdata_suffix`.
pub fn join(
    deploy_prefix: &BytecodeSequence,
    body: &BytecodeSequence,
    auxdata_suffix: &BytecodeSequence,
) -> BytecodeSequence {
    concat(&concat(deploy_prefix, body), auxdata_suffix)
}
