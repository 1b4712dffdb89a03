use crate::{PassContext, Transform};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::TransformError;
use rand::seq::SliceRandom;
use tracing::debug;

/// Swaps context-free, input-less opcodes (`ADDRESS`, `CODESIZE`, `GASPRICE`, `TIMESTAMP`,
/// `NUMBER`, `DIFFICULTY`, `GASLIMIT`, `CHAINID`) among each other.
///
/// Every candidate is a single-byte instruction, so swapping two of them changes neither the
/// length nor the alignment of the body and no fixup is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reorder;

impl Transform for Reorder {
    fn name(&self) -> &'static str {
        "Reorder"
    }

    fn apply(
        &self,
        body: &BytecodeSequence,
        ctx: &mut PassContext,
    ) -> Result<BytecodeSequence, TransformError> {
        let mut indices: Vec<usize> = body
            .instructions()
            .filter(|(_, op)| op.is_independent())
            .map(|(i, _)| i)
            .collect();

        let mut out = body.clone();
        if indices.len() < 2 {
            debug!("{} independent instructions, nothing to reorder", indices.len());
            return Ok(out);
        }

        indices.shuffle(&mut ctx.rng);
        for pair in indices.chunks_exact(2) {
            out.swap(pair[0], pair[1]);
        }
        debug!("swapped {} pairs", indices.len() / 2);
        Ok(out)
    }
}
