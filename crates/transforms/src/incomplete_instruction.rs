use crate::util::insert_with_fixup;
use crate::{PassContext, Transform};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::TransformError;
use tracing::debug;

/// `PUSH1 0x00, JUMP`, the truncated run `60 02 01`, then `JUMPDEST`.
pub const PAYLOAD: [u8; 7] = [0x60, 0x00, 0x56, 0x60, 0x02, 0x01, 0x5b];

/// Inserts an unconditional jump over a run of bytes that a linear disassembler decodes
/// out of alignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct IncompleteInstruction;

impl Transform for IncompleteInstruction {
    fn name(&self) -> &'static str {
        "IncompleteInstruction"
    }

    fn apply(
        &self,
        body: &BytecodeSequence,
        ctx: &mut PassContext,
    ) -> Result<BytecodeSequence, TransformError> {
        let point = ctx.choose_point(body)?;
        let mut out = body.clone();
        let report = insert_with_fixup(&mut out, point, &PAYLOAD, ctx.config.overflow)?;
        debug!(
            "incomplete instruction at {}, {} operands patched",
            point,
            report.patched.len()
        );
        Ok(out)
    }
}
