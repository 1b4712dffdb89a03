use crate::util::insert_with_fixup;
use crate::{PassContext, Transform};
use bosc_core::fixup::fixup;
use bosc_core::scanner::{find_first_jump, find_jump_sites};
use bosc_core::{BytecodeSequence, Opcode};
use bosc_utils::errors::TransformError;
use tracing::debug;

/// `PUSH1 0, PUSH1 0, JUMPI, JUMPDEST`: a conditional branch that is never taken.
pub const SKELETON: [u8; 6] = [0x60, 0x00, 0x60, 0x00, 0x57, 0x5b];

/// `PUSH1 1`: the always-true condition placed under a converted jump's target.
pub const CONDITION: [u8; 2] = [0x60, 0x01];

/// Turns the first unconditional jump into an always-taken `JUMPI` followed by a dead
/// branch, or plants the dead branch alone when there is no jump to convert.
#[derive(Debug, Default, Clone, Copy)]
pub struct FalseBranch;

impl FalseBranch {
    /// The first `JUMP`, if its target comes from the `PUSH1` right before it.
    fn convertible_jump(body: &BytecodeSequence) -> Option<usize> {
        let jump = find_first_jump(body)?;
        let site = find_jump_sites(body, jump).into_iter().next()?;
        if site.jump == jump && site.operand.is_some() {
            Some(jump)
        } else {
            debug!("first JUMP at {jump} is not PUSH1-fed, planting skeleton instead");
            None
        }
    }

    /// `PUSH1 1` goes in front of the jump's `PUSH1`, the jump becomes `JUMPI`, and the
    /// skeleton follows it. Eight tokens end up in front of everything after the jump.
    fn convert(
        out: &mut BytecodeSequence,
        jump: usize,
        ctx: &PassContext,
    ) -> Result<(), TransformError> {
        out.insert_bytes(jump - 2, &CONDITION)?;
        let jump = jump + CONDITION.len();
        out.set(jump, Opcode::JUMPI.into())?;
        out.insert_bytes(jump + 1, &SKELETON)?;

        let inserted = CONDITION.len() + SKELETON.len();
        let report = fixup(out, inserted, jump + 1 + SKELETON.len(), ctx.config.overflow)?;
        debug!(
            "converted JUMP at {} to JUMPI, {} operands patched",
            jump - CONDITION.len(),
            report.patched.len()
        );
        Ok(())
    }
}

impl Transform for FalseBranch {
    fn name(&self) -> &'static str {
        "FalseBranch"
    }

    fn apply(
        &self,
        body: &BytecodeSequence,
        ctx: &mut PassContext,
    ) -> Result<BytecodeSequence, TransformError> {
        let mut out = body.clone();
        match Self::convertible_jump(body) {
            Some(jump) => Self::convert(&mut out, jump, ctx)?,
            None => {
                let point = ctx.choose_point(body)?;
                insert_with_fixup(&mut out, point, &SKELETON, ctx.config.overflow)?;
            }
        }
        Ok(out)
    }
}
