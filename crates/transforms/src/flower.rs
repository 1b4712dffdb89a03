use crate::util::insert_with_fixup;
use crate::{PassContext, Transform};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::TransformError;

/// `PUSH1 0x06`: a dead push that never feeds a jump.
pub const PAYLOAD: [u8; 2] = [0x60, 0x06];

/// Inserts a junk push at a boundary-safe point.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flower;

impl Transform for Flower {
    fn name(&self) -> &'static str {
        "Flower"
    }

    fn apply(
        &self,
        body: &BytecodeSequence,
        ctx: &mut PassContext,
    ) -> Result<BytecodeSequence, TransformError> {
        let point = ctx.choose_point(body)?;
        let mut out = body.clone();
        insert_with_fixup(&mut out, point, &PAYLOAD, ctx.config.overflow)?;
        Ok(out)
    }
}
