use bosc_core::fixup::{fixup, FixupReport, OperandOverflow};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::TransformError;
use tracing::debug;

/// Inserts `payload` before `point`, then shifts the PUSH1 targets of every jump that now
/// sits behind the payload.
///
/// Fixup starts at `point + payload.len()`, so jumps inside the payload itself keep the
/// operands they were built with.
pub fn insert_with_fixup(
    seq: &mut BytecodeSequence,
    point: usize,
    payload: &[u8],
    overflow: OperandOverflow,
) -> Result<FixupReport, TransformError> {
    seq.insert_bytes(point, payload)?;
    debug!("inserted {} at {}", hex::encode(payload), point);
    let report = fixup(seq, payload.len(), point + payload.len(), overflow)?;
    if !report.skipped.is_empty() {
        debug!("jumps without PUSH1 operand left alone: {:?}", report.skipped);
    }
    Ok(report)
}
