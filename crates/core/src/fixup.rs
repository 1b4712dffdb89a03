//! Jump-target fixup: keeping PUSH1-fed jumps pointing at the right bytes after an
//! insertion has shifted everything behind it.
//!
//! After `n` tokens are inserted, every jump located at or after `from` has its single-byte
//! PUSH1 target bumped by `n`. Operands are bytes, so the sum can leave the `u8` range;
//! [`OperandOverflow`] decides what happens then. All patches are computed before any is
//! written, so an overflow leaves the sequence untouched.
use crate::scanner::find_jump_sites;
use crate::sequence::{BytecodeSequence, ByteToken};
use bosc_utils::errors::FixupError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to do when a patched operand no longer fits in one byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandOverflow {
    /// Fail with [`FixupError::OperandOverflow`].
    #[default]
    Reject,
    /// Keep the low byte (modulo 256).
    Wrap,
    /// Clamp to `0xff`.
    Saturate,
}

impl OperandOverflow {
    /// Adds `delta` to `value` under this policy.
    pub fn apply(self, index: usize, value: u8, delta: usize) -> Result<u8, FixupError> {
        let sum = value as usize + delta;
        match u8::try_from(sum) {
            Ok(patched) => Ok(patched),
            Err(_) => match self {
                Self::Reject => Err(FixupError::OperandOverflow {
                    index,
                    value,
                    delta,
                }),
                Self::Wrap => Ok((sum % 256) as u8),
                Self::Saturate => Ok(u8::MAX),
            },
        }
    }
}

/// Outcome of one fixup sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FixupReport {
    /// Operand indices that were rewritten.
    pub patched: Vec<usize>,
    /// Jump indices left alone because no PUSH1 operand feeds them.
    pub skipped: Vec<usize>,
}

/// Increments the PUSH1 target of every jump at or after `from` by `inserted_len`.
///
/// A zero-length insertion is a no-op.
pub fn fixup(
    seq: &mut BytecodeSequence,
    inserted_len: usize,
    from: usize,
    overflow: OperandOverflow,
) -> Result<FixupReport, FixupError> {
    let mut report = FixupReport::default();
    if inserted_len == 0 {
        return Ok(report);
    }

    let mut patches = Vec::new();
    for site in find_jump_sites(seq, from) {
        let Some(operand) = site.operand else {
            debug!("jump at {} has no PUSH1 operand, skipping", site.jump);
            report.skipped.push(site.jump);
            continue;
        };
        let value = seq[operand].value();
        let patched = overflow.apply(operand, value, inserted_len)?;
        patches.push((operand, value, patched));
    }

    for (operand, value, patched) in patches {
        debug!("operand @{operand}: 0x{value:02x} -> 0x{patched:02x}");
        seq[operand] = ByteToken::Byte(patched);
        report.patched.push(operand);
    }
    Ok(report)
}
