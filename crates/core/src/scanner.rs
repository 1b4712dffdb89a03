//! Locating safe insertion points and the jumps whose operands need patching.
//!
//! Both scans walk the instruction-aligned view of the sequence, so a byte that merely
//! looks like `5b` or `56` inside a PUSH immediate is never reported.
use crate::opcode::Opcode;
use crate::sequence::BytecodeSequence;
use bosc_utils::errors::ScanError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Strategy for picking one insertion point out of the scanner's candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointSelection {
    /// Uniformly at random, drawn from the pass RNG.
    #[default]
    Random,
    /// Always the lowest candidate.
    FirstCandidate,
    /// A pinned index. Reproduces a known layout; must be an instruction start or the
    /// sequence length.
    Fixed(usize),
}

impl PointSelection {
    /// Chooses an insertion point.
    ///
    /// # Errors
    /// [`ScanError::NoCandidate`] if `candidates` is empty, whatever the strategy.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        candidates: &[usize],
        rng: &mut R,
    ) -> Result<usize, ScanError> {
        if candidates.is_empty() {
            return Err(ScanError::NoCandidate);
        }
        Ok(match self {
            Self::Random => candidates[rng.random_range(0..candidates.len())],
            Self::FirstCandidate => candidates[0],
            Self::Fixed(point) => *point,
        })
    }
}

/// Checks that `point` starts an instruction or is the end of `seq`.
///
/// A point past the end is left for the insertion itself to reject.
///
/// # Errors
/// [`ScanError::NotInstructionBoundary`] if `point` falls inside an instruction.
pub fn ensure_instruction_boundary(
    seq: &BytecodeSequence,
    point: usize,
) -> Result<(), ScanError> {
    if point >= seq.len() || seq.instructions().any(|(i, _)| i == point) {
        Ok(())
    } else {
        Err(ScanError::NotInstructionBoundary(point))
    }
}

/// Indices of every boundary-safe opcode, ascending. New code is inserted before one.
///
/// # Errors
/// [`ScanError::NoCandidate`] if there are none.
pub fn find_insertion_candidates(seq: &BytecodeSequence) -> Result<Vec<usize>, ScanError> {
    let candidates: Vec<usize> = seq
        .instructions()
        .filter(|(_, op)| op.is_insertion_boundary())
        .map(|(i, _)| i)
        .collect();

    if candidates.is_empty() {
        return Err(ScanError::NoCandidate);
    }
    Ok(candidates)
}

/// A `JUMP`/`JUMPI` together with the operand byte that feeds it its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JumpSite {
    /// Index of the jump opcode.
    pub jump: usize,
    /// Index of the single-byte PUSH1 immediate right before the jump, when the jump is
    /// laid out as `PUSH1 <target> JUMP[I]`. `None` for any other shape, including a jump
    /// at index 0.
    pub operand: Option<usize>,
}

/// Every jump opcode at or after `from`, in order.
pub fn find_jump_sites(seq: &BytecodeSequence, from: usize) -> Vec<JumpSite> {
    let mut sites = Vec::new();
    let mut previous: Option<(usize, Opcode)> = None;

    for (index, opcode) in seq.instructions() {
        if opcode.is_jump() && index >= from {
            let operand = match previous {
                Some((push_at, Opcode::PUSH(1))) if push_at + 2 == index => Some(index - 1),
                _ => None,
            };
            sites.push(JumpSite {
                jump: index,
                operand,
            });
        }
        previous = Some((index, opcode));
    }
    sites
}

/// Index of the first `JUMP` opcode, if any.
pub fn find_first_jump(seq: &BytecodeSequence) -> Option<usize> {
    seq.instructions()
        .find(|(_, op)| *op == Opcode::JUMP)
        .map(|(i, _)| i)
}
