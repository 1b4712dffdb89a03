pub mod false_branch;
pub mod flower;
pub mod incomplete_instruction;
pub mod obfuscator;
pub mod pass;
pub mod reorder;
pub mod util;

use bosc_core::fixup::OperandOverflow;
use bosc_core::scanner::{ensure_instruction_boundary, find_insertion_candidates, PointSelection};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::{ScanError, TransformError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trait for bytecode obfuscation transforms.
///
/// A transform reads the runtime body and returns a new, owned body; the input is never
/// mutated, so a failed transform leaves the caller's sequence as it was.
pub trait Transform: Send + Sync {
    /// Returns the transform's name for logging and identification.
    fn name(&self) -> &'static str;
    /// Applies the transform to `body`.
    fn apply(
        &self,
        body: &BytecodeSequence,
        ctx: &mut PassContext,
    ) -> Result<BytecodeSequence, TransformError>;
}

/// Configuration for transform passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// How an insertion point is picked from the scanner's candidates
    pub selection: PointSelection,
    /// What fixup does when a patched jump operand leaves the byte range
    pub overflow: OperandOverflow,
}

/// Per-run state threaded through every pass: the seeded RNG and the pass configuration.
#[derive(Debug, Clone)]
pub struct PassContext {
    /// Random source for point selection and reordering.
    pub rng: StdRng,
    /// Pass configuration.
    pub config: PassConfig,
}

impl PassContext {
    /// Creates a context whose RNG is seeded from `seed`.
    pub fn new(seed: u64, config: PassConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    /// Scans `seq` for insertion candidates and picks one with the configured strategy.
    pub fn choose_point(&mut self, seq: &BytecodeSequence) -> Result<usize, ScanError> {
        let candidates = find_insertion_candidates(seq)?;
        let point = self.config.selection.choose(&candidates, &mut self.rng)?;
        ensure_instruction_boundary(seq, point)?;
        debug!(
            "{} insertion candidates, chose {} ({:?})",
            candidates.len(),
            point,
            self.config.selection
        );
        Ok(point)
    }
}
