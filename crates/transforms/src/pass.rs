use crate::{PassContext, Transform};
use bosc_core::BytecodeSequence;
use bosc_utils::errors::ObfuscateError;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// What one pass did to the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Transform name
    pub name: String,
    /// Body length after the pass minus body length before it
    pub tokens_inserted: usize,
    /// Wall time spent in the pass, in microseconds
    pub elapsed_micros: u128,
}

/// Trait for running a sequence of obfuscation transforms on a runtime body.
pub trait Pass {
    /// Feeds `body` through `passes` in order, each consuming the previous output.
    fn run(
        &self,
        body: &BytecodeSequence,
        passes: &[Box<dyn Transform>],
        ctx: &mut PassContext,
    ) -> Result<(BytecodeSequence, Vec<PassRecord>), ObfuscateError>;
}

/// Default implementation of the Pass trait: strictly sequential, first failure aborts.
pub struct DefaultPass;

impl Pass for DefaultPass {
    fn run(
        &self,
        body: &BytecodeSequence,
        passes: &[Box<dyn Transform>],
        ctx: &mut PassContext,
    ) -> Result<(BytecodeSequence, Vec<PassRecord>), ObfuscateError> {
        let mut current = body.clone();
        let mut records = Vec::with_capacity(passes.len());

        for pass in passes {
            let started = Instant::now();
            let next = pass
                .apply(&current, ctx)
                .map_err(|source| ObfuscateError::Pass {
                    pass: pass.name(),
                    source,
                })?;
            let elapsed = started.elapsed();

            let record = PassRecord {
                name: pass.name().to_string(),
                tokens_inserted: next.len().saturating_sub(current.len()),
                elapsed_micros: elapsed.as_micros(),
            };
            info!(
                "{:>22} +{:<3} tokens {:>8}µs",
                record.name, record.tokens_inserted, record.elapsed_micros
            );
            records.push(record);
            current = next;
        }
        Ok((current, records))
    }
}

/// Convenience function to run the default pass.
pub fn run(
    body: &BytecodeSequence,
    passes: &[Box<dyn Transform>],
    ctx: &mut PassContext,
) -> Result<(BytecodeSequence, Vec<PassRecord>), ObfuscateError> {
    DefaultPass.run(body, passes, ctx)
}
