use crate::false_branch::FalseBranch;
use crate::flower::Flower;
use crate::incomplete_instruction::IncompleteInstruction;
use crate::pass::{self, PassRecord};
use crate::reorder::Reorder;
use crate::{PassConfig, PassContext, Transform};
use bosc_core::encoder::{self, OutputMode};
use bosc_core::{decoder, strip, BytecodeSequence};
use bosc_utils::errors::ObfuscateError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The obfuscation passes, in their default pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    /// Jump over a misaligned instruction run.
    IncompleteInstruction,
    /// Always-taken `JUMPI` plus a dead branch.
    FalseBranch,
    /// Dead `PUSH1` insertion.
    Flower,
    /// Swap independent opcodes.
    Reorder,
}

impl PassKind {
    /// Every pass, Incomplete → FalseBranch → Flower → Reorder.
    pub const ALL: [PassKind; 4] = [
        PassKind::IncompleteInstruction,
        PassKind::FalseBranch,
        PassKind::Flower,
        PassKind::Reorder,
    ];

    /// Name used in logs, reports, and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IncompleteInstruction => "IncompleteInstruction",
            Self::FalseBranch => "FalseBranch",
            Self::Flower => "Flower",
            Self::Reorder => "Reorder",
        }
    }

    /// Instantiates the transform.
    pub fn build(&self) -> Box<dyn Transform> {
        match self {
            Self::IncompleteInstruction => Box::new(IncompleteInstruction),
            Self::FalseBranch => Box::new(FalseBranch),
            Self::Flower => Box::new(Flower),
            Self::Reorder => Box::new(Reorder),
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PassKind {
    type Err = ObfuscateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "incomplete" | "incomplete_instruction" | "incompleteinstruction" => {
                Ok(Self::IncompleteInstruction)
            }
            "false_branch" | "falsebranch" => Ok(Self::FalseBranch),
            "flower" => Ok(Self::Flower),
            "reorder" => Ok(Self::Reorder),
            _ => Err(ObfuscateError::InvalidPass(s.to_string())),
        }
    }
}

/// Parses a comma-separated pass list such as `"incomplete,flower"`.
pub fn parse_pass_list(list: &str) -> Result<Vec<PassKind>, ObfuscateError> {
    list.split(',')
        .filter(|name| !name.trim().is_empty())
        .map(PassKind::from_str)
        .collect()
}

/// What the input hex holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Full deployment blob; split into prefix/body/auxdata and re-joined afterwards.
    #[default]
    Deployment,
    /// An already extracted runtime body; obfuscated as a whole.
    Runtime,
}

/// Configuration for the obfuscation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscationConfig {
    /// Random seed for deterministic obfuscation; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Passes to apply, in order
    pub passes: Vec<PassKind>,
    /// Pass configuration for transform behavior
    pub pass_config: PassConfig,
    /// Whether the input carries a constructor and auxdata
    pub input_kind: InputKind,
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            passes: PassKind::ALL.to_vec(),
            pass_config: PassConfig::default(),
            input_kind: InputKind::default(),
        }
    }
}

impl ObfuscationConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ObfuscateError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Result of the obfuscation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationResult {
    /// Deploy prefix, obfuscated runtime, and auxdata re-joined, as hex
    pub obfuscated_bytecode: String,
    /// The obfuscated runtime body alone, as hex
    pub obfuscated_runtime: String,
    /// Input size in tokens
    pub original_size: usize,
    /// Output size in tokens
    pub obfuscated_size: usize,
    /// Size increase as percentage
    pub size_increase_percentage: f64,
    /// One record per applied pass, in order
    pub passes: Vec<PassRecord>,
    /// Seed the run's RNG was built from
    pub seed_used: u64,
    /// How the input was interpreted
    pub input_kind: InputKind,
    /// Keccak-256 of the runtime body before obfuscation
    pub original_runtime_keccak: String,
    /// Keccak-256 of the runtime body after obfuscation
    pub obfuscated_runtime_keccak: String,
}

impl ObfuscationResult {
    /// The hex that belongs in an output file of the given mode.
    pub fn output(&self, mode: OutputMode) -> &str {
        match mode {
            OutputMode::Runtime => &self.obfuscated_runtime,
            OutputMode::Entire => &self.obfuscated_bytecode,
        }
    }
}

/// Main obfuscation pipeline
pub fn obfuscate_bytecode(
    input_bytecode: &str,
    config: &ObfuscationConfig,
) -> Result<ObfuscationResult, ObfuscateError> {
    let seq = decoder::tokenize(&decoder::normalize_hex_string(input_bytecode))?;
    let original_size = seq.len();
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    tracing::debug!("Starting obfuscation pipeline:");
    tracing::debug!("  Input size: {} tokens", original_size);
    tracing::debug!("  Seed: 0x{:x}", seed);
    tracing::debug!("  Passes: {:?}", config.passes);

    let envelope = match config.input_kind {
        InputKind::Deployment => strip::Envelope::split(&seq),
        InputKind::Runtime => strip::Envelope {
            deploy_prefix: BytecodeSequence::new(),
            runtime_body: seq,
            auxdata_suffix: BytecodeSequence::new(),
        },
    };

    let transforms: Vec<Box<dyn Transform>> =
        config.passes.iter().map(PassKind::build).collect();
    let mut ctx = PassContext::new(seed, config.pass_config);
    let (body, records) = pass::run(&envelope.runtime_body, &transforms, &mut ctx)?;

    let joined = envelope.join(&body);
    let obfuscated_size = joined.len();
    let size_increase_percentage = if original_size > 0 {
        ((obfuscated_size as f64 - original_size as f64) / original_size as f64) * 100.0
    } else {
        0.0
    };

    tracing::info!(
        "obfuscated {} → {} tokens ({:+.1}%), seed 0x{:x}",
        original_size,
        obfuscated_size,
        size_increase_percentage,
        seed
    );

    Ok(ObfuscationResult {
        obfuscated_bytecode: encoder::encode(&joined),
        obfuscated_runtime: encoder::encode(&body),
        original_size,
        obfuscated_size,
        size_increase_percentage,
        passes: records,
        seed_used: seed,
        input_kind: config.input_kind,
        original_runtime_keccak: hex::encode(encoder::keccak256(&envelope.runtime_body)),
        obfuscated_runtime_keccak: hex::encode(encoder::keccak256(&body)),
    })
}

/// Prints a short human-readable summary of one run.
pub fn print_obfuscation_analysis(result: &ObfuscationResult) {
    println!("Transform Analysis:");
    println!("Seed: 0x{:x}", result.seed_used);
    for record in &result.passes {
        println!(
            "  {:<22} +{} tokens in {}µs",
            record.name, record.tokens_inserted, record.elapsed_micros
        );
    }
    println!(
        "Size change: {} → {} tokens ({:+.1}%)",
        result.original_size, result.obfuscated_size, result.size_increase_percentage
    );
    println!("Runtime keccak: 0x{}", result.obfuscated_runtime_keccak);
    println!();
}

/// Convenience function to create common pass configurations
pub mod presets {
    use super::*;
    use bosc_core::scanner::PointSelection;

    /// All four passes with random insertion points.
    pub fn default_obfuscation(seed: Option<u64>) -> ObfuscationConfig {
        ObfuscationConfig {
            seed,
            ..ObfuscationConfig::default()
        }
    }

    /// Only the passes that leave control flow alone (flower and reorder).
    pub fn light_obfuscation(seed: Option<u64>) -> ObfuscationConfig {
        ObfuscationConfig {
            seed,
            passes: vec![PassKind::Flower, PassKind::Reorder],
            ..ObfuscationConfig::default()
        }
    }

    /// All four passes, always inserting at the first candidate. Same input, same output.
    pub fn reproducible_obfuscation(seed: u64) -> ObfuscationConfig {
        ObfuscationConfig {
            seed: Some(seed),
            pass_config: PassConfig {
                selection: PointSelection::FirstCandidate,
                ..PassConfig::default()
            },
            ..ObfuscationConfig::default()
        }
    }
}
