/// Module for the `obfuscate` subcommand, which runs the obfuscation passes over one or more
/// EVM bytecodes.
///
/// Every input line becomes an independent job on the blocking thread pool. A failing job is
/// reported with the input and the pass that failed and does not stop the others; the command
/// fails at the end if any job did.
use async_trait::async_trait;
use bosc_core::decoder::{normalize_hex_string, read_bytecode_lines};
use bosc_core::encoder::{timestamped_file_name, write_new_file, OutputMode};
use bosc_core::fixup::OperandOverflow;
use bosc_core::scanner::PointSelection;
use bosc_transform::obfuscator::{
    obfuscate_bytecode, parse_pass_list, print_obfuscation_analysis, InputKind,
    ObfuscationConfig, ObfuscationResult,
};
use bosc_utils::errors::ObfuscateError;
use clap::Args;
use serde_json::json;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{error, info};

/// Arguments for the `obfuscate` subcommand.
#[derive(Args, Default)]
pub struct ObfuscateArgs {
    /// Hex strings, or text files holding one bytecode per line.
    #[arg(required = true)]
    pub inputs: Vec<String>,
    /// JSON file with an obfuscation config; flags given here override it.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Random seed; drawn per input when absent.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Comma-separated passes (default: incomplete,false_branch,flower,reorder).
    #[arg(long)]
    pub passes: Option<String>,
    /// Insertion point strategy: random, first, or fixed:<index>.
    #[arg(long, value_parser = parse_selection)]
    pub selection: Option<PointSelection>,
    /// Jump operand overflow policy: reject, wrap, or saturate.
    #[arg(long, value_parser = parse_overflow)]
    pub overflow: Option<OperandOverflow>,
    /// Treat inputs as runtime bodies; no constructor/auxdata split.
    #[arg(long)]
    pub runtime_only: bool,
    /// Which part goes to the output: runtime or entire.
    #[arg(long, value_parser = parse_mode, default_value = "entire")]
    pub mode: OutputMode,
    /// Directory for timestamped output files; stdout when absent.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Path to emit a JSON report of every result (optional).
    #[arg(long)]
    pub emit: Option<PathBuf>,
}

/// One bytecode to obfuscate.
#[derive(Debug, Clone)]
struct Job {
    /// Where the bytecode came from, for diagnostics.
    label: String,
    /// Suffix of the output file name.
    source_name: String,
    hex: String,
}

#[async_trait]
impl super::Command for ObfuscateArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        let config = self.build_config()?;
        let jobs = collect_jobs(&self.inputs)?;
        let total = jobs.len();

        let mut set = JoinSet::new();
        for (index, job) in jobs.iter().cloned().enumerate() {
            let config = config.clone();
            set.spawn_blocking(move || (index, obfuscate_bytecode(&job.hex, &config)));
        }

        let mut results: Vec<Option<Result<ObfuscationResult, ObfuscateError>>> =
            (0..total).map(|_| None).collect();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => error!("obfuscation task aborted: {e}"),
            }
        }

        let mut failures = 0;
        let mut reports = Vec::new();
        for (job, result) in jobs.iter().zip(results) {
            match result {
                Some(Ok(result)) => match self.emit_result(job, &result) {
                    Ok(()) => reports.push(json!({ "input": job.label, "result": result })),
                    Err(e) => {
                        error!(input = %job.label, "writing output failed: {e}");
                        failures += 1;
                    }
                },
                Some(Err(e)) => {
                    error!(input = %job.label, "obfuscation failed: {e}");
                    failures += 1;
                }
                None => failures += 1,
            }
        }

        if let Some(path) = &self.emit {
            fs::write(path, serde_json::to_string_pretty(&reports)?)?;
            info!("wrote report to {}", path.display());
        }

        if failures > 0 {
            return Err(format!("{failures} of {total} inputs failed").into());
        }
        Ok(())
    }
}

impl ObfuscateArgs {
    /// Config file first, then flags on top.
    fn build_config(&self) -> Result<ObfuscationConfig, ObfuscateError> {
        let mut config = match &self.config {
            Some(path) => ObfuscationConfig::from_json_file(path)?,
            None => ObfuscationConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(passes) = &self.passes {
            config.passes = parse_pass_list(passes)?;
        }
        if let Some(selection) = self.selection {
            config.pass_config.selection = selection;
        }
        if let Some(overflow) = self.overflow {
            config.pass_config.overflow = overflow;
        }
        if self.runtime_only {
            config.input_kind = InputKind::Runtime;
        }
        Ok(config)
    }

    fn emit_result(&self, job: &Job, result: &ObfuscationResult) -> Result<(), ObfuscateError> {
        let output = result.output(self.mode);
        match &self.out_dir {
            Some(dir) => {
                let now = chrono::Local::now();
                let path = dir.join(timestamped_file_name(&now, self.mode, &job.source_name));
                write_new_file(&path, output)?;
                info!(input = %job.label, "wrote {}", path.display());
                print_obfuscation_analysis(result);
            }
            None => println!("{output}"),
        }
        Ok(())
    }
}

/// Expands every argument into jobs: an existing file yields one job per line, anything else
/// is taken as hex.
fn collect_jobs(inputs: &[String]) -> Result<Vec<Job>, ObfuscateError> {
    let mut jobs = Vec::new();
    for (arg_index, input) in inputs.iter().enumerate() {
        let path = Path::new(input);
        if !path.is_file() {
            jobs.push(Job {
                label: format!("argument {}", arg_index + 1),
                source_name: format!("input{}.hex", arg_index + 1),
                hex: normalize_hex_string(input),
            });
            continue;
        }

        let file_name = path
            .file_name()
            .map_or_else(|| input.clone(), |n| n.to_string_lossy().into_owned());
        let lines = read_bytecode_lines(path)?;
        let single = lines.len() == 1;
        for (line_index, hex) in lines.into_iter().enumerate() {
            jobs.push(Job {
                label: format!("{}:{}", path.display(), line_index + 1),
                source_name: if single {
                    file_name.clone()
                } else {
                    format!("{}-{}", line_index + 1, file_name)
                },
                hex,
            });
        }
    }
    Ok(jobs)
}

fn parse_selection(s: &str) -> Result<PointSelection, String> {
    match s {
        "random" => Ok(PointSelection::Random),
        "first" | "first_candidate" => Ok(PointSelection::FirstCandidate),
        _ => s
            .strip_prefix("fixed:")
            .and_then(|index| index.parse().ok())
            .map(PointSelection::Fixed)
            .ok_or_else(|| format!("expected random, first, or fixed:<index>, got {s:?}")),
    }
}

fn parse_overflow(s: &str) -> Result<OperandOverflow, String> {
    match s {
        "reject" => Ok(OperandOverflow::Reject),
        "wrap" => Ok(OperandOverflow::Wrap),
        "saturate" => Ok(OperandOverflow::Saturate),
        _ => Err(format!("expected reject, wrap, or saturate, got {s:?}")),
    }
}

fn parse_mode(s: &str) -> Result<OutputMode, String> {
    match s {
        "runtime" => Ok(OutputMode::Runtime),
        "entire" => Ok(OutputMode::Entire),
        _ => Err(format!("expected runtime or entire, got {s:?}")),
    }
}
