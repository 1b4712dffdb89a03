/// Entry point for the Bosc CLI, an EVM bytecode obfuscation tool.
///
/// This module parses command-line arguments and dispatches to subcommands for obfuscating,
/// stripping, or scanning EVM bytecode. It initializes logging and handles the main
/// execution flow.
use bosc_cli::commands::{Cmd, Command};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Command-line interface for Bosc.
///
/// Bosc rewrites the runtime section of EVM bytecode at the byte level: it plants
/// misaligned instruction runs, dead branches, and junk pushes, reorders independent
/// opcodes, and keeps PUSH1-fed jump targets pointing where they did.
#[derive(Parser)]
#[command(name = "bosc")]
#[command(about = "Bosc: EVM bytecode obfuscator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

/// Runs the Bosc CLI with the provided arguments.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    cli.command.execute().await
}
