use async_trait::async_trait;
use bosc_core::decoder::normalize_hex_string;
use clap::Subcommand;
use std::error::Error;
use std::fs;

pub mod obfuscate;
pub mod scan;
pub mod strip;

#[derive(Subcommand)]
pub enum Cmd {
    /// Obfuscate one or more bytecodes
    Obfuscate(obfuscate::ObfuscateArgs),

    /// Split bytecode into deploy prefix, runtime, and auxdata
    Strip(strip::StripArgs),

    /// List insertion candidates and jump sites
    Scan(scan::ScanArgs),
}

#[async_trait]
pub trait Command {
    async fn execute(self) -> Result<(), Box<dyn Error>>;
}

#[async_trait]
impl Command for Cmd {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        match self {
            Cmd::Obfuscate(args) => args.execute().await,
            Cmd::Strip(args) => args.execute().await,
            Cmd::Scan(args) => args.execute().await,
        }
    }
}

/// Resolves a `<hex|@file>` argument to normalized hex.
pub(crate) fn read_input(input: &str) -> Result<String, Box<dyn Error>> {
    match input.strip_prefix('@') {
        Some(path) => Ok(normalize_hex_string(&fs::read_to_string(path)?)),
        None => Ok(normalize_hex_string(input)),
    }
}
