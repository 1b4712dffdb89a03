use async_trait::async_trait;
use bosc_core::scanner::{find_insertion_candidates, find_jump_sites};
use bosc_core::{decoder, strip};
use clap::Args;
use serde_json::json;
use std::error::Error;

/// Arguments for the `scan` subcommand.
#[derive(Args)]
pub struct ScanArgs {
    /// Input bytecode as a hex string or file path prefixed with @
    pub input: String,
    /// Scan the input as a runtime body instead of splitting it first
    #[arg(long)]
    pub runtime_only: bool,
}

#[async_trait]
impl super::Command for ScanArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        println!("{}", serde_json::to_string_pretty(&self.report()?)?);
        Ok(())
    }
}

impl ScanArgs {
    /// Indices are relative to the runtime body.
    fn report(&self) -> Result<serde_json::Value, Box<dyn Error>> {
        let seq = decoder::tokenize(&super::read_input(&self.input)?)?;
        let body = if self.runtime_only {
            seq
        } else {
            strip::Envelope::split(&seq).runtime_body
        };

        let candidates = find_insertion_candidates(&body).unwrap_or_default();
        let jump_sites = find_jump_sites(&body, 0);
        Ok(json!({
            "body_len": body.len(),
            "candidates": candidates,
            "jump_sites": jump_sites,
        }))
    }
}
