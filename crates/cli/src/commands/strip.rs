use async_trait::async_trait;
use bosc_core::{process_bytecode, BytecodeSequence};
use clap::Args;
use serde_json::json;
use std::error::Error;

/// Arguments for the `strip` subcommand.
#[derive(Args)]
pub struct StripArgs {
    /// Input bytecode as a hex string or file path prefixed with @
    pub input: String,
    /// Output raw runtime hex instead of JSON report
    #[arg(long)]
    pub raw: bool,
}

#[async_trait]
impl super::Command for StripArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.render()?);
        Ok(())
    }
}

impl StripArgs {
    fn render(&self) -> Result<String, Box<dyn Error>> {
        let hex = super::read_input(&self.input)?;
        let (seq, envelope) = process_bytecode(&hex)?;

        if self.raw {
            return Ok(envelope.runtime_body.to_hex());
        }
        let region = |part: &BytecodeSequence| json!({ "len": part.len(), "hex": part });
        let report = json!({
            "total_len": seq.len(),
            "runtime_offset": envelope.deploy_prefix.len(),
            "deploy_prefix": region(&envelope.deploy_prefix),
            "runtime_body": region(&envelope.runtime_body),
            "auxdata_suffix": region(&envelope.auxdata_suffix),
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
