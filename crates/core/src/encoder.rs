//! Serializing sequences back to hex and writing them out.
use crate::sequence::BytecodeSequence;
use bosc_utils::errors::ObfuscateError;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Which part of the result lands in the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Only the obfuscated runtime body.
    Runtime,
    /// Deploy prefix, obfuscated body, and auxdata re-joined.
    #[default]
    Entire,
}

impl OutputMode {
    /// Label used in generated file names.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Entire => "entire",
        }
    }
}

/// Renders the sequence as contiguous lowercase hex.
pub fn encode(seq: &BytecodeSequence) -> String {
    seq.to_hex()
}

/// Keccak-256 over the token values.
pub fn keccak256(seq: &BytecodeSequence) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(seq.to_bytes());
    hasher.finalize().into()
}

/// Builds `"<timestamp><mode>obfuscated<source>"`, e.g.
/// `2024-05-01 12-30-05runtimeobfuscatedexample.hex`.
pub fn timestamped_file_name<Tz>(now: &DateTime<Tz>, mode: OutputMode, source_name: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}obfuscated{}",
        now.format("%Y-%m-%d %H-%M-%S"),
        mode.as_str(),
        source_name
    )
}

/// Writes `contents` to a new file, creating missing parent directories.
///
/// # Errors
/// [`ObfuscateError::OutputExists`] if `path` already exists; [`ObfuscateError::File`] if
/// the directory or file cannot be created.
pub fn write_new_file(path: impl AsRef<Path>, contents: &str) -> Result<(), ObfuscateError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!("creating output directory {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ObfuscateError::OutputExists(path.to_path_buf()),
            _ => ObfuscateError::File(e),
        })?;
    file.write_all(contents.as_bytes())?;
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
