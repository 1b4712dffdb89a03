//! Command implementations behind the `bosc` binary.
pub mod commands;
