//! Shared error types for the bosc workspace.

pub mod errors;
