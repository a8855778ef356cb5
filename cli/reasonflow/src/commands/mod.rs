//! CLI command implementations.

pub mod build;
pub mod validate;
pub mod visualize;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use reasonflow_core::ReasoningChain;

/// Read and parse a persisted chain file.
pub fn load_chain(path: &Path) -> Result<ReasoningChain> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ReasoningChain::from_json(&json).with_context(|| format!("loading chain from {}", path.display()))
}
