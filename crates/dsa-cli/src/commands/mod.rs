//! CLI command implementations

pub mod normalize;
pub mod submit;
pub mod validate;

use anyhow::{Context, Result};
use dsa_model::ProposalDraft;
use std::path::Path;

/// Read a draft from a JSON file
///
/// # Errors
/// Returns error if the file cannot be read or is not a draft
pub fn read_draft(path: &Path) -> Result<ProposalDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid draft {}", path.display()))
}

/// Write a draft as pretty JSON
///
/// # Errors
/// Returns error if the file cannot be written
pub fn write_draft(path: &Path, draft: &ProposalDraft) -> Result<()> {
    let json = serde_json::to_string_pretty(draft)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write draft {}", path.display()))
}
