//! # dsa-cli
//!
//! Command-line front end for DSA proposals.
//!
//! ## Commands
//!
//! - `dsa validate` - Check a draft file and list missing fields
//! - `dsa normalize` - Trim a draft and drop blank list entries
//! - `dsa submit` - Create, update or amend a proposal through the API
//!
//! ## Configuration
//!
//! - `DSA_API_URL` - API endpoint (default: `http://localhost:5000`)
//! - `DSA_API_TOKEN` - API authentication token
//! - `DSA_EDITOR_CONFIG` - TOML file with editor settings

#![warn(unreachable_pub)]
#![allow(missing_docs)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod client;
pub mod commands;
pub mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dsa_core::EditorConfig;
use std::path::{Path, PathBuf};

/// DSA CLI - proposal validation and submission
#[derive(Debug, Parser)]
#[command(name = "dsa")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API server URL
    #[arg(long, env = "DSA_API_URL", default_value = "http://localhost:5000")]
    pub api_url: String,

    /// API authentication token
    #[arg(long, env = "DSA_API_TOKEN")]
    pub api_token: Option<String>,

    /// Editor settings file (TOML)
    #[arg(long, env = "DSA_EDITOR_CONFIG")]
    pub editor_config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Get the effective configuration
    ///
    /// # Errors
    /// Returns error if the editor settings file cannot be read or parsed
    pub fn config(&self) -> Result<Config> {
        let editor = match &self.editor_config {
            Some(path) => load_editor_config(path)?,
            None => EditorConfig::default(),
        };
        Ok(Config {
            api_url: self.api_url.trim_end_matches('/').to_string(),
            api_token: self.api_token.clone(),
            format: self.format.clone(),
            editor,
        })
    }
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a draft and list missing fields
    Validate(commands::validate::ValidateArgs),
    /// Normalize a draft file
    Normalize(commands::normalize::NormalizeArgs),
    /// Submit a draft to the API
    Submit(commands::submit::SubmitArgs),
}

/// Output format
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_url: String,
    pub api_token: Option<String>,
    pub format: OutputFormat,
    pub editor: EditorConfig,
}

/// Read editor settings from a TOML file; missing keys keep their defaults
///
/// # Errors
/// Returns error if the file cannot be read or is not valid TOML
pub fn load_editor_config(path: &Path) -> Result<EditorConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read editor config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid editor config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_flags() {
        let cli = Cli::parse_from([
            "dsa",
            "--api-url",
            "https://api.example.com/",
            "--api-token",
            "token-abc",
            "--format",
            "json",
            "normalize",
            "draft.json",
        ]);

        let config = cli.config().unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.api_token.as_deref(), Some("token-abc"));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.editor, EditorConfig::default());
    }

    #[test]
    fn submit_flags_parse() {
        let cli = Cli::parse_from(["dsa", "submit", "draft.json", "--slug", "binary-heap"]);
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.slug.as_deref(), Some("binary-heap"));
        assert!(args.amend.is_none());
    }

    #[test]
    fn slug_and_amend_conflict() {
        let parsed = Cli::try_parse_from([
            "dsa", "submit", "draft.json", "--slug", "a", "--amend", "b",
        ]);
        assert!(parsed.is_err());
    }
}
