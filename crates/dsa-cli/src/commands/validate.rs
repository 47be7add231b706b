//! Validate command - list the required fields a draft is missing.

use anyhow::{Context, Result};
use clap::Args;
use dsa_core::{CategorySource, Notification};
use dsa_form::{field_label, missing_fields, validate, ValidationReport};
use std::path::PathBuf;

use super::read_draft;
use crate::client::ApiClient;
use crate::{Config, OutputFormat};

/// Arguments for the validate command.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Draft file (JSON).
    #[arg()]
    pub draft: PathBuf,

    /// Allowed category; repeat to allow several. Fetched from the API when omitted.
    #[arg(long = "category", short = 'c')]
    pub categories: Vec<String>,
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the draft cannot be read, the categories cannot be
/// loaded, or the draft is invalid.
pub async fn execute(args: ValidateArgs, config: &Config) -> Result<()> {
    let draft = read_draft(&args.draft)?;
    let categories = if args.categories.is_empty() {
        let client = ApiClient::new(config)?;
        client
            .categories()
            .await
            .context("Failed to load categories")?
    } else {
        args.categories
    };

    let report = validate(&draft, &categories);
    print_report(&report, &config.format)?;

    if !report.is_valid() {
        anyhow::bail!("{} field(s) need attention", report.len());
    }
    Ok(())
}

/// Render a validation report.
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
pub fn print_report(report: &ValidationReport, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text if report.is_valid() => println!("Draft is valid"),
        OutputFormat::Text => {
            println!("{}", Notification::missing_fields(&missing_fields(report)).message);
            println!();
            for path in report.errors() {
                println!("  {path:<55} {}", field_label(path));
            }
        }
    }
    Ok(())
}
