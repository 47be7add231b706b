//! Normalize command - trim a draft before review or submission.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{read_draft, write_draft};
use crate::Config;

/// Arguments for the normalize command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Draft file (JSON).
    #[arg()]
    pub draft: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(long, short = 'o', conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file.
    #[arg(long)]
    pub in_place: bool,
}

/// Execute the normalize command.
///
/// # Errors
///
/// Returns an error if the draft cannot be read or the result cannot be written.
pub fn execute(args: &NormalizeArgs, _config: &Config) -> Result<()> {
    let draft = read_draft(&args.draft)?;
    let normalized = dsa_form::normalize(&draft);

    let target = if args.in_place {
        Some(&args.draft)
    } else {
        args.output.as_ref()
    };
    match target {
        Some(path) => {
            write_draft(path, &normalized)?;
            tracing::info!(path = %path.display(), "normalized draft written");
        }
        None => println!("{}", serde_json::to_string_pretty(&normalized)?),
    }
    Ok(())
}
