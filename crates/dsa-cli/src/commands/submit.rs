//! Submit command - run a draft through the save pipeline.

use anyhow::{Context, Result};
use clap::Args;
use dsa_core::{EditorContext, ProposalEditor, SaveTarget, SubmitOutcome};
use std::path::PathBuf;
use std::sync::Arc;

use super::{read_draft, write_draft};
use crate::client::ApiClient;
use crate::console::{ConsoleNotifier, LoggingNavigator};
use crate::{Config, OutputFormat};

/// Arguments for the submit command.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Draft file (JSON).
    #[arg()]
    pub draft: PathBuf,

    /// Update the existing proposal with this slug instead of creating one.
    #[arg(long, conflicts_with = "amend")]
    pub slug: Option<String>,

    /// Create a proposal amending the published data structure with this slug.
    #[arg(long)]
    pub amend: Option<String>,

    /// Write the server's copy of the saved draft back to the draft file.
    #[arg(long)]
    pub write_back: bool,
}

/// Execute the submit command.
///
/// # Errors
///
/// Returns an error if the editor cannot load its data, or the submit is
/// invalid or rejected.
pub async fn execute(args: SubmitArgs, config: &Config) -> Result<()> {
    let draft = read_draft(&args.draft)?;
    let client = Arc::new(ApiClient::new(config)?);
    let ctx = EditorContext::new(
        client.clone(),
        client,
        Arc::new(ConsoleNotifier),
        Arc::new(LoggingNavigator),
    );

    let editor = match &args.amend {
        Some(amended) => {
            let editor = ProposalEditor::open_amendment(ctx, config.editor.clone(), amended)
                .await
                .context("Failed to open editor")?;
            let target = editor.draft().target_data_structure;
            editor.form().set_document(dsa_model::ProposalDraft {
                target_data_structure: target,
                ..draft
            });
            editor
        }
        None => {
            let target = args.slug.clone().map_or(SaveTarget::Create, SaveTarget::update);
            let editor = ProposalEditor::open(ctx, config.editor.clone(), target)
                .await
                .context("Failed to open editor")?;
            editor.form().set_document(draft);
            editor
        }
    };

    match editor.submit().await? {
        SubmitOutcome::Saved(entity) => {
            if args.write_back {
                write_draft(&args.draft, &entity.draft)?;
            }
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entity)?),
                OutputFormat::Text => println!(
                    "Saved {} ({})",
                    entity.draft.title,
                    entity.slug.as_deref().unwrap_or(&entity.id)
                ),
            }
            Ok(())
        }
        SubmitOutcome::Invalid(report) => {
            if config.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            anyhow::bail!("Draft is invalid: {} field(s) need attention", report.len())
        }
        SubmitOutcome::Rejected(message) => anyhow::bail!("Submit rejected: {message}"),
    }
}
