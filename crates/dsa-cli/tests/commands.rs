//! Offline command tests

use dsa_cli::commands::normalize::{self, NormalizeArgs};
use dsa_cli::commands::validate::{self, ValidateArgs};
use dsa_cli::commands::{read_draft, write_draft};
use dsa_cli::{load_editor_config, Config};
use dsa_test_utils::{allowed_categories, valid_draft};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn normalize_writes_trimmed_draft() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("draft.json");
    let output = dir.path().join("normalized.json");
    let mut draft = valid_draft();
    draft.title = "  Stack ".into();
    draft.references = vec![" ".into(), "https://en.wikipedia.org/wiki/Stack".into()];
    write_draft(&input, &draft).unwrap();

    let args = NormalizeArgs {
        draft: input.clone(),
        output: Some(output.clone()),
        in_place: false,
    };
    normalize::execute(&args, &Config::default()).unwrap();

    let normalized = read_draft(&output).unwrap();
    assert_eq!(normalized.title, "Stack");
    assert_eq!(normalized.references, vec!["https://en.wikipedia.org/wiki/Stack"]);
    assert_eq!(read_draft(&input).unwrap(), draft);
}

#[test]
fn normalize_in_place_overwrites_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("draft.json");
    let mut draft = valid_draft();
    draft.tags = vec!["lifo".into(), "lifo".into(), "".into()];
    write_draft(&input, &draft).unwrap();

    let args = NormalizeArgs {
        draft: input.clone(),
        output: None,
        in_place: true,
    };
    normalize::execute(&args, &Config::default()).unwrap();

    assert_eq!(read_draft(&input).unwrap().tags, vec!["lifo"]);
}

#[test]
fn unreadable_draft_names_the_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let err = read_draft(file.path()).unwrap_err();

    assert!(err.to_string().contains("Invalid draft"));
}

#[test]
fn editor_config_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "after_save_path = \"/proposals\"").unwrap();
    writeln!(file, "submit_timeout_secs = 10").unwrap();

    let config = load_editor_config(file.path()).unwrap();

    assert_eq!(config.after_save_path.as_deref(), Some("/proposals"));
    assert_eq!(config.submit_timeout_secs, 10);
    assert_eq!(config.generic_failure_message, "Failed to save proposal");
}

#[tokio::test]
async fn validate_with_offline_categories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.json");

    write_draft(&path, &valid_draft()).unwrap();
    let args = ValidateArgs {
        draft: path.clone(),
        categories: allowed_categories(),
    };
    assert!(validate::execute(args, &Config::default()).await.is_ok());

    let mut draft = valid_draft();
    draft.category = vec!["Blockchains".into()];
    write_draft(&path, &draft).unwrap();
    let args = ValidateArgs {
        draft: path,
        categories: allowed_categories(),
    };
    let err = validate::execute(args, &Config::default()).await.unwrap_err();
    assert!(err.to_string().contains("1 field(s)"));
}
