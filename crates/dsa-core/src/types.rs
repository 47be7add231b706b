//! Core types for the proposal editor
//!
//! Defines:
//! - Editor configuration
//! - Save targets and persisted entities
//! - User-facing notifications
//! - Submit outcomes

use chrono::{DateTime, Utc};
use dsa_form::ValidationReport;
use dsa_model::ProposalDraft;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Fallback shown when a rejection carries no message
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to save proposal";

/// Prefix of the aggregated validation notification
pub const MISSING_FIELDS_PREFIX: &str = "Please fill in the following required fields: ";

/// Identifier of one editing session (ULID for sortability in logs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Where to navigate after a successful save; `None` goes back
    pub after_save_path: Option<String>,
    /// Failure message used when the store gives no reason
    pub generic_failure_message: String,
    /// Whether edits clear the error flags of the paths they touch
    pub clear_errors_on_edit: bool,
    /// Persistence call timeout in seconds
    pub submit_timeout_secs: u64,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With after-save navigation target
    #[inline]
    #[must_use]
    pub fn with_after_save_path(mut self, path: impl Into<String>) -> Self {
        self.after_save_path = Some(path.into());
        self
    }

    /// With generic failure message
    #[inline]
    #[must_use]
    pub fn with_generic_failure_message(mut self, message: impl Into<String>) -> Self {
        self.generic_failure_message = message.into();
        self
    }

    /// With error clearing on edit
    #[inline]
    #[must_use]
    pub fn with_error_clearing(mut self, enabled: bool) -> Self {
        self.clear_errors_on_edit = enabled;
        self
    }

    /// With submit timeout
    #[inline]
    #[must_use]
    pub fn with_submit_timeout_secs(mut self, secs: u64) -> Self {
        self.submit_timeout_secs = secs;
        self
    }

    /// Submit timeout as a duration
    #[inline]
    #[must_use]
    pub fn submit_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.submit_timeout_secs)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            after_save_path: Some("/data-structures".to_string()),
            generic_failure_message: GENERIC_FAILURE_MESSAGE.to_string(),
            clear_errors_on_edit: true,
            submit_timeout_secs: 30,
        }
    }
}

/// Which persistence call a submit goes through
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SaveTarget {
    /// New proposal
    Create,
    /// Existing proposal identified by slug
    Update { slug: String },
}

impl SaveTarget {
    #[inline]
    #[must_use]
    pub fn update(slug: impl Into<String>) -> Self {
        Self::Update { slug: slug.into() }
    }

    /// Slug of the edited proposal, if any
    #[inline]
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Create => None,
            Self::Update { slug } => Some(slug),
        }
    }
}

impl std::fmt::Display for SaveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update { slug } => write!(f, "update {slug}"),
        }
    }
}

/// Proposal as returned by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub draft: ProposalDraft,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedEntity {
    /// Target for saving further edits of this entity
    #[must_use]
    pub fn save_target(&self) -> SaveTarget {
        match &self.slug {
            Some(slug) => SaveTarget::update(slug.clone()),
            None => SaveTarget::update(self.id.clone()),
        }
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Failure,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Warning => f.write_str("warning"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    #[inline]
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Failure,
            message: message.into(),
        }
    }

    /// Single notification listing every missing field once
    #[must_use]
    pub fn missing_fields(labels: &[String]) -> Self {
        Self::failure(format!("{MISSING_FIELDS_PREFIX}{}", labels.join(", ")))
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// Result of one submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Store accepted the draft
    Saved(SavedEntity),
    /// Validation failed; nothing was sent
    Invalid(ValidationReport),
    /// Store refused or failed; carries the message shown to the user
    Rejected(String),
}

impl SubmitOutcome {
    #[inline]
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.generic_failure_message, "Failed to save proposal");
        assert!(config.clear_errors_on_edit);
        assert_eq!(config.submit_timeout(), std::time::Duration::from_secs(30));
    }

    #[test]
    fn config_builder() {
        let config = EditorConfig::new()
            .with_after_save_path("/proposals")
            .with_submit_timeout_secs(5)
            .with_error_clearing(false);
        assert_eq!(config.after_save_path.as_deref(), Some("/proposals"));
        assert_eq!(config.submit_timeout_secs, 5);
        assert!(!config.clear_errors_on_edit);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"submit_timeout_secs": 3}"#).unwrap();
        assert_eq!(config.submit_timeout_secs, 3);
        assert_eq!(config.generic_failure_message, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn missing_fields_message() {
        let n = Notification::missing_fields(&["Title".into(), "Definition".into(), "Type".into()]);
        assert_eq!(n.severity, Severity::Failure);
        assert_eq!(
            n.message,
            "Please fill in the following required fields: Title, Definition, Type"
        );
    }

    #[test]
    fn saved_entity_reads_server_shape() {
        let json = r#"{
            "_id": "65f0",
            "slug": "binary-heap",
            "title": "Binary Heap",
            "type": "Hierarchical",
            "updatedAt": "2024-03-01T12:00:00Z"
        }"#;
        let entity: SavedEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id, "65f0");
        assert_eq!(entity.draft.title, "Binary Heap");
        assert_eq!(entity.save_target(), SaveTarget::update("binary-heap"));
        assert!(entity.updated_at.is_some());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
