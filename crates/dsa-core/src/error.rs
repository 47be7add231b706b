//! Error types for DSA Core
//!
//! Provides error handling for:
//! - Collaborator calls (category source, proposal store)
//! - Editor loading failures
//! - Rejected structural edits
//! - Overlapping submits

use dsa_form::EditError;

/// Errors reported by the persistence and category collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Server refused the request; `message` is shown verbatim when present
    #[error("rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Requested entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport-level failure (connection, decoding)
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Call did not complete in time
    #[error("request timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },
}

impl StoreError {
    /// Rejection carrying a server message
    #[inline]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Message to show the user, falling back to `generic` when the
    /// collaborator gave none
    #[must_use]
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            Self::NotFound(what) => format!("{what} was not found"),
            _ => generic.to_string(),
        }
    }

    /// Check if retrying the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}

/// What the editor failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    Categories,
    Proposal,
    DataStructure,
}

impl std::fmt::Display for LoadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Categories => f.write_str("categories"),
            Self::Proposal => f.write_str("proposal"),
            Self::DataStructure => f.write_str("data structure"),
        }
    }
}

/// Main editor error type
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// Loading categories or the existing proposal failed; the editor does
    /// not open until a retry succeeds
    #[error("failed to load {target}: {source}")]
    Load {
        target: LoadTarget,
        #[source]
        source: StoreError,
    },

    /// A structural edit was rejected
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),

    /// A submit for this draft is already outstanding
    #[error("a submit is already in flight")]
    SubmitInFlight,
}

impl EditorError {
    /// Wrap a load failure
    #[inline]
    pub fn load(target: LoadTarget, source: StoreError) -> Self {
        Self::Load { target, source }
    }

    /// Check if the user can recover by retrying the same action
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Load { .. } | Self::SubmitInFlight => true,
            Self::Edit(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_surfaced_verbatim() {
        let err = StoreError::rejected("duplicate title");
        assert_eq!(err.user_message("Failed to save proposal"), "duplicate title");
    }

    #[test]
    fn missing_message_falls_back_to_generic() {
        let err = StoreError::Rejected { message: None };
        assert_eq!(err.user_message("Failed to save proposal"), "Failed to save proposal");

        let err = StoreError::rejected("   ");
        assert_eq!(err.user_message("generic"), "generic");

        let err = StoreError::Unavailable("connection reset".into());
        assert_eq!(err.user_message("generic"), "generic");
    }

    #[test]
    fn store_error_is_retryable() {
        assert!(StoreError::Timeout { duration_secs: 5 }.is_retryable());
        assert!(StoreError::Unavailable("x".into()).is_retryable());
        assert!(!StoreError::rejected("nope").is_retryable());
    }

    #[test]
    fn load_error_display() {
        let err = EditorError::load(LoadTarget::Categories, StoreError::NotFound("categories".into()));
        assert_eq!(err.to_string(), "failed to load categories: not found: categories");
        assert!(err.is_retryable());
    }
}
