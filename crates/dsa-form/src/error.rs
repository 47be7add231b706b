//! Error types for form editing
//!
//! Edits are rejected synchronously and leave the draft unchanged:
//! - Structural removals below a sequence's floor
//! - Duplicate category entries
//! - Paths or indices that do not exist in the draft

use dsa_model::{ModelError, PathError, SequenceField};

/// Errors from field and array edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Removal would empty a minimum-one sequence
    #[error("{field} must keep at least one entry")]
    MinimumOne { field: SequenceField },

    /// Category already present
    #[error("'{value}' is already in {field}")]
    DuplicateEntry { field: SequenceField, value: String },

    /// Structural operation on the draft failed
    #[error("draft error: {0}")]
    Model(#[from] ModelError),

    /// Path could not be resolved
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl EditError {
    /// Whether the rejection should surface as a user-facing warning
    ///
    /// Path and model errors indicate a caller bug rather than user input.
    #[inline]
    #[must_use]
    pub fn is_user_warning(&self) -> bool {
        matches!(self, Self::MinimumOne { .. } | Self::DuplicateEntry { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_model::ListField;

    #[test]
    fn minimum_one_display_names_the_sequence() {
        let err = EditError::MinimumOne {
            field: SequenceField::Top(ListField::Operations),
        };
        assert_eq!(err.to_string(), "operations must keep at least one entry");
        assert!(err.is_user_warning());
    }

    #[test]
    fn path_errors_are_not_user_warnings() {
        let err = EditError::from(PathError::EmptySegment);
        assert!(!err.is_user_warning());
    }
}
