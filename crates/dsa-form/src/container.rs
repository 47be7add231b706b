//! Form state container
//!
//! [`FormState`] owns the draft being edited and a parallel error map keyed by
//! [`FieldPath`]. All mutation goes through its methods, so every successful
//! edit bumps the revision and reaches the change listener exactly once.

use crate::editors::Selection;
use crate::error::EditError;
use crate::validation::{validate, ValidationReport};
use dsa_model::{FieldPath, FieldValue, ProposalDraft, Segment};
use indexmap::IndexSet;
use std::fmt;

/// Callback invoked after every successful mutation
///
/// Receives the updated draft and its revision. Hosts use it to enable a
/// submit control or keep a local copy; it must not perform network calls.
pub type ChangeListener = Box<dyn FnMut(&ProposalDraft, u64) + Send>;

/// Single source of truth for one draft
pub struct FormState {
    pub(crate) draft: ProposalDraft,
    pub(crate) errors: IndexSet<FieldPath>,
    pub(crate) selection: Selection,
    revision: u64,
    clear_errors_on_edit: bool,
    listener: Option<ChangeListener>,
}

impl FormState {
    /// Create container around an initial draft
    #[must_use]
    pub fn new(draft: ProposalDraft) -> Self {
        Self {
            draft,
            errors: IndexSet::new(),
            selection: Selection::default(),
            revision: 0,
            clear_errors_on_edit: true,
            listener: None,
        }
    }

    /// Register the "draft changed" listener
    #[must_use]
    pub fn with_listener(mut self, listener: ChangeListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Whether edits clear the error flags of the paths they touch
    #[must_use]
    pub fn with_error_clearing(mut self, enabled: bool) -> Self {
        self.clear_errors_on_edit = enabled;
        self
    }

    /// Current draft
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &ProposalDraft {
        &self.draft
    }

    /// Consume the container, keeping only the draft
    #[inline]
    #[must_use]
    pub fn into_draft(self) -> ProposalDraft {
        self.draft
    }

    /// Number of successful mutations so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Flagged paths, in the order they were recorded
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexSet<FieldPath> {
        &self.errors
    }

    /// Whether `path` is currently flagged
    #[inline]
    #[must_use]
    pub fn has_error(&self, path: &FieldPath) -> bool {
        self.errors.contains(path)
    }

    /// Read the value at `path`
    ///
    /// # Errors
    /// Returns error if the path does not address a value
    pub fn get(&self, path: &FieldPath) -> Result<FieldValue, EditError> {
        Ok(self.draft.get(path)?)
    }

    /// Replace the value at `path` and clear its error flag
    ///
    /// When `path` addresses a sequence element, the flag on the enclosing
    /// sequence is cleared too.
    ///
    /// # Errors
    /// Returns error if the path does not address a value of that shape;
    /// the draft is left unchanged
    pub fn set_field(
        &mut self,
        path: &FieldPath,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditError> {
        self.draft.set(path, value.into())?;
        tracing::debug!(path = %path, "field updated");
        self.clear_errors_under(path);
        if let (Some(Segment::Index(_)), Some(sequence)) = (path.last(), path.parent()) {
            self.clear_sequence_flag(&sequence);
        }
        self.commit();
        Ok(())
    }

    /// Wholesale replace, used when loading an existing proposal
    ///
    /// Drops all error flags and resets tab selection.
    pub fn set_document(&mut self, draft: ProposalDraft) {
        self.draft = draft;
        self.errors.clear();
        self.selection = Selection::default();
        tracing::debug!("document replaced");
        self.commit();
    }

    /// Replace the error map, e.g. with a validator's findings
    pub fn set_errors(&mut self, errors: IndexSet<FieldPath>) {
        self.errors = errors;
    }

    /// Validate the current draft and record its findings as error flags
    pub fn validate_into(&mut self, allowed_categories: &[String]) -> ValidationReport {
        let report = validate(&self.draft, allowed_categories);
        self.errors = report.errors().clone();
        report
    }

    /// Clear flags at `prefix` and below
    pub(crate) fn clear_errors_under(&mut self, prefix: &FieldPath) {
        if self.clear_errors_on_edit {
            self.errors.retain(|path| !prefix.is_prefix_of(path));
        }
    }

    /// Clear the flag recorded on a whole sequence, keeping its elements' flags
    pub(crate) fn clear_sequence_flag(&mut self, sequence: &FieldPath) {
        if self.clear_errors_on_edit {
            self.errors.shift_remove(sequence);
        }
    }

    /// Drop flags inside a removed element and shift flags of later siblings
    pub(crate) fn reindex_errors_after_removal(&mut self, sequence: &FieldPath, removed: usize) {
        self.errors = self
            .errors
            .iter()
            .filter_map(|path| path.reindexed_after_removal(sequence, removed))
            .collect();
    }

    /// Record a successful mutation
    pub(crate) fn commit(&mut self) {
        self.revision += 1;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.draft, self.revision);
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(ProposalDraft::skeleton())
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .field("selection", &self.selection)
            .field("revision", &self.revision)
            .field("clear_errors_on_edit", &self.clear_errors_on_edit)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn set_field_updates_draft_and_clears_flag() {
        let mut form = FormState::default();
        form.set_errors([path("title"), path("definition")].into_iter().collect());

        form.set_field(&path("title"), "Queue").unwrap();

        assert_eq!(form.draft().title, "Queue");
        assert!(!form.has_error(&path("title")));
        assert!(form.has_error(&path("definition")));
        assert_eq!(form.revision(), 1);
    }

    #[test]
    fn set_field_clears_descendant_flags() {
        let mut form = FormState::default();
        form.set_errors(
            [path("comparisons[0].advantages"), path("comparisons[0].with")]
                .into_iter()
                .collect(),
        );

        form.set_field(
            &path("comparisons[0].advantages"),
            FieldValue::List(vec!["cache friendly".into()]),
        )
        .unwrap();

        assert!(!form.has_error(&path("comparisons[0].advantages")));
        assert!(form.has_error(&path("comparisons[0].with")));
    }

    #[test]
    fn setting_a_list_entry_clears_the_list_flag() {
        let mut form = FormState::default();
        form.validate_into(&[]);
        assert!(form.has_error(&path("comparisons[0].advantages")));
        assert!(form.has_error(&path("comparisons[0].disadvantages")));

        form.set_field(&path("comparisons[0].advantages[0]"), "fast").unwrap();

        assert!(!form.has_error(&path("comparisons[0].advantages")));
        assert!(form.has_error(&path("comparisons[0].disadvantages")));
        assert!(form.has_error(&path("comparisons[0].with")));
    }

    #[test]
    fn setting_a_record_field_keeps_the_sequence_flag() {
        let mut form = FormState::default();
        form.set_errors(
            [path("operations"), path("operations[0].name")]
                .into_iter()
                .collect(),
        );

        form.set_field(&path("operations[0].name"), "Push").unwrap();

        assert!(form.has_error(&path("operations")));
        assert!(!form.has_error(&path("operations[0].name")));
    }

    #[test]
    fn error_clearing_can_be_disabled() {
        let mut form = FormState::default().with_error_clearing(false);
        form.set_errors([path("title")].into_iter().collect());
        form.set_field(&path("title"), "Heap").unwrap();
        assert!(form.has_error(&path("title")));
    }

    #[test]
    fn failed_set_is_not_a_mutation() {
        let calls = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&calls);
        let mut form = FormState::default().with_listener(Box::new(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let result = form.set_field(&path("operations[4].name"), "Pop");

        assert!(matches!(result, Err(EditError::Path(_))));
        assert_eq!(form.revision(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn listener_sees_every_successful_mutation() {
        let last = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&last);
        let mut form = FormState::default().with_listener(Box::new(move |_, revision| {
            seen.store(revision, Ordering::SeqCst);
        }));

        form.set_field(&path("title"), "Trie").unwrap();
        form.set_document(ProposalDraft::skeleton());

        assert_eq!(last.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_document_resets_errors() {
        let mut form = FormState::default();
        form.validate_into(&[]);
        assert!(!form.errors().is_empty());

        form.set_document(ProposalDraft::skeleton());
        assert!(form.errors().is_empty());
    }
}
