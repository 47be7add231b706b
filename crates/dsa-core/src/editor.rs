//! Proposal editor session
//!
//! [`ProposalEditor`] owns one draft for the lifetime of an editing session.
//! Field and array edits are synchronous and serialized by the form lock;
//! the only suspension point is the persistence call inside [`ProposalEditor::submit`],
//! and at most one submit per editor is in flight at any time.

use crate::collaborators::EditorContext;
use crate::error::{EditorError, LoadTarget};
use crate::pipeline::SavePipeline;
use crate::types::{EditorConfig, Notification, SaveTarget, SavedEntity, SessionId, SubmitOutcome};
use dsa_form::{EditError, FormState};
use dsa_model::{FieldPath, FieldValue, Item, ListField, NestedListField, ProposalDraft};
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicBool, Ordering};

/// One editing session
pub struct ProposalEditor {
    session: SessionId,
    ctx: EditorContext,
    config: EditorConfig,
    pipeline: SavePipeline,
    categories: Vec<String>,
    form: Mutex<FormState>,
    target: Mutex<SaveTarget>,
    saved: Mutex<Option<SavedEntity>>,
    submitting: AtomicBool,
}

/// Clears the in-flight flag when the submit finishes or is dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ProposalEditor {
    /// Open an editor
    ///
    /// Loads the allowed categories and, for [`SaveTarget::Update`], the
    /// existing proposal. Both loads run concurrently.
    ///
    /// # Errors
    /// Returns [`EditorError::Load`] if either load fails; call `open` again
    /// to retry
    pub async fn open(
        ctx: EditorContext,
        config: EditorConfig,
        target: SaveTarget,
    ) -> Result<Self, EditorError> {
        let categories = ctx.categories.categories();
        let existing = async {
            match &target {
                SaveTarget::Create => Ok(None),
                SaveTarget::Update { slug } => ctx.store.fetch(slug).await.map(Some),
            }
        };
        let (categories, existing) = futures::join!(categories, existing);

        let categories = categories.map_err(|e| EditorError::load(LoadTarget::Categories, e))?;
        let existing = existing.map_err(|e| EditorError::load(LoadTarget::Proposal, e))?;

        let draft = existing
            .as_ref()
            .map_or_else(ProposalDraft::skeleton, |entity| entity.draft.clone());
        Ok(Self::assemble(ctx, config, target, categories, draft, existing))
    }

    /// Open an editor for a new proposal that amends a published data structure
    ///
    /// The draft starts from the data structure's content and points
    /// `target_data_structure` at its id.
    ///
    /// # Errors
    /// Returns [`EditorError::Load`] if the categories or the amended data
    /// structure cannot be loaded
    pub async fn open_amendment(
        ctx: EditorContext,
        config: EditorConfig,
        amended_slug: &str,
    ) -> Result<Self, EditorError> {
        let (categories, amended) = futures::join!(
            ctx.categories.categories(),
            ctx.store.fetch_data_structure(amended_slug)
        );

        let categories = categories.map_err(|e| EditorError::load(LoadTarget::Categories, e))?;
        let amended = amended.map_err(|e| EditorError::load(LoadTarget::DataStructure, e))?;

        let draft = ProposalDraft {
            target_data_structure: Some(amended.id.clone()),
            ..amended.draft
        };
        Ok(Self::assemble(ctx, config, SaveTarget::Create, categories, draft, None))
    }

    fn assemble(
        ctx: EditorContext,
        config: EditorConfig,
        target: SaveTarget,
        categories: Vec<String>,
        draft: ProposalDraft,
        existing: Option<SavedEntity>,
    ) -> Self {
        let session = SessionId::new();
        tracing::info!(%session, %target, categories = categories.len(), "editor opened");

        let pipeline = SavePipeline::new(ctx.store.clone(), ctx.notifier.clone(), &config);
        let form = FormState::new(draft).with_error_clearing(config.clear_errors_on_edit);
        Self {
            session,
            ctx,
            config,
            pipeline,
            categories,
            form: Mutex::new(form),
            target: Mutex::new(target),
            saved: Mutex::new(existing),
            submitting: AtomicBool::new(false),
        }
    }

    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Allowed categories loaded at open
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Lock the form for direct reads and edits
    ///
    /// Edits made through the guard bypass the warning notifications sent by
    /// the editor's own edit methods.
    pub fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock()
    }

    /// Snapshot of the current draft
    #[must_use]
    pub fn draft(&self) -> ProposalDraft {
        self.form.lock().draft().clone()
    }

    /// Where the next submit goes
    #[must_use]
    pub fn target(&self) -> SaveTarget {
        self.target.lock().clone()
    }

    /// Entity last loaded or saved
    #[must_use]
    pub fn saved_entity(&self) -> Option<SavedEntity> {
        self.saved.lock().clone()
    }

    /// Whether a submit is outstanding
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Run an edit against the form
    ///
    /// Rejections caused by user input are also sent to the notifier as warnings.
    ///
    /// # Errors
    /// Returns [`EditorError::Edit`] if the edit was rejected; the draft is unchanged
    pub fn edit<R>(
        &self,
        f: impl FnOnce(&mut FormState) -> Result<R, EditError>,
    ) -> Result<R, EditorError> {
        let result = f(&mut self.form.lock());
        result.map_err(|err| {
            if err.is_user_warning() {
                self.ctx.notifier.notify(Notification::warning(err.to_string()));
            }
            EditorError::Edit(err)
        })
    }

    /// # Errors
    /// See [`FormState::set_field`]
    pub fn set_field(
        &self,
        path: &FieldPath,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        self.edit(|form| form.set_field(path, value))
    }

    /// # Errors
    /// See [`FormState::add_item`]
    pub fn add_item(&self, field: ListField, item: Item) -> Result<(), EditorError> {
        self.edit(|form| form.add_item(field, item))
    }

    /// # Errors
    /// See [`FormState::remove_item`]
    pub fn remove_item(&self, field: ListField, index: usize) -> Result<Item, EditorError> {
        self.edit(|form| form.remove_item(field, index))
    }

    /// # Errors
    /// See [`FormState::update_item`]
    pub fn update_item(&self, field: ListField, index: usize, item: Item) -> Result<(), EditorError> {
        self.edit(|form| form.update_item(field, index, item))
    }

    /// # Errors
    /// See [`FormState::add_nested_item`]
    pub fn add_nested_item(
        &self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        item: Item,
    ) -> Result<(), EditorError> {
        self.edit(|form| form.add_nested_item(field, outer, nested, item))
    }

    /// # Errors
    /// See [`FormState::remove_nested_item`]
    pub fn remove_nested_item(
        &self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        index: usize,
    ) -> Result<Item, EditorError> {
        self.edit(|form| form.remove_nested_item(field, outer, nested, index))
    }

    /// # Errors
    /// See [`FormState::update_nested_item`]
    pub fn update_nested_item(
        &self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        index: usize,
        item: Item,
    ) -> Result<(), EditorError> {
        self.edit(|form| form.update_nested_item(field, outer, nested, index, item))
    }

    /// Submit the current draft
    ///
    /// On [`SubmitOutcome::Saved`] the draft is replaced by the server's
    /// version, later submits update that entity, and the host navigates to
    /// the after-save path. On [`SubmitOutcome::Invalid`] the findings become
    /// the form's error flags. On [`SubmitOutcome::Rejected`] nothing changes.
    ///
    /// # Errors
    /// Returns [`EditorError::SubmitInFlight`] if another submit is outstanding
    pub async fn submit(&self) -> Result<SubmitOutcome, EditorError> {
        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            tracing::warn!(session = %self.session, "submit ignored, one already in flight");
            return Err(EditorError::SubmitInFlight);
        };

        let draft = self.draft();
        let target = self.target();
        let outcome = self.pipeline.submit(&draft, &self.categories, &target).await;

        match &outcome {
            SubmitOutcome::Saved(entity) => {
                self.form.lock().set_document(entity.draft.clone());
                *self.target.lock() = entity.save_target();
                *self.saved.lock() = Some(entity.clone());
                match &self.config.after_save_path {
                    Some(path) => self.ctx.navigator.go_to(path),
                    None => self.ctx.navigator.back(),
                }
            }
            SubmitOutcome::Invalid(report) => {
                self.form.lock().set_errors(report.errors().clone());
            }
            SubmitOutcome::Rejected(_) => {}
        }
        Ok(outcome)
    }

    /// Discard the draft and navigate back
    pub fn cancel(self) {
        tracing::info!(session = %self.session, "editor cancelled");
        self.ctx.navigator.back();
    }
}

impl std::fmt::Debug for ProposalEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProposalEditor")
            .field("session", &self.session)
            .field("config", &self.config)
            .field("categories", &self.categories)
            .field("submitting", &self.is_submitting())
            .finish_non_exhaustive()
    }
}
