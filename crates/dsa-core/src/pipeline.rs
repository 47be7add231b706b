//! Save pipeline
//!
//! validate → normalize → persist → notify. An invalid draft never reaches
//! the store; a failed persist leaves the caller's draft untouched.

use crate::collaborators::{Notifier, ProposalStore};
use crate::error::StoreError;
use crate::types::{EditorConfig, Notification, SaveTarget, SavedEntity, SubmitOutcome};
use dsa_form::{missing_fields, normalize, validate};
use dsa_model::ProposalDraft;
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates one submit at a time for a caller
#[derive(Clone)]
pub struct SavePipeline {
    store: Arc<dyn ProposalStore>,
    notifier: Arc<dyn Notifier>,
    generic_failure_message: String,
    timeout: Duration,
}

impl SavePipeline {
    /// Create pipeline over a store and notifier
    #[must_use]
    pub fn new(
        store: Arc<dyn ProposalStore>,
        notifier: Arc<dyn Notifier>,
        config: &EditorConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            generic_failure_message: config.generic_failure_message.clone(),
            timeout: config.submit_timeout(),
        }
    }

    /// Submit `draft`
    ///
    /// Every outcome produces exactly one notification. The draft passed in
    /// is never modified; on success the caller takes the server's version
    /// from [`SubmitOutcome::Saved`].
    pub async fn submit(
        &self,
        draft: &ProposalDraft,
        allowed_categories: &[String],
        target: &SaveTarget,
    ) -> SubmitOutcome {
        let report = validate(draft, allowed_categories);
        if !report.is_valid() {
            let labels = missing_fields(&report);
            tracing::info!(flagged = report.len(), "submit blocked by validation");
            self.notifier.notify(Notification::missing_fields(&labels));
            return SubmitOutcome::Invalid(report);
        }

        let normalized = normalize(draft);
        match self.persist(&normalized, target).await {
            Ok(entity) => {
                tracing::info!(id = %entity.id, %target, "proposal saved");
                self.notifier.notify(Notification::success(success_message(target)));
                SubmitOutcome::Saved(entity)
            }
            Err(err) => {
                tracing::error!(error = %err, %target, "failed to save proposal");
                let message = err.user_message(&self.generic_failure_message);
                self.notifier.notify(Notification::failure(message.clone()));
                SubmitOutcome::Rejected(message)
            }
        }
    }

    async fn persist(
        &self,
        draft: &ProposalDraft,
        target: &SaveTarget,
    ) -> Result<SavedEntity, StoreError> {
        let call = async {
            match target {
                SaveTarget::Create => self.store.create(draft).await,
                SaveTarget::Update { slug } => self.store.update(slug, draft).await,
            }
        };

        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| StoreError::Timeout {
                duration_secs: self.timeout.as_secs(),
            })?
    }
}

impl std::fmt::Debug for SavePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavePipeline")
            .field("generic_failure_message", &self.generic_failure_message)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn success_message(target: &SaveTarget) -> &'static str {
    match target {
        SaveTarget::Create => "Proposal submitted successfully",
        SaveTarget::Update { .. } => "Proposal updated successfully",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Sink(Mutex<Vec<Notification>>);

    impl Notifier for Sink {
        fn notify(&self, notification: Notification) {
            self.0.lock().push(notification);
        }
    }

    /// Store that never answers
    struct Hanging;

    #[async_trait::async_trait]
    impl ProposalStore for Hanging {
        async fn fetch(&self, _slug: &str) -> Result<SavedEntity, StoreError> {
            std::future::pending().await
        }

        async fn fetch_data_structure(&self, _slug: &str) -> Result<SavedEntity, StoreError> {
            std::future::pending().await
        }

        async fn create(&self, _draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
            std::future::pending().await
        }

        async fn update(&self, _slug: &str, _draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn invalid_draft_produces_one_notification() {
        let sink = Arc::new(Sink::default());
        let pipeline = SavePipeline::new(Arc::new(Hanging), sink.clone(), &EditorConfig::default());

        let outcome = pipeline
            .submit(&ProposalDraft::skeleton(), &["Trees".to_string()], &SaveTarget::Create)
            .await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        let sent = sink.0.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].severity, Severity::Failure);
        assert!(sent[0].message.starts_with("Please fill in the following required fields: Title"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_times_out_with_generic_message() {
        let sink = Arc::new(Sink::default());
        let config = EditorConfig::default().with_submit_timeout_secs(1);
        let pipeline = SavePipeline::new(Arc::new(Hanging), sink.clone(), &config);
        let draft = dsa_test_utils::valid_draft();

        let outcome = pipeline
            .submit(&draft, &dsa_test_utils::allowed_categories(), &SaveTarget::Create)
            .await;

        assert_eq!(outcome, SubmitOutcome::Rejected("Failed to save proposal".into()));
        assert_eq!(sink.0.lock()[0].severity, Severity::Failure);
    }
}
