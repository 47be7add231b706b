//! Collaborator seams
//!
//! The editor never reaches ambient state: categories, persistence,
//! notifications and navigation are passed in through [`EditorContext`].

use crate::error::StoreError;
use crate::types::{Notification, SavedEntity};
use dsa_model::ProposalDraft;
use std::sync::Arc;

/// Source of the allowed category list
#[async_trait::async_trait]
pub trait CategorySource: Send + Sync {
    async fn categories(&self) -> Result<Vec<String>, StoreError>;
}

/// Create/update persistence
#[async_trait::async_trait]
pub trait ProposalStore: Send + Sync {
    /// Load an existing proposal by slug
    async fn fetch(&self, slug: &str) -> Result<SavedEntity, StoreError>;

    /// Load a published data structure by slug, the target of an amendment
    async fn fetch_data_structure(&self, slug: &str) -> Result<SavedEntity, StoreError>;

    /// Persist a new proposal
    async fn create(&self, draft: &ProposalDraft) -> Result<SavedEntity, StoreError>;

    /// Replace an existing proposal
    async fn update(&self, slug: &str, draft: &ProposalDraft) -> Result<SavedEntity, StoreError>;
}

/// Fire-and-forget user messages
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Host navigation
pub trait Navigator: Send + Sync {
    fn back(&self);
    fn go_to(&self, path: &str);
}

/// Everything an editor session talks to
#[derive(Clone)]
pub struct EditorContext {
    pub categories: Arc<dyn CategorySource>,
    pub store: Arc<dyn ProposalStore>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl EditorContext {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategorySource>,
        store: Arc<dyn ProposalStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            categories,
            store,
            notifier,
            navigator,
        }
    }
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext").finish_non_exhaustive()
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        tracing::info!(severity = %notification.severity, "{}", notification.message);
    }
}

/// Navigator for hosts without navigation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn back(&self) {
        tracing::debug!("navigate back");
    }

    fn go_to(&self, path: &str) {
        tracing::debug!(path, "navigate");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    #[async_trait::async_trait]
    impl CategorySource for Empty {
        async fn categories(&self) -> Result<Vec<String>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[async_trait::async_trait]
    impl ProposalStore for Empty {
        async fn fetch(&self, slug: &str) -> Result<SavedEntity, StoreError> {
            Err(StoreError::NotFound(slug.to_string()))
        }

        async fn fetch_data_structure(&self, slug: &str) -> Result<SavedEntity, StoreError> {
            Err(StoreError::NotFound(slug.to_string()))
        }

        async fn create(&self, _draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
            Err(StoreError::rejected("read-only"))
        }

        async fn update(&self, _slug: &str, _draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
            Err(StoreError::rejected("read-only"))
        }
    }

    #[tokio::test]
    async fn context_with_default_sinks() {
        let empty = Arc::new(Empty);
        let ctx = EditorContext::new(
            empty.clone(),
            empty,
            Arc::new(TracingNotifier),
            Arc::new(NoopNavigator),
        );

        ctx.notifier.notify(Notification::success("saved"));
        ctx.navigator.go_to("/data-structures");
        assert!(ctx.categories.categories().await.unwrap().is_empty());
        assert!(matches!(ctx.store.fetch("stack").await, Err(StoreError::NotFound(_))));
        assert!(matches!(
            ctx.store.fetch_data_structure("stack").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
