//! Testing utilities for the DSA proposal workspace
//!
//! Shared draft fixtures and recording collaborator doubles.

#![allow(missing_docs)]

use dsa_core::{
    CategorySource, EditorContext, Navigator, Notification, Notifier, ProposalStore, SavedEntity,
    Severity, StoreError,
};
use dsa_model::{
    Application, CodeBlock, Comparison, Complexity, Implementation, Operation, ProposalDraft,
    StructureType,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub fn allowed_categories() -> Vec<String> {
    vec![
        "Linear Structures".to_string(),
        "Trees".to_string(),
        "Graphs".to_string(),
        "Hash-based Structures".to_string(),
    ]
}

/// Draft that passes validation against [`allowed_categories`]
pub fn valid_draft() -> ProposalDraft {
    ProposalDraft {
        title: "Stack".into(),
        definition: "LIFO collection".into(),
        characteristics: "Push and pop at one end".into(),
        visualization: String::new(),
        category: vec!["Linear Structures".into()],
        structure_type: Some(StructureType::Linear),
        operations: vec![Operation {
            name: "Insert".into(),
            description: "desc".into(),
            complexity: Complexity::new("O(1)", "O(1)"),
            implementations: vec![Implementation {
                language: "JS".into(),
                code: "x=1".into(),
                explanation: "e".into(),
                complexity: Complexity::new("O(1)", "O(1)"),
            }],
        }],
        full_implementations: vec![CodeBlock {
            language: "JS".into(),
            code: "class Stack {}".into(),
        }],
        applications: vec![Application {
            domain: "Compilers".into(),
            examples: vec!["Expression evaluation".into()],
        }],
        comparisons: vec![Comparison {
            with: "Queue".into(),
            advantages: vec!["Simple".into()],
            disadvantages: vec!["No random access".into()],
            when_to_use: "Undo history".into(),
        }],
        tags: vec!["lifo".into()],
        references: Vec::new(),
        video_links: Vec::new(),
        target_data_structure: None,
    }
}

/// Category source returning a fixed list, or failing
pub struct StaticCategories {
    result: Result<Vec<String>, StoreError>,
}

impl StaticCategories {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            result: Ok(categories),
        }
    }

    pub fn failing(error: StoreError) -> Self {
        Self { result: Err(error) }
    }
}

impl Default for StaticCategories {
    fn default() -> Self {
        Self::new(allowed_categories())
    }
}

#[async_trait::async_trait]
impl CategorySource for StaticCategories {
    async fn categories(&self) -> Result<Vec<String>, StoreError> {
        self.result.clone()
    }
}

/// Call observed by [`InMemoryStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch(String),
    FetchDataStructure(String),
    Create(ProposalDraft),
    Update(String, ProposalDraft),
}

/// Proposal store backed by maps, recording every call
///
/// Proposals and published data structures live in separate maps, keyed by
/// slug.
#[derive(Default)]
pub struct InMemoryStore {
    entities: Mutex<HashMap<String, SavedEntity>>,
    data_structures: Mutex<HashMap<String, SavedEntity>>,
    calls: Mutex<Vec<StoreCall>>,
    reject_with: Mutex<Option<StoreError>>,
    latency: Option<Duration>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call after `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed an existing proposal under its slug
    pub fn with_entity(self, slug: &str, draft: ProposalDraft) -> Self {
        let entity = seeded(format!("id-{slug}"), slug, draft);
        self.entities.lock().insert(slug.to_string(), entity);
        self
    }

    /// Seed a published data structure under its slug
    pub fn with_data_structure(self, slug: &str, draft: ProposalDraft) -> Self {
        let entity = seeded(format!("ds-{slug}"), slug, draft);
        self.data_structures.lock().insert(slug.to_string(), entity);
        self
    }

    /// Make create and update fail with `error` until cleared
    pub fn reject_with(&self, error: Option<StoreError>) {
        *self.reject_with.lock() = error;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Number of create and update calls
    pub fn write_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, StoreCall::Create(_) | StoreCall::Update(..)))
            .count()
    }

    pub fn entity(&self, slug: &str) -> Option<SavedEntity> {
        self.entities.lock().get(slug).cloned()
    }

    pub fn data_structure(&self, slug: &str) -> Option<SavedEntity> {
        self.data_structures.lock().get(slug).cloned()
    }

    async fn delay(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn write(&self, slug: String, draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
        if let Some(error) = self.reject_with.lock().clone() {
            return Err(error);
        }
        let entity = SavedEntity {
            id: format!("id-{slug}"),
            slug: Some(slug.clone()),
            draft: draft.clone(),
            updated_at: Some(chrono::Utc::now()),
        };
        self.entities.lock().insert(slug, entity.clone());
        Ok(entity)
    }
}

#[async_trait::async_trait]
impl ProposalStore for InMemoryStore {
    async fn fetch(&self, slug: &str) -> Result<SavedEntity, StoreError> {
        self.calls.lock().push(StoreCall::Fetch(slug.to_string()));
        self.delay().await;
        self.entity(slug)
            .ok_or_else(|| StoreError::NotFound(format!("proposal '{slug}'")))
    }

    async fn fetch_data_structure(&self, slug: &str) -> Result<SavedEntity, StoreError> {
        self.calls
            .lock()
            .push(StoreCall::FetchDataStructure(slug.to_string()));
        self.delay().await;
        self.data_structure(slug)
            .ok_or_else(|| StoreError::NotFound(format!("data structure '{slug}'")))
    }

    async fn create(&self, draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
        self.calls.lock().push(StoreCall::Create(draft.clone()));
        self.delay().await;
        self.write(slugify(&draft.title), draft)
    }

    async fn update(&self, slug: &str, draft: &ProposalDraft) -> Result<SavedEntity, StoreError> {
        self.calls
            .lock()
            .push(StoreCall::Update(slug.to_string(), draft.clone()));
        self.delay().await;
        if self.entity(slug).is_none() {
            return Err(StoreError::NotFound(format!("proposal '{slug}'")));
        }
        self.write(slug.to_string(), draft)
    }
}

fn seeded(id: String, slug: &str, draft: ProposalDraft) -> SavedEntity {
    SavedEntity {
        id,
        slug: Some(slug.to_string()),
        draft,
        updated_at: Some(chrono::Utc::now()),
    }
}

pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Notifier keeping every notification
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.sent
            .lock()
            .iter()
            .filter(|n| n.severity == severity)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().push(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Back,
    GoTo(String),
}

/// Navigator keeping every navigation
#[derive(Default)]
pub struct RecordingNavigator {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn back(&self) {
        self.events.lock().push(NavigationEvent::Back);
    }

    fn go_to(&self, path: &str) {
        self.events.lock().push(NavigationEvent::GoTo(path.to_string()));
    }
}

/// Context over recording doubles, with handles kept for assertions
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    pub ctx: EditorContext,
}

impl Harness {
    pub fn new(store: InMemoryStore) -> Self {
        Self::with_categories(StaticCategories::default(), store)
    }

    pub fn with_categories(categories: StaticCategories, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let ctx = EditorContext::new(
            Arc::new(categories),
            store.clone(),
            notifier.clone(),
            navigator.clone(),
        );
        Self {
            store,
            notifier,
            navigator,
            ctx,
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(InMemoryStore::new())
    }
}
