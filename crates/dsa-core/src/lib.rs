//! DSA Core - Proposal editor session
//!
//! Ties a form to its collaborators:
//! - Loads allowed categories and, when editing, the existing proposal
//! - Routes structural-edit rejections to the notifier as warnings
//! - Runs the save pipeline: validate, normalize, persist, notify
//! - Keeps at most one submit in flight per editor
//!
//! # Example
//!
//! ```rust,ignore
//! use dsa_core::{EditorConfig, EditorContext, ProposalEditor, SaveTarget};
//!
//! # async fn example(ctx: EditorContext) -> Result<(), Box<dyn std::error::Error>> {
//! let editor = ProposalEditor::open(ctx, EditorConfig::new(), SaveTarget::Create).await?;
//! editor.set_field(&"title".parse()?, "Binary Heap")?;
//!
//! let outcome = editor.submit().await?;
//! println!("saved: {}", outcome.is_saved());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod collaborators;
pub mod editor;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenience
pub use collaborators::{
    CategorySource, EditorContext, Navigator, NoopNavigator, Notifier, ProposalStore,
    TracingNotifier,
};
pub use editor::ProposalEditor;
pub use error::{EditorError, LoadTarget, StoreError};
pub use pipeline::SavePipeline;
pub use types::{
    EditorConfig, Notification, SaveTarget, SavedEntity, SessionId, Severity, SubmitOutcome,
    GENERIC_FAILURE_MESSAGE, MISSING_FIELDS_PREFIX,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving an editor session
    pub use crate::{
        CategorySource, EditorConfig, EditorContext, EditorError, Navigator, Notification,
        Notifier, ProposalEditor, ProposalStore, SaveTarget, SavedEntity, Severity, StoreError,
        SubmitOutcome,
    };
    pub use dsa_form::prelude::*;
    pub use dsa_model::ProposalDraft;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
