//! DSA Proposal Form
//!
//! Editing surface for proposal drafts.
//!
//! # Overview
//!
//! - **FormState**: owns the draft and a parallel error map keyed by [`FieldPath`]
//! - **Array editors**: add/remove/update entries, including nested sequences,
//!   without ever emptying a minimum-one sequence
//! - **validate**: pure walk that flags every blank required leaf
//! - **normalize**: trims strings and drops blank list entries before saving
//!
//! # Example
//!
//! ```rust
//! use dsa_form::{validate, FormState};
//! use dsa_model::{FieldPath, Item, ListField};
//!
//! let mut form = FormState::default();
//! form.set_field(&FieldPath::field("title"), "Stack").unwrap();
//! form.add_item(ListField::Tags, Item::from("lifo")).unwrap();
//!
//! // The last operation can never be removed
//! assert!(form.remove_item(ListField::Operations, 0).is_err());
//!
//! let report = validate(form.draft(), &["Linear Structures".to_string()]);
//! assert!(!report.is_valid());
//! ```
//!
//! [`FieldPath`]: dsa_model::FieldPath

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod container;
pub mod editors;
pub mod error;
pub mod labels;
pub mod normalize;
pub mod validation;

// Re-exports
pub use container::{ChangeListener, FormState};
pub use editors::{clamp_selection, Selection};
pub use error::EditError;
pub use labels::{field_label, missing_fields};
pub use normalize::{normalize, normalize_in_place};
pub use validation::{validate, ValidationReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for form editing
    pub use crate::{
        missing_fields, normalize, validate, EditError, FormState, Selection, ValidationReport,
    };
    pub use dsa_model::{FieldPath, FieldValue, Item, ListField, NestedListField, SequenceField};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
