//! DSA Proposal Model
//!
//! Typed proposal drafts with structured, path-addressed fields.
//!
//! # Core Concepts
//!
//! - [`ProposalDraft`]: Root record of a data-structure proposal
//! - [`FieldPath`]: Value-compared address of a field (`operations[2].implementations[1].language`)
//! - [`SequenceField`]: Names a sequence, top level or nested one level down
//! - [`FieldValue`]: What path-addressed reads return and writes accept
//!
//! # Example
//!
//! ```rust
//! use dsa_model::{FieldPath, FieldValue, ProposalDraft};
//!
//! let mut draft = ProposalDraft::skeleton();
//! let path: FieldPath = "operations[0].implementations[0].language".parse().unwrap();
//! draft.set(&path, FieldValue::from("Rust")).unwrap();
//!
//! assert_eq!(draft.operations[0].implementations[0].language, "Rust");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod draft;
mod lens;
mod path;
mod sequence;

// Re-exports
pub use draft::{
    Application, CodeBlock, Comparison, Complexity, Implementation, ModelError, Operation,
    ProposalDraft, StructureType,
};
pub use lens::FieldValue;
pub use path::{FieldPath, PathError, Segment, FIELD_NAMES};
pub use sequence::{Item, ListField, NestedListField, SequenceField};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn sequence_edit_then_path_write() {
        let mut draft = ProposalDraft::skeleton();
        let impls = SequenceField::nested(NestedListField::Implementations, 0);
        draft.push_item(impls, impls.blank_item()).unwrap();

        let path = impls.element_path(1).child("code");
        draft.set(&path, FieldValue::from("fn push() {}")).unwrap();

        assert_eq!(draft.operations[0].implementations.len(), 2);
        assert_eq!(
            draft.get(&path).unwrap(),
            FieldValue::Text("fn push() {}".to_string())
        );
    }
}
