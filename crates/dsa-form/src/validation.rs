//! Draft validation
//!
//! [`validate`] walks the draft top-down in a fixed field order and records
//! every required leaf that is blank after trimming. The walk never stops
//! early: callers aggregate all findings into one message.

use dsa_model::{FieldPath, ProposalDraft};
use indexmap::IndexSet;
use serde::Serialize;

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: IndexSet<FieldPath>,
}

impl ValidationReport {
    /// `true` iff no path was flagged
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Flagged paths in walk order
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexSet<FieldPath> {
        &self.errors
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.errors.contains(path)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

struct Walker<'a> {
    allowed_categories: &'a [String],
    errors: IndexSet<FieldPath>,
}

impl Walker<'_> {
    fn flag(&mut self, path: FieldPath) {
        self.errors.insert(path);
    }

    fn require(&mut self, path: FieldPath, value: &str) {
        if is_blank(value) {
            self.flag(path);
        }
    }

    /// At least one non-blank entry
    fn require_any(&mut self, path: FieldPath, values: &[String]) {
        if values.iter().all(|v| is_blank(v)) {
            self.flag(path);
        }
    }

    /// Sequence must not be empty; entries are checked by the caller
    fn require_entries<T>(&mut self, path: &FieldPath, values: &[T]) {
        if values.is_empty() {
            self.flag(path.clone());
        }
    }

    fn complexity(&mut self, at: &FieldPath, time: &str, space: &str) {
        let complexity = at.child("complexity");
        self.require(complexity.child("time"), time);
        self.require(complexity.child("space"), space);
    }

    fn walk(&mut self, draft: &ProposalDraft) {
        self.require(FieldPath::field("title"), &draft.title);
        self.require(FieldPath::field("definition"), &draft.definition);
        if draft.structure_type.is_none() {
            self.flag(FieldPath::field("type"));
        }
        self.require(FieldPath::field("characteristics"), &draft.characteristics);
        self.category(draft);

        let operations = FieldPath::field("operations");
        self.require_entries(&operations, &draft.operations);
        for (i, op) in draft.operations.iter().enumerate() {
            let at = operations.index(i);
            self.require(at.child("name"), &op.name);
            self.require(at.child("description"), &op.description);
            self.complexity(&at, &op.complexity.time, &op.complexity.space);

            let implementations = at.child("implementations");
            self.require_entries(&implementations, &op.implementations);
            for (j, imp) in op.implementations.iter().enumerate() {
                let at = implementations.index(j);
                self.require(at.child("language"), &imp.language);
                self.require(at.child("code"), &imp.code);
                self.require(at.child("explanation"), &imp.explanation);
                self.complexity(&at, &imp.complexity.time, &imp.complexity.space);
            }
        }

        let full = FieldPath::field("fullImplementations");
        self.require_entries(&full, &draft.full_implementations);
        for (i, block) in draft.full_implementations.iter().enumerate() {
            let at = full.index(i);
            self.require(at.child("language"), &block.language);
            self.require(at.child("code"), &block.code);
        }

        let applications = FieldPath::field("applications");
        self.require_entries(&applications, &draft.applications);
        for (i, app) in draft.applications.iter().enumerate() {
            let at = applications.index(i);
            self.require(at.child("domain"), &app.domain);
            self.require_any(at.child("examples"), &app.examples);
        }

        let comparisons = FieldPath::field("comparisons");
        self.require_entries(&comparisons, &draft.comparisons);
        for (i, cmp) in draft.comparisons.iter().enumerate() {
            let at = comparisons.index(i);
            self.require(at.child("with"), &cmp.with);
            self.require_any(at.child("advantages"), &cmp.advantages);
            self.require_any(at.child("disadvantages"), &cmp.disadvantages);
            self.require(at.child("whenToUse"), &cmp.when_to_use);
        }
    }

    // Unknown members are flagged, never removed.
    fn category(&mut self, draft: &ProposalDraft) {
        let category = FieldPath::field("category");
        self.require_any(category.clone(), &draft.category);
        for (i, member) in draft.category.iter().enumerate() {
            let member = member.trim();
            if !self.allowed_categories.iter().any(|a| a.trim() == member) {
                self.flag(category.index(i));
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a draft against the currently allowed categories
///
/// Pure: the draft is only read.
#[must_use]
pub fn validate(draft: &ProposalDraft, allowed_categories: &[String]) -> ValidationReport {
    let mut walker = Walker {
        allowed_categories,
        errors: IndexSet::new(),
    };
    walker.walk(draft);
    ValidationReport {
        errors: walker.errors,
    }
}
