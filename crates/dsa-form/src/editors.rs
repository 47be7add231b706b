//! Array and nested-array editors
//!
//! Structural operations over sequence fields of the draft, including the
//! sequences one level down (`operations[i].implementations`, ...). Removal
//! respects the minimum-one floor and keeps the error map and tab selection
//! pointing at live entries. Adding or replacing an entry clears the flag
//! recorded on the sequence as a whole.

use crate::container::FormState;
use crate::error::EditError;
use dsa_model::{Item, ListField, ModelError, NestedListField, SequenceField};

/// Tab selection for UIs that show one operation and one implementation at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Selected index into `operations`
    pub operation: usize,
    /// Selected index into the selected operation's `implementations`
    pub implementation: usize,
}

/// Clamp a selected index into a sequence of `len` entries
#[inline]
#[must_use]
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}

impl FormState {
    /// Append `item` to a root sequence
    ///
    /// # Errors
    /// Returns error if the item kind does not fit or, for `category`, the
    /// value is already present
    pub fn add_item(&mut self, field: ListField, item: Item) -> Result<(), EditError> {
        self.add_to(SequenceField::Top(field), item)
    }

    /// Remove element `index` of a root sequence
    ///
    /// # Errors
    /// Returns [`EditError::MinimumOne`] when the sequence has a floor of one
    /// and holds a single entry; the draft and error map are unchanged
    pub fn remove_item(&mut self, field: ListField, index: usize) -> Result<Item, EditError> {
        self.remove_from(SequenceField::Top(field), index)
    }

    /// Replace element `index` of a root sequence
    ///
    /// # Errors
    /// Returns error if `index` is out of range or the item kind does not fit
    pub fn update_item(&mut self, field: ListField, index: usize, item: Item) -> Result<(), EditError> {
        self.update_in(SequenceField::Top(field), index, item)
    }

    /// Append `item` to `field[outer].nested`
    ///
    /// # Errors
    /// Returns error if `nested` does not belong to `field` or `outer` is out of range
    pub fn add_nested_item(
        &mut self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        item: Item,
    ) -> Result<(), EditError> {
        let seq = nested_sequence(field, outer, nested)?;
        self.add_to(seq, item)
    }

    /// Remove element `index` of `field[outer].nested`
    ///
    /// # Errors
    /// Returns [`EditError::MinimumOne`] when the nested sequence holds a single entry
    pub fn remove_nested_item(
        &mut self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        index: usize,
    ) -> Result<Item, EditError> {
        let seq = nested_sequence(field, outer, nested)?;
        self.remove_from(seq, index)
    }

    /// Replace element `index` of `field[outer].nested`
    ///
    /// # Errors
    /// Returns error if either index is out of range or the item kind does not fit
    pub fn update_nested_item(
        &mut self,
        field: ListField,
        outer: usize,
        nested: NestedListField,
        index: usize,
        item: Item,
    ) -> Result<(), EditError> {
        let seq = nested_sequence(field, outer, nested)?;
        self.update_in(seq, index, item)
    }

    /// Append to any sequence
    ///
    /// # Errors
    /// See [`FormState::add_item`]
    pub fn add_to(&mut self, seq: SequenceField, item: Item) -> Result<(), EditError> {
        self.reject_duplicate_category(seq, None, &item)?;
        self.draft.push_item(seq, item)?;
        self.clear_sequence_flag(&seq.path());
        tracing::debug!(sequence = %seq, "item added");
        self.commit();
        Ok(())
    }

    /// Remove from any sequence
    ///
    /// # Errors
    /// See [`FormState::remove_item`]
    pub fn remove_from(&mut self, seq: SequenceField, index: usize) -> Result<Item, EditError> {
        let len = self.draft.sequence_len(seq)?;
        if seq.has_minimum_one() && len == 1 {
            tracing::warn!(sequence = %seq, "refusing to remove the last entry");
            return Err(EditError::MinimumOne { field: seq });
        }

        let removed = self.draft.remove_item(seq, index)?;
        self.reindex_errors_after_removal(&seq.path(), index);
        self.clamp_selection_after_removal(seq);
        tracing::debug!(sequence = %seq, index, "item removed");
        self.commit();
        Ok(removed)
    }

    /// Replace within any sequence
    ///
    /// # Errors
    /// See [`FormState::update_item`]
    pub fn update_in(&mut self, seq: SequenceField, index: usize, item: Item) -> Result<(), EditError> {
        self.reject_duplicate_category(seq, Some(index), &item)?;
        self.draft.replace_item(seq, index, item)?;
        self.clear_errors_under(&seq.element_path(index));
        self.clear_sequence_flag(&seq.path());
        tracing::debug!(sequence = %seq, index, "item updated");
        self.commit();
        Ok(())
    }

    /// Current tab selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Select an operation tab; resets the implementation tab
    ///
    /// # Errors
    /// Returns error if `index` is out of range
    pub fn select_operation(&mut self, index: usize) -> Result<(), EditError> {
        let len = self.draft.operations.len();
        if index >= len {
            return Err(out_of_range("operations", index, len));
        }
        self.selection = Selection {
            operation: index,
            implementation: 0,
        };
        Ok(())
    }

    /// Select an implementation tab of the selected operation
    ///
    /// # Errors
    /// Returns error if `index` is out of range
    pub fn select_implementation(&mut self, index: usize) -> Result<(), EditError> {
        let seq = SequenceField::nested(NestedListField::Implementations, self.selection.operation);
        let len = self.draft.sequence_len(seq)?;
        if index >= len {
            return Err(out_of_range(&seq.to_string(), index, len));
        }
        self.selection.implementation = index;
        Ok(())
    }

    fn clamp_selection_after_removal(&mut self, seq: SequenceField) {
        match seq {
            SequenceField::Top(ListField::Operations) => {
                self.selection.operation =
                    clamp_selection(self.selection.operation, self.draft.operations.len());
                let impls = self
                    .draft
                    .operations
                    .get(self.selection.operation)
                    .map_or(0, |op| op.implementations.len());
                self.selection.implementation = clamp_selection(self.selection.implementation, impls);
            }
            SequenceField::Nested {
                field: NestedListField::Implementations,
                outer,
            } if outer == self.selection.operation => {
                let impls = self.draft.operations[outer].implementations.len();
                self.selection.implementation = clamp_selection(self.selection.implementation, impls);
            }
            _ => {}
        }
    }

    fn reject_duplicate_category(
        &self,
        seq: SequenceField,
        replacing: Option<usize>,
        item: &Item,
    ) -> Result<(), EditError> {
        let (SequenceField::Top(ListField::Category), Some(value)) = (seq, item.as_text()) else {
            return Ok(());
        };
        let value = value.trim();
        let duplicate = self
            .draft
            .category
            .iter()
            .enumerate()
            .any(|(i, existing)| Some(i) != replacing && existing.trim() == value);
        if duplicate {
            return Err(EditError::DuplicateEntry {
                field: seq,
                value: value.to_string(),
            });
        }
        Ok(())
    }
}

fn nested_sequence(
    field: ListField,
    outer: usize,
    nested: NestedListField,
) -> Result<SequenceField, EditError> {
    if nested.parent() != field {
        return Err(ModelError::NotNested {
            outer: field.name().to_string(),
            nested: nested.name().to_string(),
        }
        .into());
    }
    Ok(SequenceField::nested(nested, outer))
}

fn out_of_range(field: &str, index: usize, len: usize) -> EditError {
    ModelError::IndexOutOfRange {
        field: field.to_string(),
        index,
        len,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_model::{FieldPath, Operation, ProposalDraft};
    use pretty_assertions::assert_eq;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    fn named_op(name: &str) -> Item {
        let mut op = Operation::empty();
        op.name = name.to_string();
        Item::Operation(op)
    }

    fn form_with_ops(count: usize) -> FormState {
        let mut form = FormState::default();
        for i in 1..count {
            form.add_item(ListField::Operations, named_op(&format!("op{i}"))).unwrap();
        }
        form
    }

    #[test]
    fn removing_last_operation_is_rejected() {
        let mut form = FormState::default();
        form.set_errors([path("operations[0].name")].into_iter().collect());
        let before = form.draft().clone();

        let result = form.remove_item(ListField::Operations, 0);

        assert!(matches!(result, Err(EditError::MinimumOne { .. })));
        assert_eq!(form.draft(), &before);
        assert!(form.has_error(&path("operations[0].name")));
        assert_eq!(form.revision(), 0);
    }

    #[test]
    fn optional_sequences_may_become_empty() {
        let mut form = FormState::default();
        form.add_item(ListField::Tags, Item::from("lifo")).unwrap();
        form.remove_item(ListField::Tags, 0).unwrap();
        assert!(form.draft().tags.is_empty());
    }

    #[test]
    fn removal_drops_and_shifts_error_flags() {
        let mut form = form_with_ops(3);
        form.set_errors(
            [
                path("operations[0].name"),
                path("operations[1].description"),
                path("operations[2].implementations[0].code"),
                path("title"),
            ]
            .into_iter()
            .collect(),
        );

        form.remove_item(ListField::Operations, 1).unwrap();

        let errors: Vec<String> = form.errors().iter().map(ToString::to_string).collect();
        assert_eq!(
            errors,
            vec![
                "operations[0].name",
                "operations[1].implementations[0].code",
                "title",
            ]
        );
    }

    #[test]
    fn update_clears_flags_under_element() {
        let mut form = form_with_ops(2);
        form.set_errors(
            [path("operations[1].name"), path("operations[0].name")]
                .into_iter()
                .collect(),
        );

        form.update_item(ListField::Operations, 1, named_op("Pop")).unwrap();

        assert!(!form.has_error(&path("operations[1].name")));
        assert!(form.has_error(&path("operations[0].name")));
    }

    #[test]
    fn fixing_an_entry_clears_the_list_flag() {
        let mut form = FormState::default();
        form.validate_into(&[]);
        for flagged in [
            "applications[0].examples",
            "comparisons[0].advantages",
            "comparisons[0].disadvantages",
            "category",
        ] {
            assert!(form.has_error(&path(flagged)), "{flagged}");
        }

        form.update_nested_item(ListField::Applications, 0, NestedListField::Examples, 0, Item::from("routers"))
            .unwrap();
        form.update_nested_item(
            ListField::Comparisons,
            0,
            NestedListField::Disadvantages,
            0,
            Item::from("no random access"),
        )
        .unwrap();
        form.add_item(ListField::Category, Item::from("Trees")).unwrap();

        assert!(!form.has_error(&path("applications[0].examples")));
        assert!(!form.has_error(&path("comparisons[0].disadvantages")));
        assert!(!form.has_error(&path("category")));
        assert!(form.has_error(&path("comparisons[0].advantages")));
        assert!(form.has_error(&path("applications[0].domain")));
    }

    #[test]
    fn adding_an_entry_clears_the_list_flag() {
        let mut form = FormState::default();
        form.validate_into(&[]);

        form.add_nested_item(ListField::Comparisons, 0, NestedListField::Advantages, Item::from("fast"))
            .unwrap();

        assert!(!form.has_error(&path("comparisons[0].advantages")));
        assert!(form.has_error(&path("comparisons[0].disadvantages")));
    }

    #[test]
    fn replacing_an_unknown_category_clears_its_flags() {
        let mut form = FormState::default();
        form.add_item(ListField::Category, Item::from("Blockchains")).unwrap();
        form.set_errors([path("category"), path("category[0]")].into_iter().collect());

        form.update_item(ListField::Category, 0, Item::from("Trees")).unwrap();

        assert!(form.errors().is_empty());
    }

    #[test]
    fn list_flags_stay_when_clearing_is_disabled() {
        let mut form = FormState::default().with_error_clearing(false);
        form.validate_into(&[]);

        form.add_item(ListField::Category, Item::from("Trees")).unwrap();

        assert!(form.has_error(&path("category")));
    }

    #[test]
    fn update_twice_equals_once() {
        let mut once = form_with_ops(2);
        once.update_item(ListField::Operations, 0, named_op("Peek")).unwrap();

        let mut twice = form_with_ops(2);
        twice.update_item(ListField::Operations, 0, named_op("Peek")).unwrap();
        twice.update_item(ListField::Operations, 0, named_op("Peek")).unwrap();

        assert_eq!(once.draft(), twice.draft());
    }

    #[test]
    fn nested_implementation_floor() {
        let mut form = FormState::default();
        let result = form.remove_nested_item(
            ListField::Operations,
            0,
            NestedListField::Implementations,
            0,
        );
        assert!(matches!(result, Err(EditError::MinimumOne { .. })));

        form.add_nested_item(
            ListField::Operations,
            0,
            NestedListField::Implementations,
            SequenceField::nested(NestedListField::Implementations, 0).blank_item(),
        )
        .unwrap();
        form.remove_nested_item(ListField::Operations, 0, NestedListField::Implementations, 0)
            .unwrap();
        assert_eq!(form.draft().operations[0].implementations.len(), 1);
    }

    #[test]
    fn nested_field_must_belong_to_outer() {
        let mut form = FormState::default();
        let result = form.add_nested_item(
            ListField::Operations,
            0,
            NestedListField::Examples,
            Item::from("x"),
        );
        assert!(matches!(result, Err(EditError::Model(ModelError::NotNested { .. }))));
    }

    #[test]
    fn nested_examples_update_and_remove() {
        let mut form = FormState::default();
        form.add_nested_item(ListField::Applications, 0, NestedListField::Examples, Item::from("routers"))
            .unwrap();
        form.update_nested_item(
            ListField::Applications,
            0,
            NestedListField::Examples,
            0,
            Item::from("schedulers"),
        )
        .unwrap();
        form.remove_nested_item(ListField::Applications, 0, NestedListField::Examples, 1)
            .unwrap();

        assert_eq!(form.draft().applications[0].examples, vec!["schedulers"]);
    }

    #[test]
    fn selection_clamps_when_removing_selected_tail() {
        let mut form = form_with_ops(3);
        form.select_operation(2).unwrap();

        form.remove_item(ListField::Operations, 2).unwrap();

        assert_eq!(form.selection().operation, 1);
    }

    #[test]
    fn selection_clamps_implementation_tab() {
        let mut form = FormState::default();
        let impls = SequenceField::nested(NestedListField::Implementations, 0);
        form.add_to(impls, impls.blank_item()).unwrap();
        form.select_implementation(1).unwrap();

        form.remove_from(impls, 0).unwrap();

        assert_eq!(form.selection().implementation, 0);
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut form = FormState::default();
        assert!(form.select_operation(1).is_err());
        assert!(form.select_implementation(3).is_err());
    }

    #[test]
    fn duplicate_category_is_rejected() {
        let mut form = FormState::new(ProposalDraft::skeleton());
        form.add_item(ListField::Category, Item::from("Trees")).unwrap();

        let result = form.add_item(ListField::Category, Item::from(" Trees "));
        assert!(matches!(result, Err(EditError::DuplicateEntry { .. })));

        form.update_item(ListField::Category, 0, Item::from("Trees")).unwrap();
        assert_eq!(form.draft().category, vec!["Trees"]);
    }

    #[test]
    fn clamp_selection_bounds() {
        assert_eq!(clamp_selection(5, 3), 2);
        assert_eq!(clamp_selection(1, 3), 1);
        assert_eq!(clamp_selection(4, 0), 0);
    }
}
