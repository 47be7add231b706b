//! Sequence-valued fields and structural operations on them
//!
//! [`SequenceField`] names every sequence in the draft tree, top level or one
//! level down. The draft methods here apply raw structural changes; the
//! minimum-one floor and error-map upkeep live in the form container.

use crate::draft::{Application, CodeBlock, Comparison, Implementation, ModelError, Operation, ProposalDraft};
use crate::path::FieldPath;
use std::fmt::{self, Display, Formatter};

/// Sequence fields at the root of the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Operations,
    FullImplementations,
    Applications,
    Comparisons,
    Category,
    Tags,
    References,
    VideoLinks,
}

impl ListField {
    /// Field name as it appears in paths and JSON
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Operations => "operations",
            Self::FullImplementations => "fullImplementations",
            Self::Applications => "applications",
            Self::Comparisons => "comparisons",
            Self::Category => "category",
            Self::Tags => "tags",
            Self::References => "references",
            Self::VideoLinks => "videoLinks",
        }
    }
}

/// Sequence fields one level below a root sequence element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedListField {
    /// `operations[i].implementations`
    Implementations,
    /// `applications[i].examples`
    Examples,
    /// `comparisons[i].advantages`
    Advantages,
    /// `comparisons[i].disadvantages`
    Disadvantages,
}

impl NestedListField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Implementations => "implementations",
            Self::Examples => "examples",
            Self::Advantages => "advantages",
            Self::Disadvantages => "disadvantages",
        }
    }

    /// Root sequence whose elements carry this field
    #[must_use]
    pub fn parent(&self) -> ListField {
        match self {
            Self::Implementations => ListField::Operations,
            Self::Examples => ListField::Applications,
            Self::Advantages | Self::Disadvantages => ListField::Comparisons,
        }
    }
}

/// Any sequence in the draft tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceField {
    Top(ListField),
    Nested { field: NestedListField, outer: usize },
}

impl SequenceField {
    /// Nested sequence under element `outer` of its parent
    #[inline]
    #[must_use]
    pub fn nested(field: NestedListField, outer: usize) -> Self {
        Self::Nested { field, outer }
    }

    /// Path of the sequence itself
    #[must_use]
    pub fn path(&self) -> FieldPath {
        match self {
            Self::Top(field) => FieldPath::field(field.name()),
            Self::Nested { field, outer } => FieldPath::field(field.parent().name())
                .index(*outer)
                .child(field.name()),
        }
    }

    /// Path of element `index` of the sequence
    #[inline]
    #[must_use]
    pub fn element_path(&self, index: usize) -> FieldPath {
        self.path().index(index)
    }

    /// Whether removal must keep at least one entry
    #[must_use]
    pub fn has_minimum_one(&self) -> bool {
        match self {
            Self::Top(field) => matches!(
                field,
                ListField::Operations
                    | ListField::FullImplementations
                    | ListField::Applications
                    | ListField::Comparisons
            ),
            Self::Nested { .. } => true,
        }
    }

    /// Kind of entry the sequence holds
    #[must_use]
    pub fn item_kind(&self) -> &'static str {
        match self {
            Self::Top(ListField::Operations) => Operation::KIND,
            Self::Top(ListField::FullImplementations) => CodeBlock::KIND,
            Self::Top(ListField::Applications) => Application::KIND,
            Self::Top(ListField::Comparisons) => Comparison::KIND,
            Self::Nested {
                field: NestedListField::Implementations,
                ..
            } => Implementation::KIND,
            _ => String::KIND,
        }
    }

    /// Blank entry of the right kind, as appended by an "add" control
    #[must_use]
    pub fn blank_item(&self) -> Item {
        match self {
            Self::Top(ListField::Operations) => Item::Operation(Operation::empty()),
            Self::Top(ListField::FullImplementations) => Item::CodeBlock(CodeBlock::empty()),
            Self::Top(ListField::Applications) => Item::Application(Application::empty()),
            Self::Top(ListField::Comparisons) => Item::Comparison(Comparison::empty()),
            Self::Nested {
                field: NestedListField::Implementations,
                ..
            } => Item::Implementation(Implementation::empty()),
            _ => Item::Text(String::new()),
        }
    }
}

impl Display for SequenceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl From<ListField> for SequenceField {
    fn from(field: ListField) -> Self {
        Self::Top(field)
    }
}

/// Value stored in, or destined for, a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Operation(Operation),
    Implementation(Implementation),
    CodeBlock(CodeBlock),
    Application(Application),
    Comparison(Comparison),
    Text(String),
}

impl Item {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Operation(_) => Operation::KIND,
            Self::Implementation(_) => Implementation::KIND,
            Self::CodeBlock(_) => CodeBlock::KIND,
            Self::Application(_) => Application::KIND,
            Self::Comparison(_) => Comparison::KIND,
            Self::Text(_) => String::KIND,
        }
    }

    /// Text payload, if this is a string entry
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for Item {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Conversion between a sequence element type and [`Item`]
trait SequenceItem: Sized + Clone {
    const KIND: &'static str;

    fn from_item(item: Item) -> Option<Self>;

    fn into_item(self) -> Item;
}

macro_rules! sequence_item {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl SequenceItem for $ty {
            const KIND: &'static str = $kind;

            fn from_item(item: Item) -> Option<Self> {
                match item {
                    Item::$variant(value) => Some(value),
                    _ => None,
                }
            }

            fn into_item(self) -> Item {
                Item::$variant(self)
            }
        }
    };
}

sequence_item!(Operation, Operation, "operation");
sequence_item!(Implementation, Implementation, "implementation");
sequence_item!(CodeBlock, CodeBlock, "code block");
sequence_item!(Application, Application, "application");
sequence_item!(Comparison, Comparison, "comparison");
sequence_item!(String, Text, "text");

enum SeqOp {
    Push(Item),
    Remove(usize),
    Replace(usize, Item),
}

fn apply_op<T: SequenceItem>(
    field: SequenceField,
    seq: &mut Vec<T>,
    op: SeqOp,
) -> Result<Option<Item>, ModelError> {
    let check_index = |index: usize, len: usize| {
        if index < len {
            Ok(())
        } else {
            Err(ModelError::IndexOutOfRange {
                field: field.to_string(),
                index,
                len,
            })
        }
    };
    let convert = |item: Item| {
        let actual = item.kind();
        T::from_item(item).ok_or_else(|| ModelError::ItemKindMismatch {
            field: field.to_string(),
            expected: T::KIND,
            actual,
        })
    };

    match op {
        SeqOp::Push(item) => {
            seq.push(convert(item)?);
            Ok(None)
        }
        SeqOp::Remove(index) => {
            check_index(index, seq.len())?;
            Ok(Some(seq.remove(index).into_item()))
        }
        SeqOp::Replace(index, item) => {
            check_index(index, seq.len())?;
            let value = convert(item)?;
            Ok(Some(std::mem::replace(&mut seq[index], value).into_item()))
        }
    }
}

/// Bind `$seq` to the concrete vector behind `$field` and evaluate `$body`.
macro_rules! with_sequence {
    ($draft:expr, $field:expr, |$seq:ident| $body:expr) => {{
        let field: SequenceField = $field;
        let outer_missing = |outer: usize, len: usize| ModelError::IndexOutOfRange {
            field: field.path().parent().map(|p| p.to_string()).unwrap_or_default(),
            index: outer,
            len,
        };
        match field {
            SequenceField::Top(ListField::Operations) => {
                let $seq = &mut $draft.operations;
                $body
            }
            SequenceField::Top(ListField::FullImplementations) => {
                let $seq = &mut $draft.full_implementations;
                $body
            }
            SequenceField::Top(ListField::Applications) => {
                let $seq = &mut $draft.applications;
                $body
            }
            SequenceField::Top(ListField::Comparisons) => {
                let $seq = &mut $draft.comparisons;
                $body
            }
            SequenceField::Top(ListField::Category) => {
                let $seq = &mut $draft.category;
                $body
            }
            SequenceField::Top(ListField::Tags) => {
                let $seq = &mut $draft.tags;
                $body
            }
            SequenceField::Top(ListField::References) => {
                let $seq = &mut $draft.references;
                $body
            }
            SequenceField::Top(ListField::VideoLinks) => {
                let $seq = &mut $draft.video_links;
                $body
            }
            SequenceField::Nested { field: NestedListField::Implementations, outer } => {
                let len = $draft.operations.len();
                let $seq = &mut $draft
                    .operations
                    .get_mut(outer)
                    .ok_or_else(|| outer_missing(outer, len))?
                    .implementations;
                $body
            }
            SequenceField::Nested { field: NestedListField::Examples, outer } => {
                let len = $draft.applications.len();
                let $seq = &mut $draft
                    .applications
                    .get_mut(outer)
                    .ok_or_else(|| outer_missing(outer, len))?
                    .examples;
                $body
            }
            SequenceField::Nested { field: NestedListField::Advantages, outer } => {
                let len = $draft.comparisons.len();
                let $seq = &mut $draft
                    .comparisons
                    .get_mut(outer)
                    .ok_or_else(|| outer_missing(outer, len))?
                    .advantages;
                $body
            }
            SequenceField::Nested { field: NestedListField::Disadvantages, outer } => {
                let len = $draft.comparisons.len();
                let $seq = &mut $draft
                    .comparisons
                    .get_mut(outer)
                    .ok_or_else(|| outer_missing(outer, len))?
                    .disadvantages;
                $body
            }
        }
    }};
}

impl ProposalDraft {
    /// Current length of a sequence
    ///
    /// # Errors
    /// Returns error if a nested sequence's outer index is out of range
    pub fn sequence_len(&self, field: SequenceField) -> Result<usize, ModelError> {
        let outer_len = |len: usize, outer: usize| ModelError::IndexOutOfRange {
            field: field.path().parent().map(|p| p.to_string()).unwrap_or_default(),
            index: outer,
            len,
        };
        Ok(match field {
            SequenceField::Top(ListField::Operations) => self.operations.len(),
            SequenceField::Top(ListField::FullImplementations) => self.full_implementations.len(),
            SequenceField::Top(ListField::Applications) => self.applications.len(),
            SequenceField::Top(ListField::Comparisons) => self.comparisons.len(),
            SequenceField::Top(ListField::Category) => self.category.len(),
            SequenceField::Top(ListField::Tags) => self.tags.len(),
            SequenceField::Top(ListField::References) => self.references.len(),
            SequenceField::Top(ListField::VideoLinks) => self.video_links.len(),
            SequenceField::Nested { field: nested, outer } => match nested {
                NestedListField::Implementations => self
                    .operations
                    .get(outer)
                    .map(|o| o.implementations.len())
                    .ok_or_else(|| outer_len(self.operations.len(), outer))?,
                NestedListField::Examples => self
                    .applications
                    .get(outer)
                    .map(|a| a.examples.len())
                    .ok_or_else(|| outer_len(self.applications.len(), outer))?,
                NestedListField::Advantages => self
                    .comparisons
                    .get(outer)
                    .map(|c| c.advantages.len())
                    .ok_or_else(|| outer_len(self.comparisons.len(), outer))?,
                NestedListField::Disadvantages => self
                    .comparisons
                    .get(outer)
                    .map(|c| c.disadvantages.len())
                    .ok_or_else(|| outer_len(self.comparisons.len(), outer))?,
            },
        })
    }

    /// Append an entry to a sequence
    ///
    /// # Errors
    /// Returns error if the item kind does not fit the sequence
    pub fn push_item(&mut self, field: SequenceField, item: Item) -> Result<(), ModelError> {
        with_sequence!(self, field, |seq| apply_op(field, seq, SeqOp::Push(item)))?;
        Ok(())
    }

    /// Remove and return the entry at `index`
    ///
    /// # Errors
    /// Returns error if `index` is out of range
    pub fn remove_item(&mut self, field: SequenceField, index: usize) -> Result<Item, ModelError> {
        let removed = with_sequence!(self, field, |seq| apply_op(field, seq, SeqOp::Remove(index)))?;
        removed.ok_or(ModelError::IndexOutOfRange {
            field: field.to_string(),
            index,
            len: 0,
        })
    }

    /// Replace the entry at `index`, returning the previous value
    ///
    /// # Errors
    /// Returns error if `index` is out of range or the item kind does not fit
    pub fn replace_item(
        &mut self,
        field: SequenceField,
        index: usize,
        item: Item,
    ) -> Result<Item, ModelError> {
        let previous =
            with_sequence!(self, field, |seq| apply_op(field, seq, SeqOp::Replace(index, item)))?;
        previous.ok_or(ModelError::IndexOutOfRange {
            field: field.to_string(),
            index,
            len: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_paths() {
        assert_eq!(SequenceField::Top(ListField::Operations).path().to_string(), "operations");
        assert_eq!(
            SequenceField::nested(NestedListField::Implementations, 2)
                .element_path(1)
                .to_string(),
            "operations[2].implementations[1]"
        );
        assert_eq!(
            SequenceField::nested(NestedListField::Disadvantages, 0).to_string(),
            "comparisons[0].disadvantages"
        );
    }

    #[test]
    fn minimum_one_fields() {
        assert!(SequenceField::Top(ListField::Operations).has_minimum_one());
        assert!(SequenceField::Top(ListField::Comparisons).has_minimum_one());
        assert!(SequenceField::nested(NestedListField::Examples, 0).has_minimum_one());
        assert!(!SequenceField::Top(ListField::Tags).has_minimum_one());
        assert!(!SequenceField::Top(ListField::Category).has_minimum_one());
    }

    #[test]
    fn push_remove_replace_top_level() {
        let mut draft = ProposalDraft::skeleton();
        let ops = SequenceField::Top(ListField::Operations);

        draft.push_item(ops, ops.blank_item()).unwrap();
        assert_eq!(draft.sequence_len(ops).unwrap(), 2);

        let mut named = Operation::empty();
        named.name = "Push".into();
        draft.replace_item(ops, 1, Item::Operation(named.clone())).unwrap();
        assert_eq!(draft.operations[1], named);

        let removed = draft.remove_item(ops, 0).unwrap();
        assert_eq!(removed, Item::Operation(Operation::empty()));
        assert_eq!(draft.operations, vec![named]);
    }

    #[test]
    fn nested_operations_address_outer_element() {
        let mut draft = ProposalDraft::skeleton();
        let examples = SequenceField::nested(NestedListField::Examples, 0);

        draft.push_item(examples, Item::from("compilers")).unwrap();
        assert_eq!(draft.applications[0].examples, vec!["", "compilers"]);

        let missing = SequenceField::nested(NestedListField::Examples, 5);
        assert!(matches!(
            draft.push_item(missing, Item::from("x")),
            Err(ModelError::IndexOutOfRange { index: 5, len: 1, .. })
        ));
        assert!(draft.sequence_len(missing).is_err());
    }

    #[test]
    fn wrong_item_kind_is_rejected() {
        let mut draft = ProposalDraft::skeleton();
        let result = draft.push_item(
            SequenceField::Top(ListField::Operations),
            Item::from("not an operation"),
        );
        assert!(matches!(
            result,
            Err(ModelError::ItemKindMismatch { expected: "operation", actual: "text", .. })
        ));
        assert_eq!(draft.operations.len(), 1);
    }

    #[test]
    fn remove_out_of_range() {
        let mut draft = ProposalDraft::skeleton();
        let result = draft.remove_item(SequenceField::Top(ListField::Tags), 0);
        assert!(matches!(result, Err(ModelError::IndexOutOfRange { len: 0, .. })));
    }
}
