//! Path-addressed reads and writes
//!
//! [`ProposalDraft::get`] and [`ProposalDraft::set`] resolve a [`FieldPath`]
//! against the typed tree. Each record resolves the part of the path relative
//! to itself, so nesting depth never leaks into the root dispatcher.

use crate::draft::{
    Application, CodeBlock, Comparison, Complexity, Implementation, Operation, ProposalDraft,
    StructureType,
};
use crate::path::{FieldPath, PathError, Segment};

/// Value read from or written to a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// String leaf, or one entry of a string sequence
    Text(String),
    /// Whole string sequence (`category`, `examples`, `tags`, ...)
    List(Vec<String>),
    /// The draft's `type`
    Type(Option<StructureType>),
}

impl FieldValue {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Type(_) => "type",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<StructureType> for FieldValue {
    fn from(value: StructureType) -> Self {
        Self::Type(Some(value))
    }
}

/// Record that resolves paths relative to itself
trait Addressable {
    fn text(&self, rel: &[Segment]) -> Option<&String>;

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String>;

    fn list(&self, _rel: &[Segment]) -> Option<&Vec<String>> {
        None
    }

    fn list_mut(&mut self, _rel: &[Segment]) -> Option<&mut Vec<String>> {
        None
    }
}

/// Implement [`Addressable`] for records with plain string leaves, optionally
/// with a nested [`Complexity`] under `complexity`.
macro_rules! string_leaves {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl Addressable for $ty {
            fn text(&self, rel: &[Segment]) -> Option<&String> {
                match rel {
                    $([Segment::Field($name)] => Some(&self.$field),)*
                    _ => None,
                }
            }

            fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
                match rel {
                    $([Segment::Field($name)] => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

string_leaves!(Complexity { "time" => time, "space" => space });
string_leaves!(CodeBlock { "language" => language, "code" => code });

impl Addressable for Implementation {
    fn text(&self, rel: &[Segment]) -> Option<&String> {
        match rel {
            [Segment::Field("language")] => Some(&self.language),
            [Segment::Field("code")] => Some(&self.code),
            [Segment::Field("explanation")] => Some(&self.explanation),
            [Segment::Field("complexity"), rest @ ..] => self.complexity.text(rest),
            _ => None,
        }
    }

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
        match rel {
            [Segment::Field("language")] => Some(&mut self.language),
            [Segment::Field("code")] => Some(&mut self.code),
            [Segment::Field("explanation")] => Some(&mut self.explanation),
            [Segment::Field("complexity"), rest @ ..] => self.complexity.text_mut(rest),
            _ => None,
        }
    }
}

impl Addressable for Operation {
    fn text(&self, rel: &[Segment]) -> Option<&String> {
        match rel {
            [Segment::Field("name")] => Some(&self.name),
            [Segment::Field("description")] => Some(&self.description),
            [Segment::Field("complexity"), rest @ ..] => self.complexity.text(rest),
            [Segment::Field("implementations"), Segment::Index(i), rest @ ..] => {
                self.implementations.get(*i)?.text(rest)
            }
            _ => None,
        }
    }

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
        match rel {
            [Segment::Field("name")] => Some(&mut self.name),
            [Segment::Field("description")] => Some(&mut self.description),
            [Segment::Field("complexity"), rest @ ..] => self.complexity.text_mut(rest),
            [Segment::Field("implementations"), Segment::Index(i), rest @ ..] => {
                self.implementations.get_mut(*i)?.text_mut(rest)
            }
            _ => None,
        }
    }
}

impl Addressable for Application {
    fn text(&self, rel: &[Segment]) -> Option<&String> {
        match rel {
            [Segment::Field("domain")] => Some(&self.domain),
            [Segment::Field("examples"), Segment::Index(i)] => self.examples.get(*i),
            _ => None,
        }
    }

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
        match rel {
            [Segment::Field("domain")] => Some(&mut self.domain),
            [Segment::Field("examples"), Segment::Index(i)] => self.examples.get_mut(*i),
            _ => None,
        }
    }

    fn list(&self, rel: &[Segment]) -> Option<&Vec<String>> {
        match rel {
            [Segment::Field("examples")] => Some(&self.examples),
            _ => None,
        }
    }

    fn list_mut(&mut self, rel: &[Segment]) -> Option<&mut Vec<String>> {
        match rel {
            [Segment::Field("examples")] => Some(&mut self.examples),
            _ => None,
        }
    }
}

impl Addressable for Comparison {
    fn text(&self, rel: &[Segment]) -> Option<&String> {
        match rel {
            [Segment::Field("with")] => Some(&self.with),
            [Segment::Field("whenToUse")] => Some(&self.when_to_use),
            [Segment::Field("advantages"), Segment::Index(i)] => self.advantages.get(*i),
            [Segment::Field("disadvantages"), Segment::Index(i)] => self.disadvantages.get(*i),
            _ => None,
        }
    }

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
        match rel {
            [Segment::Field("with")] => Some(&mut self.with),
            [Segment::Field("whenToUse")] => Some(&mut self.when_to_use),
            [Segment::Field("advantages"), Segment::Index(i)] => self.advantages.get_mut(*i),
            [Segment::Field("disadvantages"), Segment::Index(i)] => {
                self.disadvantages.get_mut(*i)
            }
            _ => None,
        }
    }

    fn list(&self, rel: &[Segment]) -> Option<&Vec<String>> {
        match rel {
            [Segment::Field("advantages")] => Some(&self.advantages),
            [Segment::Field("disadvantages")] => Some(&self.disadvantages),
            _ => None,
        }
    }

    fn list_mut(&mut self, rel: &[Segment]) -> Option<&mut Vec<String>> {
        match rel {
            [Segment::Field("advantages")] => Some(&mut self.advantages),
            [Segment::Field("disadvantages")] => Some(&mut self.disadvantages),
            _ => None,
        }
    }
}

impl Addressable for ProposalDraft {
    fn text(&self, rel: &[Segment]) -> Option<&String> {
        match rel {
            [Segment::Field("title")] => Some(&self.title),
            [Segment::Field("definition")] => Some(&self.definition),
            [Segment::Field("characteristics")] => Some(&self.characteristics),
            [Segment::Field("visualization")] => Some(&self.visualization),
            [Segment::Field(list), Segment::Index(i)] if is_string_list(list) => {
                self.list(&rel[..1])?.get(*i)
            }
            [Segment::Field("operations"), Segment::Index(i), rest @ ..] => {
                self.operations.get(*i)?.text(rest)
            }
            [Segment::Field("fullImplementations"), Segment::Index(i), rest @ ..] => {
                self.full_implementations.get(*i)?.text(rest)
            }
            [Segment::Field("applications"), Segment::Index(i), rest @ ..] => {
                self.applications.get(*i)?.text(rest)
            }
            [Segment::Field("comparisons"), Segment::Index(i), rest @ ..] => {
                self.comparisons.get(*i)?.text(rest)
            }
            _ => None,
        }
    }

    fn text_mut(&mut self, rel: &[Segment]) -> Option<&mut String> {
        match rel {
            [Segment::Field("title")] => Some(&mut self.title),
            [Segment::Field("definition")] => Some(&mut self.definition),
            [Segment::Field("characteristics")] => Some(&mut self.characteristics),
            [Segment::Field("visualization")] => Some(&mut self.visualization),
            [Segment::Field(list), Segment::Index(i)] if is_string_list(list) => {
                self.list_mut(&rel[..1])?.get_mut(*i)
            }
            [Segment::Field("operations"), Segment::Index(i), rest @ ..] => {
                self.operations.get_mut(*i)?.text_mut(rest)
            }
            [Segment::Field("fullImplementations"), Segment::Index(i), rest @ ..] => {
                self.full_implementations.get_mut(*i)?.text_mut(rest)
            }
            [Segment::Field("applications"), Segment::Index(i), rest @ ..] => {
                self.applications.get_mut(*i)?.text_mut(rest)
            }
            [Segment::Field("comparisons"), Segment::Index(i), rest @ ..] => {
                self.comparisons.get_mut(*i)?.text_mut(rest)
            }
            _ => None,
        }
    }

    fn list(&self, rel: &[Segment]) -> Option<&Vec<String>> {
        match rel {
            [Segment::Field("category")] => Some(&self.category),
            [Segment::Field("tags")] => Some(&self.tags),
            [Segment::Field("references")] => Some(&self.references),
            [Segment::Field("videoLinks")] => Some(&self.video_links),
            [Segment::Field("applications"), Segment::Index(i), rest @ ..] => {
                self.applications.get(*i)?.list(rest)
            }
            [Segment::Field("comparisons"), Segment::Index(i), rest @ ..] => {
                self.comparisons.get(*i)?.list(rest)
            }
            _ => None,
        }
    }

    fn list_mut(&mut self, rel: &[Segment]) -> Option<&mut Vec<String>> {
        match rel {
            [Segment::Field("category")] => Some(&mut self.category),
            [Segment::Field("tags")] => Some(&mut self.tags),
            [Segment::Field("references")] => Some(&mut self.references),
            [Segment::Field("videoLinks")] => Some(&mut self.video_links),
            [Segment::Field("applications"), Segment::Index(i), rest @ ..] => {
                self.applications.get_mut(*i)?.list_mut(rest)
            }
            [Segment::Field("comparisons"), Segment::Index(i), rest @ ..] => {
                self.comparisons.get_mut(*i)?.list_mut(rest)
            }
            _ => None,
        }
    }
}

fn is_string_list(name: &str) -> bool {
    matches!(name, "category" | "tags" | "references" | "videoLinks")
}

fn is_type_path(path: &FieldPath) -> bool {
    matches!(path.segments(), [Segment::Field("type")])
}

impl ProposalDraft {
    /// Read the value at `path`
    ///
    /// # Errors
    /// Returns [`PathError::NotAddressable`] if the path names no string leaf,
    /// string sequence or the `type` field, or points past a sequence end
    pub fn get(&self, path: &FieldPath) -> Result<FieldValue, PathError> {
        if is_type_path(path) {
            return Ok(FieldValue::Type(self.structure_type));
        }
        let rel = path.segments();
        if let Some(text) = self.text(rel) {
            return Ok(FieldValue::Text(text.clone()));
        }
        if let Some(list) = self.list(rel) {
            return Ok(FieldValue::List(list.clone()));
        }
        Err(PathError::NotAddressable(path.to_string()))
    }

    /// Replace the value at `path`
    ///
    /// `type` also accepts [`FieldValue::Text`] holding a wire name; a blank
    /// string clears it.
    ///
    /// # Errors
    /// Returns error if the path is not addressable or the value shape does
    /// not match the field
    pub fn set(&mut self, path: &FieldPath, value: FieldValue) -> Result<(), PathError> {
        let mismatch = |expected| PathError::TypeMismatch {
            path: path.to_string(),
            expected,
        };

        if is_type_path(path) {
            self.structure_type = match value {
                FieldValue::Type(t) => t,
                FieldValue::Text(s) if s.trim().is_empty() => None,
                FieldValue::Text(s) => Some(s.parse().map_err(|_| mismatch("structure type"))?),
                FieldValue::List(_) => return Err(mismatch("structure type")),
            };
            return Ok(());
        }

        let rel = path.segments();
        match value {
            FieldValue::Text(text) => {
                let slot = self
                    .text_mut(rel)
                    .ok_or_else(|| not_addressable(path))?;
                *slot = text;
            }
            FieldValue::List(list) => {
                let slot = self
                    .list_mut(rel)
                    .ok_or_else(|| not_addressable(path))?;
                *slot = list;
            }
            FieldValue::Type(_) => return Err(mismatch("text or list")),
        }
        Ok(())
    }
}

fn not_addressable(path: &FieldPath) -> PathError {
    PathError::NotAddressable(path.to_string())
}
