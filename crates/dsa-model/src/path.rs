//! Field paths for addressing within a proposal draft
//!
//! Provides [`FieldPath`] for structured addressing of leaves and sequences in
//! the draft tree. Paths compare by value, segment by segment, so an error flag
//! recorded at `operations[2].implementations[1].language` can never collide
//! with one recorded at `operations[21].language`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Every field name that may appear in a draft path.
///
/// Parsing maps names onto these entries, so a [`Segment::Field`] always holds
/// a `'static` name and can be matched with string literal patterns.
pub const FIELD_NAMES: &[&str] = &[
    "title",
    "definition",
    "characteristics",
    "visualization",
    "category",
    "type",
    "operations",
    "name",
    "description",
    "complexity",
    "time",
    "space",
    "implementations",
    "language",
    "code",
    "explanation",
    "fullImplementations",
    "applications",
    "domain",
    "examples",
    "comparisons",
    "with",
    "advantages",
    "disadvantages",
    "whenToUse",
    "tags",
    "references",
    "videoLinks",
    "targetDataStructure",
];

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Named record field
    Field(&'static str),
    /// Position within a sequence
    Index(usize),
}

impl Segment {
    /// Field name, if this is a field segment
    #[inline]
    #[must_use]
    pub fn as_field(&self) -> Option<&'static str> {
        match self {
            Self::Field(name) => Some(*name),
            Self::Index(_) => None,
        }
    }

    /// Index, if this is an index segment
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Field(_) => None,
        }
    }
}

/// Path within a draft tree
///
/// # Examples
/// - `[Field("title")]` → `title`
/// - `[Field("operations"), Index(2), Field("implementations"), Index(1), Field("language")]`
///   → `operations[2].implementations[1].language`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// Empty path (the whole draft)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path with a single named field
    #[inline]
    #[must_use]
    pub fn field(name: &'static str) -> Self {
        Self(vec![Segment::Field(name)])
    }

    /// Create path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Append a named field, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, name: &'static str) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Field(name));
        new
    }

    /// Append a sequence index, returning new path
    #[inline]
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Index(index));
        new
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Segment> {
        self.0.last().copied()
    }

    /// Check if this path is a prefix of another
    ///
    /// # Examples
    /// - `operations[1]` is prefix of `operations[1].name`
    /// - `operations[1]` is NOT prefix of `operations[10].name`
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Check if this path is an ancestor of another (strict prefix)
    #[inline]
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.is_prefix_of(other)
    }

    /// Re-address this path after element `removed` of `sequence` was deleted
    ///
    /// Returns `None` when the path pointed into the removed element, the path
    /// shifted down by one when it pointed at a later sibling, and the path
    /// unchanged otherwise.
    #[must_use]
    pub fn reindexed_after_removal(&self, sequence: &Self, removed: usize) -> Option<Self> {
        if !sequence.is_ancestor_of(self) {
            return Some(self.clone());
        }
        match self.0[sequence.len()] {
            Segment::Index(i) if i == removed => None,
            Segment::Index(i) if i > removed => {
                let mut shifted = self.clone();
                shifted.0[sequence.len()] = Segment::Index(i - 1);
                Some(shifted)
            }
            _ => Some(self.clone()),
        }
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.0.iter()
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for part in s.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(PathError::EmptySegment);
            }
            let known = FIELD_NAMES
                .iter()
                .find(|candidate| **candidate == name)
                .ok_or_else(|| PathError::UnknownField(name.to_string()))?;
            segments.push(Segment::Field(*known));

            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .ok_or_else(|| PathError::Malformed(s.to_string()))?;
                if !rest.starts_with('[') {
                    return Err(PathError::Malformed(s.to_string()));
                }
                let digits = &rest[1..close];
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| PathError::InvalidIndex(digits.to_string()))?;
                segments.push(Segment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(Self(segments))
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors related to field paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Empty segment in path
    #[error("path contains empty segment")]
    EmptySegment,

    /// Field name is not part of the draft schema
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Bracketed index is not a number
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// Unbalanced or misplaced brackets
    #[error("malformed path: {0}")]
    Malformed(String),

    /// Path does not name an editable value of the requested shape
    #[error("path '{0}' does not address an editable value")]
    NotAddressable(String),

    /// Index past the end of a sequence
    #[error("index out of range at '{path}' (length {len})")]
    IndexOutOfRange { path: String, len: usize },

    /// Value shape does not match the addressed field
    #[error("type mismatch at '{path}': expected {expected}")]
    TypeMismatch { path: String, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impl_language(op: usize, imp: usize) -> FieldPath {
        FieldPath::field("operations")
            .index(op)
            .child("implementations")
            .index(imp)
            .child("language")
    }

    #[test]
    fn path_display_uses_brackets_for_indices() {
        assert_eq!(
            impl_language(2, 1).to_string(),
            "operations[2].implementations[1].language"
        );
        assert_eq!(FieldPath::field("title").to_string(), "title");
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn path_from_str_roundtrips_display() {
        let path = impl_language(3, 0);
        let parsed: FieldPath = path.to_string().parse().unwrap();
        assert_eq!(parsed, path);
    }

    #[test]
    fn path_from_str_nested_complexity() {
        let parsed: FieldPath = "operations[0].complexity.time".parse().unwrap();
        assert_eq!(
            parsed.segments(),
            &[
                Segment::Field("operations"),
                Segment::Index(0),
                Segment::Field("complexity"),
                Segment::Field("time"),
            ]
        );
    }

    #[test]
    fn path_from_str_rejects_unknown_field() {
        let result: Result<FieldPath, _> = "operations[0].bogus".parse();
        assert!(matches!(result, Err(PathError::UnknownField(_))));
    }

    #[test]
    fn path_from_str_rejects_bad_index() {
        let result: Result<FieldPath, _> = "operations[x].name".parse();
        assert!(matches!(result, Err(PathError::InvalidIndex(_))));

        let result: Result<FieldPath, _> = "operations[1.name".parse();
        assert!(matches!(result, Err(PathError::Malformed(_))));
    }

    #[test]
    fn path_from_str_empty_segment() {
        let result: Result<FieldPath, _> = "operations..name".parse();
        assert!(matches!(result, Err(PathError::EmptySegment)));
    }

    #[test]
    fn prefix_compares_indices_by_value() {
        let op1 = FieldPath::field("operations").index(1);
        let op10_name = FieldPath::field("operations").index(10).child("name");
        let op1_name = op1.child("name");

        assert!(op1.is_prefix_of(&op1_name));
        assert!(!op1.is_prefix_of(&op10_name));
        assert!(op1.is_ancestor_of(&op1_name));
        assert!(!op1.is_ancestor_of(&op1));
    }

    #[test]
    fn parent_and_last() {
        let path = impl_language(0, 1);
        assert_eq!(path.last(), Some(Segment::Field("language")));
        assert_eq!(path.parent().unwrap().last(), Some(Segment::Index(1)));
        assert!(FieldPath::root().parent().is_none());
    }

    #[test]
    fn reindex_drops_removed_and_shifts_later_siblings() {
        let ops = FieldPath::field("operations");

        assert_eq!(
            ops.index(1).child("name").reindexed_after_removal(&ops, 1),
            None
        );
        assert_eq!(
            ops.index(3).child("name").reindexed_after_removal(&ops, 1),
            Some(ops.index(2).child("name"))
        );
        assert_eq!(
            ops.index(0).child("name").reindexed_after_removal(&ops, 1),
            Some(ops.index(0).child("name"))
        );

        let title = FieldPath::field("title");
        assert_eq!(title.reindexed_after_removal(&ops, 0), Some(title.clone()));
    }

    #[test]
    fn path_serializes_as_display_string() {
        let path = impl_language(1, 2);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"operations[1].implementations[2].language\"");
        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
