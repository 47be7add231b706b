//! Proposal draft records
//!
//! The draft is an explicit tree of typed records. Field names serialize in
//! camelCase so a draft round-trips through the backend's JSON unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Kind of data structure a proposal describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    #[serde(rename = "Linear")]
    Linear,
    #[serde(rename = "Non-Linear")]
    NonLinear,
    #[serde(rename = "Hierarchical")]
    Hierarchical,
    #[serde(rename = "Graph")]
    Graph,
    #[serde(rename = "Other")]
    Other,
}

impl StructureType {
    /// Every accepted type, in display order
    pub const ALL: [StructureType; 5] = [
        Self::Linear,
        Self::NonLinear,
        Self::Hierarchical,
        Self::Graph,
        Self::Other,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::NonLinear => "Non-Linear",
            Self::Hierarchical => "Hierarchical",
            Self::Graph => "Graph",
            Self::Other => "Other",
        }
    }
}

impl Display for StructureType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ModelError::UnknownStructureType(s.to_string()))
    }
}

/// Time and space cost of an operation or implementation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Complexity {
    pub time: String,
    pub space: String,
}

impl Complexity {
    /// Complexity with both bounds filled
    #[must_use]
    pub fn new(time: impl Into<String>, space: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            space: space.into(),
        }
    }
}

/// Language-specific implementation of one operation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Implementation {
    pub language: String,
    pub code: String,
    pub explanation: String,
    pub complexity: Complexity,
}

impl Implementation {
    /// Blank entry, as appended by an "add implementation" control
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Operation supported by the data structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    pub description: String,
    pub complexity: Complexity,
    pub implementations: Vec<Implementation>,
}

impl Operation {
    /// Blank entry carrying one blank implementation
    #[must_use]
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            complexity: Complexity::default(),
            implementations: vec![Implementation::empty()],
        }
    }
}

impl Default for Operation {
    fn default() -> Self {
        Self::empty()
    }
}

/// Complete implementation of the structure in one language
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

impl CodeBlock {
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Real-world domain where the structure is used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    pub domain: String,
    pub examples: Vec<String>,
}

impl Application {
    /// Blank entry carrying one blank example
    #[must_use]
    pub fn empty() -> Self {
        Self {
            domain: String::new(),
            examples: vec![String::new()],
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::empty()
    }
}

/// Comparison against another structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comparison {
    pub with: String,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub when_to_use: String,
}

impl Comparison {
    /// Blank entry carrying one blank advantage and disadvantage
    #[must_use]
    pub fn empty() -> Self {
        Self {
            with: String::new(),
            advantages: vec![String::new()],
            disadvantages: vec![String::new()],
            when_to_use: String::new(),
        }
    }
}

impl Default for Comparison {
    fn default() -> Self {
        Self::empty()
    }
}

/// In-progress proposal for a data-structure entry
///
/// # Invariants
/// - `operations`, `full_implementations`, `applications` and `comparisons`
///   are never shrunk below one entry by the form editors
/// - `category` holds each member at most once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProposalDraft {
    pub title: String,
    pub definition: String,
    pub characteristics: String,
    pub visualization: String,
    pub category: Vec<String>,
    #[serde(rename = "type")]
    pub structure_type: Option<StructureType>,
    pub operations: Vec<Operation>,
    pub full_implementations: Vec<CodeBlock>,
    pub applications: Vec<Application>,
    pub comparisons: Vec<Comparison>,
    pub tags: Vec<String>,
    pub references: Vec<String>,
    pub video_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_data_structure: Option<String>,
}

impl ProposalDraft {
    /// Empty skeleton shown when the editor mounts without an existing proposal
    ///
    /// Every minimum-one sequence holds a single blank entry.
    #[must_use]
    pub fn skeleton() -> Self {
        Self {
            title: String::new(),
            definition: String::new(),
            characteristics: String::new(),
            visualization: String::new(),
            category: Vec::new(),
            structure_type: None,
            operations: vec![Operation::empty()],
            full_implementations: vec![CodeBlock::empty()],
            applications: vec![Application::empty()],
            comparisons: vec![Comparison::empty()],
            tags: Vec::new(),
            references: Vec::new(),
            video_links: Vec::new(),
            target_data_structure: None,
        }
    }

    /// Skeleton amending an existing entity
    #[must_use]
    pub fn amending(target: impl Into<String>) -> Self {
        Self {
            target_data_structure: Some(target.into()),
            ..Self::skeleton()
        }
    }
}

impl Default for ProposalDraft {
    fn default() -> Self {
        Self::skeleton()
    }
}

/// Errors from structural operations on a draft
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Type string outside the fixed enumeration
    #[error("unknown structure type: '{0}'")]
    UnknownStructureType(String),

    /// Element index past the end of a sequence
    #[error("index {index} out of range for {field} (length {len})")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    /// Item kind does not fit the target sequence
    #[error("{field} holds {expected} entries, got {actual}")]
    ItemKindMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Nested sequence does not belong to the named outer sequence
    #[error("{nested} is not nested under {outer}")]
    NotNested { outer: String, nested: String },
}
