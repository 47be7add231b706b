//! Human-readable field names
//!
//! Turns flagged paths into the names shown in the aggregated
//! "missing fields" notification.

use crate::validation::ValidationReport;
use dsa_model::{FieldPath, Segment};
use indexmap::IndexSet;

fn leaf_label(name: &str) -> &'static str {
    match name {
        "title" => "title",
        "definition" => "definition",
        "characteristics" => "characteristics",
        "visualization" => "visualization",
        "category" => "category",
        "type" => "type",
        "operations" => "operations",
        "name" => "name",
        "description" => "description",
        "implementations" => "implementations",
        "language" => "language",
        "code" => "code",
        "explanation" => "explanation",
        "fullImplementations" => "full implementations",
        "applications" => "applications",
        "domain" => "domain",
        "examples" => "examples",
        "comparisons" => "comparisons",
        "with" => "compared structure",
        "advantages" => "advantages",
        "disadvantages" => "disadvantages",
        "whenToUse" => "when to use",
        "tags" => "tags",
        "references" => "references",
        "videoLinks" => "video links",
        _ => "field",
    }
}

/// Label of one element of a sequence
fn element_label(sequence: &str) -> &'static str {
    match sequence {
        "operations" => "operation",
        "implementations" => "implementation",
        "fullImplementations" => "full implementation",
        "applications" => "application",
        "comparisons" => "comparison",
        "examples" => "example",
        "advantages" => "advantage",
        "disadvantages" => "disadvantage",
        "tags" => "tag",
        "references" => "reference",
        "videoLinks" => "video link",
        _ => "entry",
    }
}

/// Human-readable name of a path
///
/// # Examples
/// - `title` → `Title`
/// - `operations[1].implementations[0].complexity.time` → `Operation 2 implementation 1 time complexity`
/// - `category[3]` → `Category`
#[must_use]
pub fn field_label(path: &FieldPath) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut segments = path.segments().iter().peekable();

    while let Some(segment) = segments.next() {
        let Segment::Field(name) = segment else {
            continue;
        };
        let next = segments.peek().copied().copied();
        match (*name, next) {
            ("category", Some(Segment::Index(_))) => {
                segments.next();
                parts.push(leaf_label("category").to_string());
            }
            (sequence, Some(Segment::Index(i))) => {
                parts.push(format!("{} {}", element_label(sequence), i + 1));
                segments.next();
            }
            ("complexity", Some(Segment::Field(bound))) => {
                parts.push(format!("{bound} complexity"));
                segments.next();
            }
            (leaf, _) => parts.push(leaf_label(leaf).to_string()),
        }
    }

    capitalize(&parts.join(" "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// De-duplicated labels of every flagged path, in walk order
#[must_use]
pub fn missing_fields(report: &ValidationReport) -> Vec<String> {
    report
        .errors()
        .iter()
        .map(field_label)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
