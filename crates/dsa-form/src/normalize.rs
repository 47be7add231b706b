//! Draft normalization before persistence
//!
//! Trims every string leaf and drops blank entries from the free-form string
//! lists. Applying it twice yields the same draft as applying it once.

use dsa_model::ProposalDraft;
use indexmap::IndexSet;

/// Normalized copy of `draft`
#[must_use]
pub fn normalize(draft: &ProposalDraft) -> ProposalDraft {
    let mut normalized = draft.clone();
    normalize_in_place(&mut normalized);
    normalized
}

/// Normalize `draft` in place
pub fn normalize_in_place(draft: &mut ProposalDraft) {
    trim(&mut draft.title);
    trim(&mut draft.definition);
    trim(&mut draft.characteristics);
    trim(&mut draft.visualization);
    draft.category.iter_mut().for_each(trim);
    if let Some(target) = draft.target_data_structure.as_mut() {
        trim(target);
    }

    for op in &mut draft.operations {
        trim(&mut op.name);
        trim(&mut op.description);
        trim(&mut op.complexity.time);
        trim(&mut op.complexity.space);
        for imp in &mut op.implementations {
            trim(&mut imp.language);
            trim(&mut imp.code);
            trim(&mut imp.explanation);
            trim(&mut imp.complexity.time);
            trim(&mut imp.complexity.space);
        }
    }

    for block in &mut draft.full_implementations {
        trim(&mut block.language);
        trim(&mut block.code);
    }

    for app in &mut draft.applications {
        trim(&mut app.domain);
        compact(&mut app.examples);
    }

    for cmp in &mut draft.comparisons {
        trim(&mut cmp.with);
        trim(&mut cmp.when_to_use);
        compact(&mut cmp.advantages);
        compact(&mut cmp.disadvantages);
    }

    compact(&mut draft.tags);
    dedup_keep_first(&mut draft.tags);
    compact(&mut draft.references);
    compact(&mut draft.video_links);
}

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Trim entries and drop the blank ones
fn compact(values: &mut Vec<String>) {
    values.iter_mut().for_each(trim);
    values.retain(|v| !v.is_empty());
}

fn dedup_keep_first(values: &mut Vec<String>) {
    let mut seen = IndexSet::new();
    values.retain(|v| seen.insert(v.clone()));
}
