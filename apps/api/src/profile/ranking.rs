//! Relevance Merger — joins raw and AI-inferred attributes with relevance annotations.
//!
//! Annotations are joined on the item's natural key: the item itself, or its
//! first line for multi-line entries, so scores computed against an entry title
//! still reach the full entry body. Output is sorted by relevance, highest first.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::profile::models::RelevanceAnnotation;

/// One attribute after merging, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub content: String,
    pub inferred: bool,
    pub relevance: f64,
    pub relevant: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Relevance {
    score: f64,
    relevant: bool,
}

/// Join key between an item and its relevance annotation.
pub fn natural_key(item: &str) -> &str {
    item.lines().next().unwrap_or("")
}

/// Merges raw then inferred items, attaches relevance and sorts descending.
///
/// The sort is stable, so items with equal relevance keep their input order;
/// with no annotations the raw+inferred order comes back untouched.
pub fn merge_and_rank(
    raw_items: &[String],
    inferred_items: &[String],
    annotations: Option<&[RelevanceAnnotation]>,
) -> Vec<RankedItem> {
    let lookup = annotations.map(build_lookup).unwrap_or_default();

    let mut ranked: Vec<RankedItem> = raw_items
        .iter()
        .map(|item| (item, false))
        .chain(inferred_items.iter().map(|item| (item, true)))
        .map(|(content, inferred)| {
            let relevance = lookup
                .get(natural_key(content))
                .copied()
                .unwrap_or_default();
            RankedItem {
                content: content.clone(),
                inferred,
                relevance: relevance.score,
                relevant: relevance.relevant,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    ranked
}

/// Later annotations for the same key replace earlier ones.
fn build_lookup(annotations: &[RelevanceAnnotation]) -> HashMap<&str, Relevance> {
    annotations
        .iter()
        .filter(|a| !a.item.is_empty())
        .map(|a| {
            (
                a.item.as_str(),
                Relevance {
                    score: clamp_score(a.relevance),
                    relevant: a.relevant,
                },
            )
        })
        .collect()
}

/// Scores are non-negative; NaN and infinities count as no score.
fn clamp_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}
