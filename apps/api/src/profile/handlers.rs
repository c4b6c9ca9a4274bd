//! Axum route handlers for the Profile View API.

use axum::{extract::Path, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::profile::models::{
    lenient_annotations, lenient_optional_string, lenient_strings, CandidateProfile, Category,
    RelevanceAnnotation,
};
use crate::profile::ranking::{merge_and_rank, RankedItem};
use crate::profile::structurer::{structure_entry, StructuredEntry};
use crate::profile::view::{build_category_view, build_profile_view, CategoryView, ProfileView};

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default, deserialize_with = "lenient_strings")]
    pub raw_items: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub inferred_items: Vec<String>,
    #[serde(default, deserialize_with = "lenient_annotations")]
    pub annotations: Option<Vec<RelevanceAnnotation>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profile/view
pub async fn handle_profile_view(AppJson(profile): AppJson<CandidateProfile>) -> Json<ProfileView> {
    let view = build_profile_view(&profile);
    info!(
        relevant = view.categories.iter().map(|c| c.relevant_count).sum::<usize>(),
        "Built profile view"
    );
    Json(view)
}

/// POST /api/v1/profile/view/:category
pub async fn handle_category_view(
    Path(category): Path<String>,
    AppJson(profile): AppJson<CandidateProfile>,
) -> Result<Json<CategoryView>, AppError> {
    let category = category
        .parse::<Category>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;
    Ok(Json(build_category_view(&profile, category)))
}

/// POST /api/v1/entries/structure
///
/// Returns `null` for absent or blank content.
pub async fn handle_structure_entry(
    AppJson(request): AppJson<StructureRequest>,
) -> Json<Option<StructuredEntry>> {
    Json(request.content.as_deref().and_then(structure_entry))
}

/// POST /api/v1/attributes/rank
pub async fn handle_rank_attributes(AppJson(request): AppJson<RankRequest>) -> Json<Vec<RankedItem>> {
    Json(merge_and_rank(
        &request.raw_items,
        &request.inferred_items,
        request.annotations.as_deref(),
    ))
}
