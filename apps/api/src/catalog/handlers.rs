use axum::{
    extract::{Path, Query},
    Json,
};
use serde::Deserialize;

use crate::catalog::{
    by_category, popular, search, SkillCategory, SkillKind, SkillSuggestion, DEFAULT_SEARCH_LIMIT,
};

/// Hard cap so a blank query cannot return the whole catalog in one go.
const MAX_SEARCH_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct SkillSearchQuery {
    #[serde(default)]
    pub q: String,
    pub kind: Option<SkillKind>,
    pub limit: Option<usize>,
}

/// GET /api/v1/skills/search?q=&kind=&limit=
pub async fn handle_search_skills(
    Query(params): Query<SkillSearchQuery>,
) -> Json<Vec<&'static SkillSuggestion>> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .min(MAX_SEARCH_LIMIT);
    Json(search(&params.q, params.kind, limit))
}

/// GET /api/v1/skills/popular
pub async fn handle_popular_skills() -> Json<Vec<&'static SkillSuggestion>> {
    Json(popular())
}

/// GET /api/v1/skills/categories/:category
pub async fn handle_skills_by_category(
    Path(category): Path<SkillCategory>,
) -> Json<Vec<&'static SkillSuggestion>> {
    Json(by_category(category))
}
