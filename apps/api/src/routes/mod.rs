pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document
        .route(
            "/api/v1/resume",
            get(editor::handle_get_resume).put(editor::handle_load_resume),
        )
        .route("/api/v1/resume/reset", post(editor::handle_reset_resume))
        .route("/api/v1/resume/demo", post(editor::handle_load_demo))
        .route("/api/v1/resume/personal", patch(editor::handle_update_personal))
        .route("/api/v1/resume/template", put(editor::handle_set_template))
        // Sections
        .route("/api/v1/resume/experience", post(editor::handle_add_experience))
        .route(
            "/api/v1/resume/experience/reorder",
            post(editor::handle_reorder_experience),
        )
        .route(
            "/api/v1/resume/experience/:id",
            put(editor::handle_update_experience).delete(editor::handle_delete_experience),
        )
        .route("/api/v1/resume/education", post(editor::handle_add_education))
        .route(
            "/api/v1/resume/education/reorder",
            post(editor::handle_reorder_education),
        )
        .route(
            "/api/v1/resume/education/:id",
            put(editor::handle_update_education).delete(editor::handle_delete_education),
        )
        .route(
            "/api/v1/resume/certifications",
            post(editor::handle_add_certification),
        )
        .route(
            "/api/v1/resume/certifications/:id",
            put(editor::handle_update_certification).delete(editor::handle_delete_certification),
        )
        .route("/api/v1/resume/projects", post(editor::handle_add_project))
        .route(
            "/api/v1/resume/projects/:id",
            put(editor::handle_update_project).delete(editor::handle_delete_project),
        )
        .route(
            "/api/v1/resume/skills/:list",
            post(editor::handle_add_skill).delete(editor::handle_remove_skill),
        )
        .route("/api/v1/resume/languages", post(editor::handle_add_language))
        .route(
            "/api/v1/resume/languages/:name",
            delete(editor::handle_remove_language),
        )
        // Rendering
        .route("/api/v1/layout", get(render::handle_layout))
        .route("/api/v1/preview", get(render::handle_preview))
        // Export
        .route("/api/v1/export", get(export::handle_export_pdf))
        .route("/api/v1/export/status", get(export::handle_export_status))
        .route("/api/v1/export/retry", post(export::handle_export_retry))
        .route(
            "/api/v1/exports/:id",
            get(export::handle_get_artifact).delete(export::handle_release_artifact),
        )
        // Suggestions
        .route("/api/v1/skills/search", get(catalog::handle_search_skills))
        .route("/api/v1/skills/popular", get(catalog::handle_popular_skills))
        .route(
            "/api/v1/skills/categories/:category",
            get(catalog::handle_skills_by_category),
        )
        .with_state(state)
}
