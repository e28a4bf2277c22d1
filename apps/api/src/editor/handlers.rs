use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::editor::{PersonalDetailsPatch, ResumeStore, SkillList, StoreError};
use crate::errors::AppError;
use crate::models::{
    Certification, EducationEntry, ExperienceEntry, LanguageEntry, Project, ResumeDocument,
    TemplateKind,
};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub resume: ResumeDocument,
    /// Present when saved data could not be restored at startup.
    pub storage_warning: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateRequest {
    pub template: TemplateKind,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
}

#[derive(Deserialize)]
pub struct SkillRequest {
    pub value: String,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub resume: ResumeDocument,
}

/// Applies one store mutation, persists the result and schedules a background export.
///
/// The write lock is held until the save completes so saves land in mutation order.
/// A failed save rolls the store back, so memory never runs ahead of disk.
async fn mutate<T>(
    state: &AppState,
    op: impl FnOnce(&mut ResumeStore) -> Result<T, StoreError>,
) -> Result<(T, ResumeDocument), AppError> {
    let mut store = state.store.write().await;
    let before = store.snapshot();
    let value = op(&mut *store)?;
    let resume = store.snapshot();
    if let Err(err) = state.repository.save(&resume).await {
        warn!(error = %err, "Save failed; reverting the in-memory change");
        *store = ResumeStore::new(before);
        return Err(err.into());
    }
    state.exports.notify_changed(resume.clone());
    Ok((value, resume))
}

fn created(id: Uuid, resume: ResumeDocument) -> (StatusCode, Json<CreatedResponse>) {
    (StatusCode::CREATED, Json(CreatedResponse { id, resume }))
}

// ────────────────────────────────────────────────────────────────────────────
// Whole document
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    Json(ResumeResponse {
        resume: state.snapshot().await,
        storage_warning: state.storage_warning.clone(),
    })
}

/// PUT /api/v1/resume
pub async fn handle_load_resume(
    State(state): State<AppState>,
    Json(resume): Json<ResumeDocument>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| {
        store.load(resume);
        Ok(())
    })
    .await?;
    info!(resume_id = %resume.id, "Loaded resume");
    Ok(Json(resume))
}

/// POST /api/v1/resume/reset
pub async fn handle_reset_resume(
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| {
        store.reset();
        Ok(())
    })
    .await?;
    info!(resume_id = %resume.id, "Reset resume");
    Ok(Json(resume))
}

/// POST /api/v1/resume/demo
pub async fn handle_load_demo(
    State(state): State<AppState>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| {
        store.load_demo();
        Ok(())
    })
    .await?;
    Ok(Json(resume))
}

/// PATCH /api/v1/resume/personal
pub async fn handle_update_personal(
    State(state): State<AppState>,
    Json(patch): Json<PersonalDetailsPatch>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| {
        store.update_personal_details(patch);
        Ok(())
    })
    .await?;
    Ok(Json(resume))
}

/// PUT /api/v1/resume/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Json(req): Json<TemplateRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| {
        store.set_template(req.template);
        Ok(())
    })
    .await?;
    Ok(Json(resume))
}

// ────────────────────────────────────────────────────────────────────────────
// Experience and education
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(entry): Json<ExperienceEntry>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let (id, resume) = mutate(&state, |store| Ok(store.add_experience(entry))).await?;
    Ok(created(id, resume))
}

/// PUT /api/v1/resume/experience/:id
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<ExperienceEntry>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.update_experience(id, entry)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/experience/:id
pub async fn handle_delete_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.delete_experience(id)).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/experience/reorder
pub async fn handle_reorder_experience(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.reorder_experience(req.from, req.to)).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Json(entry): Json<EducationEntry>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let (id, resume) = mutate(&state, |store| Ok(store.add_education(entry))).await?;
    Ok(created(id, resume))
}

/// PUT /api/v1/resume/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<EducationEntry>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.update_education(id, entry)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/education/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.delete_education(id)).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/education/reorder
pub async fn handle_reorder_education(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.reorder_education(req.from, req.to)).await?;
    Ok(Json(resume))
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications and projects
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
    Json(entry): Json<Certification>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let (id, resume) = mutate(&state, |store| Ok(store.add_certification(entry))).await?;
    Ok(created(id, resume))
}

/// PUT /api/v1/resume/certifications/:id
pub async fn handle_update_certification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<Certification>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.update_certification(id, entry)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/certifications/:id
pub async fn handle_delete_certification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.delete_certification(id)).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
    Json(entry): Json<Project>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let (id, resume) = mutate(&state, |store| Ok(store.add_project(entry))).await?;
    Ok(created(id, resume))
}

/// PUT /api/v1/resume/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<Project>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.update_project(id, entry)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.delete_project(id)).await?;
    Ok(Json(resume))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills, tools, languages
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/skills/:list
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(list): Path<SkillList>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.add_skill(list, &req.value)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/skills/:list
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(list): Path<SkillList>,
    Json(req): Json<SkillRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.remove_skill(list, &req.value)).await?;
    Ok(Json(resume))
}

/// POST /api/v1/resume/languages
pub async fn handle_add_language(
    State(state): State<AppState>,
    Json(entry): Json<LanguageEntry>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.add_language(entry)).await?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resume/languages/:name
pub async fn handle_remove_language(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (_, resume) = mutate(&state, |store| store.remove_language(&name)).await?;
    Ok(Json(resume))
}
