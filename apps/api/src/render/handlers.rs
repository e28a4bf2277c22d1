use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::page_fill::{analyze_page_fill, PageFillAnalysis};
use crate::layout::{derive_html_styles, derive_pdf_styles, scale_factors_for, ScaleFactors, StyleParameters};
use crate::models::ResumeDocument;
use crate::render::pdf::layout_with;
use crate::render::{render_html, RenderMode};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub mode: RenderMode,
}

/// Everything the scaling engine decided for the current document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub scale: ScaleFactors,
    pub html_styles: StyleParameters,
    pub pdf_styles: StyleParameters,
    pub page_fill: PageFillAnalysis,
}

pub fn layout_report(resume: &ResumeDocument) -> Result<LayoutReport, AppError> {
    let scale = scale_factors_for(resume);
    let html_styles = derive_html_styles(&scale);
    let pdf_styles = derive_pdf_styles(&scale);
    let (_, layout) = layout_with(resume, &pdf_styles, RenderMode::Export)?;
    Ok(LayoutReport {
        scale,
        html_styles,
        pdf_styles,
        page_fill: analyze_page_fill(&layout),
    })
}

/// GET /api/v1/preview?mode=preview|export
pub async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Html<String> {
    let resume = state.snapshot().await;
    Html(render_html(&resume, query.mode))
}

/// GET /api/v1/layout
pub async fn handle_layout(State(state): State<AppState>) -> Result<Json<LayoutReport>, AppError> {
    let resume = state.snapshot().await;
    // Pagination runs the full PDF layout, so keep it off the async workers.
    let report = tokio::task::spawn_blocking(move || layout_report(&resume))
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking failed in layout: {e}"))??;
    Ok(Json(report))
}
