//! The export pipeline: score → policy → PDF styles → tree → pages → bytes.
//!
//! `PdfRenderer` is the seam the scheduler and handlers depend on, so tests can swap in
//! a renderer that counts calls or fails on demand.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;

use crate::export::ExportError;
use crate::layout::ScaleFactors;
use crate::models::ResumeDocument;
use crate::render::{render_pdf, RenderError};

const FILENAME_SUFFIX: &str = "_CV.pdf";
const FALLBACK_NAME: &str = "Resume";

/// A finished export. Cheap to clone: the bytes are reference counted.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedArtifact {
    #[serde(skip)]
    pub bytes: Bytes,
    pub filename: String,
    pub pages: usize,
    pub scale: ScaleFactors,
}

/// Turns a document snapshot into a PDF. Implementations are synchronous and CPU-bound.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, resume: &ResumeDocument) -> Result<RenderedArtifact, RenderError>;
}

/// The production renderer: density-scaled A4 output.
#[derive(Debug, Clone, Copy, Default)]
pub struct A4PdfRenderer;

impl PdfRenderer for A4PdfRenderer {
    fn render(&self, resume: &ResumeDocument) -> Result<RenderedArtifact, RenderError> {
        let pdf = render_pdf(resume)?;
        Ok(RenderedArtifact {
            bytes: Bytes::from(pdf.bytes),
            filename: export_filename(resume),
            pages: pdf.fill.page_count,
            scale: pdf.scale,
        })
    }
}

/// Runs `renderer` on the blocking pool so the async executor never stalls.
pub async fn render_off_thread(
    renderer: Arc<dyn PdfRenderer>,
    resume: ResumeDocument,
) -> Result<RenderedArtifact, ExportError> {
    tokio::task::spawn_blocking(move || renderer.render(&resume))
        .await
        .map_err(|e| ExportError::Task(format!("spawn_blocking failed in export: {e}")))?
        .map_err(ExportError::from)
}

/// `Ada Lovelace` → `Ada_Lovelace_CV.pdf`. Every character outside ASCII letters and
/// digits becomes `_`; a blank name falls back to `Resume_CV.pdf`.
pub fn export_filename(resume: &ResumeDocument) -> String {
    let name = resume.personal_details.full_name.trim();
    let name = if name.is_empty() { FALLBACK_NAME } else { name };
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{sanitized}{FILENAME_SUFFIX}")
}
