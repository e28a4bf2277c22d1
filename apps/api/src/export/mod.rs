// PDF export: a synchronous render path for downloads and a debounced background
// scheduler for the live preview artifact.
// Rendering is CPU-bound and always runs inside tokio::task::spawn_blocking.

pub mod artifacts;
pub mod handlers;
pub mod pipeline;
pub mod scheduler;

use thiserror::Error;
use uuid::Uuid;

use crate::render::RenderError;

pub use artifacts::{ArtifactRef, ArtifactRegistry};
pub use pipeline::{export_filename, A4PdfRenderer, PdfRenderer, RenderedArtifact};
pub use scheduler::{ExportScheduler, ExportStatus};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Export task failed: {0}")]
    Task(String),

    #[error("No export has been requested yet")]
    NothingToRetry,

    #[error("Export {0} not found")]
    ArtifactNotFound(Uuid),
}
