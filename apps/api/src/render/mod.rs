// Rendering: one neutral outline, two back-ends.
// The HTML preview and the PDF export both size everything from the derived
// StyleParameters, so they compress in lock-step. PDF generation is CPU-bound and
// must run inside tokio::task::spawn_blocking.

pub mod dates;
pub mod handlers;
pub mod html;
pub mod outline;
pub mod pdf;
pub mod preset;

use thiserror::Error;

pub use html::render_html;
pub use outline::RenderMode;
pub use pdf::{render_pdf, RenderedPdf};

/// Edge of the square photo box in points. Fixed: photos never take part in scaling.
pub const PHOTO_SIZE_PT: f64 = 72.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported photo format: {0}")]
    UnsupportedImage(String),

    #[error("Invalid photo data: {0}")]
    InvalidImage(String),

    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}
