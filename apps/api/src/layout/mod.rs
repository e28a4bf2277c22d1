// Adaptive content density: score → scale factors → renderer styles.
// Everything here is pure and synchronous. Scale factors are derived on every render
// and never stored on the document.

pub mod density;
pub mod font_metrics;
pub mod page_fill;
pub mod policy;
pub mod styles;

// Re-export the public API consumed by the renderers and handlers.
pub use density::{score_density, DensityWeights};
pub use policy::{derive_scale_factors, scale_factors_for, CompressionLevel, ScaleFactors, ScalingPolicy};
pub use styles::{derive_html_styles, derive_pdf_styles, StyleParameters};
