//! Scale factor policy: maps a density score to spacing and font multipliers.
//!
//! # Bands
//! - none:   density ≤ T1        → spacing 1.0, font 1.0
//! - light:  T1 < density ≤ T2   → spacing 1.0 → 0.8 (linear), font 1.0
//! - medium: T2 < density ≤ T3   → spacing 0.8, font 1.0 → 0.95 (linear)
//! - heavy:  density > T3        → both decay further, clamped at their floors
//!
//! Spacing is exhausted before glyphs shrink. Every band meets its neighbour at the
//! threshold, so adding one bullet never produces a visible jump.

use serde::{Deserialize, Serialize};

use crate::layout::density::score_density;
use crate::models::ResumeDocument;

/// Which band produced a set of scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionLevel {
    None,
    Light,
    Medium,
    Heavy,
}

impl CompressionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionLevel::None => "none",
            CompressionLevel::Light => "light",
            CompressionLevel::Medium => "medium",
            CompressionLevel::Heavy => "heavy",
        }
    }
}

/// Derived, never persisted. Recomputed on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactors {
    pub spacing_scale: f64,
    pub font_scale: f64,
    pub compression_level: CompressionLevel,
    /// The density score these factors were derived from.
    pub content_density: f64,
}

impl ScaleFactors {
    /// Factors for an uncompressed layout.
    pub fn identity() -> Self {
        Self {
            spacing_scale: 1.0,
            font_scale: 1.0,
            compression_level: CompressionLevel::None,
            content_density: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalingPolicy {
    /// T1: upper bound of the uncompressed band.
    pub light_threshold: f64,
    /// T2: upper bound of the spacing-only band.
    pub medium_threshold: f64,
    /// T3: upper bound of the light font reduction band.
    pub heavy_threshold: f64,
    pub min_spacing_scale: f64,
    pub max_spacing_scale: f64,
    pub min_font_scale: f64,
    pub max_font_scale: f64,
    /// Spacing reached at the end of the light band.
    pub light_spacing_target: f64,
    /// Font scale reached at the end of the medium band.
    pub medium_font_target: f64,
    /// Additional spacing reduction per density point above T3.
    pub heavy_spacing_decay: f64,
    /// Additional font reduction per density point above T3.
    pub heavy_font_decay: f64,
}

impl Default for ScalingPolicy {
    fn default() -> Self {
        Self {
            light_threshold: 50.0,
            medium_threshold: 100.0,
            heavy_threshold: 150.0,
            min_spacing_scale: 0.8,
            max_spacing_scale: 1.0,
            // 9pt body floor over a 10.5pt base.
            min_font_scale: 0.857,
            max_font_scale: 1.0,
            light_spacing_target: 0.8,
            medium_font_target: 0.95,
            heavy_spacing_decay: 1.0 / 1000.0,
            heavy_font_decay: 1.0 / 500.0,
        }
    }
}

impl ScalingPolicy {
    /// Derives scale factors for a density score. Total over all `f64` inputs:
    /// negative and non-finite densities are treated as zero.
    pub fn derive(&self, density: f64) -> ScaleFactors {
        let density = if density.is_finite() {
            density.max(0.0)
        } else if density == f64::INFINITY {
            f64::MAX
        } else {
            0.0
        };

        let (spacing, font, level) = if density <= self.light_threshold {
            (self.max_spacing_scale, self.max_font_scale, CompressionLevel::None)
        } else if density <= self.medium_threshold {
            let progress = band_progress(density, self.light_threshold, self.medium_threshold);
            let spacing = lerp(self.max_spacing_scale, self.light_spacing_target, progress);
            (spacing, self.max_font_scale, CompressionLevel::Light)
        } else if density <= self.heavy_threshold {
            let progress = band_progress(density, self.medium_threshold, self.heavy_threshold);
            let font = lerp(self.max_font_scale, self.medium_font_target, progress);
            (self.light_spacing_target, font, CompressionLevel::Medium)
        } else {
            let excess = density - self.heavy_threshold;
            let spacing = self.light_spacing_target - excess * self.heavy_spacing_decay;
            let font = self.medium_font_target - excess * self.heavy_font_decay;
            (spacing, font, CompressionLevel::Heavy)
        };

        ScaleFactors {
            spacing_scale: round3(spacing).clamp(self.min_spacing_scale, self.max_spacing_scale),
            font_scale: round3(font).clamp(self.min_font_scale, self.max_font_scale),
            compression_level: level,
            content_density: density,
        }
    }
}

/// Scale factors for a density score under the default policy.
pub fn derive_scale_factors(density: f64) -> ScaleFactors {
    ScalingPolicy::default().derive(density)
}

/// Scores the document and derives its scale factors under the default policy.
pub fn scale_factors_for(resume: &ResumeDocument) -> ScaleFactors {
    derive_scale_factors(f64::from(score_density(resume)))
}

fn band_progress(density: f64, lower: f64, upper: f64) -> f64 {
    if upper <= lower {
        return 1.0;
    }
    ((density - lower) / (upper - lower)).clamp(0.0, 1.0)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
