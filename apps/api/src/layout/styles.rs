//! Style parameter derivers for the HTML preview and the PDF export.
//!
//! Both derivers multiply a base table by the scale factors. The two base tables
//! describe the same physical sizes in different units: `HTML_BASE` is in CSS pixels
//! (96 per inch), `PDF_BASE` in points (72 per inch). Editing one table requires the
//! same edit in the other, multiplied or divided by `PX_PER_PT`.

use serde::{Deserialize, Serialize};

use crate::layout::policy::ScaleFactors;

/// CSS pixels per PDF point.
pub const PX_PER_PT: f64 = 96.0 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleUnit {
    Px,
    Pt,
}

impl StyleUnit {
    /// Multiplier converting a value in this unit to points.
    pub fn to_points(&self) -> f64 {
        match self {
            StyleUnit::Px => 1.0 / PX_PER_PT,
            StyleUnit::Pt => 1.0,
        }
    }

    pub fn css_suffix(&self) -> &'static str {
        match self {
            StyleUnit::Px => "px",
            StyleUnit::Pt => "pt",
        }
    }
}

/// Base (unscaled) sizes for one renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStyleTable {
    pub unit: StyleUnit,
    pub body_font_size: f64,
    /// The name line in the header.
    pub heading_font_size: f64,
    pub section_title_font_size: f64,
    /// Contact lines, dates, sidebar detail text.
    pub detail_font_size: f64,
    pub padding_top: f64,
    pub padding_side: f64,
    pub padding_bottom: f64,
    pub section_margin_top: f64,
    pub item_margin_bottom: f64,
    /// Gap between lines inside one item.
    pub item_gap: f64,
    pub bullet_indent: f64,
}

/// PDF base sizes in points. Padding: 15mm top, 25mm sides and bottom.
pub const PDF_BASE: BaseStyleTable = BaseStyleTable {
    unit: StyleUnit::Pt,
    body_font_size: 10.5,
    heading_font_size: 21.0,
    section_title_font_size: 10.5,
    detail_font_size: 9.0,
    padding_top: 42.0,
    padding_side: 71.0,
    padding_bottom: 71.0,
    section_margin_top: 18.0,
    item_margin_bottom: 11.3,
    item_gap: 3.0,
    bullet_indent: 9.0,
};

/// HTML base sizes in CSS pixels (`PDF_BASE` × 4/3).
pub const HTML_BASE: BaseStyleTable = BaseStyleTable {
    unit: StyleUnit::Px,
    body_font_size: 14.0,
    heading_font_size: 28.0,
    section_title_font_size: 14.0,
    detail_font_size: 12.0,
    padding_top: 56.0,
    padding_side: 94.667,
    padding_bottom: 94.667,
    section_margin_top: 24.0,
    item_margin_bottom: 15.067,
    item_gap: 4.0,
    bullet_indent: 12.0,
};

/// Unitless line height shared by both renderers.
pub const LINE_HEIGHT: f64 = 1.6;

/// Concrete, renderer-native sizes after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleParameters {
    pub unit: StyleUnit,
    pub body_font_size: f64,
    pub heading_font_size: f64,
    pub section_title_font_size: f64,
    pub detail_font_size: f64,
    pub padding_top: f64,
    pub padding_side: f64,
    pub padding_bottom: f64,
    pub section_margin_top: f64,
    pub item_margin_bottom: f64,
    pub item_gap: f64,
    pub bullet_indent: f64,
    pub line_height: f64,
    pub scale: ScaleFactors,
}

impl StyleParameters {
    /// Every length field paired with its name, in this renderer's unit.
    pub fn lengths(&self) -> [(&'static str, f64); 11] {
        [
            ("body_font_size", self.body_font_size),
            ("heading_font_size", self.heading_font_size),
            ("section_title_font_size", self.section_title_font_size),
            ("detail_font_size", self.detail_font_size),
            ("padding_top", self.padding_top),
            ("padding_side", self.padding_side),
            ("padding_bottom", self.padding_bottom),
            ("section_margin_top", self.section_margin_top),
            ("item_margin_bottom", self.item_margin_bottom),
            ("item_gap", self.item_gap),
            ("bullet_indent", self.bullet_indent),
        ]
    }

    /// Same lengths converted to points.
    pub fn lengths_in_points(&self) -> [(&'static str, f64); 11] {
        let factor = self.unit.to_points();
        self.lengths().map(|(name, value)| (name, value * factor))
    }

    /// CSS length literal, e.g. `14.0px`.
    pub fn css(&self, value: f64) -> String {
        format!("{value:.1}{}", self.unit.css_suffix())
    }
}

/// Expands scale factors against a base table. Fonts use `font_scale`, every padding
/// and margin uses `spacing_scale`; results are rounded to one decimal.
pub fn derive_styles(base: &BaseStyleTable, scale: &ScaleFactors) -> StyleParameters {
    let font = |v: f64| round1(v * scale.font_scale);
    let space = |v: f64| round1(v * scale.spacing_scale);

    StyleParameters {
        unit: base.unit,
        body_font_size: font(base.body_font_size),
        heading_font_size: font(base.heading_font_size),
        section_title_font_size: font(base.section_title_font_size),
        detail_font_size: font(base.detail_font_size),
        padding_top: space(base.padding_top),
        padding_side: space(base.padding_side),
        padding_bottom: space(base.padding_bottom),
        section_margin_top: space(base.section_margin_top),
        item_margin_bottom: space(base.item_margin_bottom),
        item_gap: space(base.item_gap),
        bullet_indent: space(base.bullet_indent),
        line_height: LINE_HEIGHT,
        scale: *scale,
    }
}

pub fn derive_html_styles(scale: &ScaleFactors) -> StyleParameters {
    derive_styles(&HTML_BASE, scale)
}

pub fn derive_pdf_styles(scale: &ScaleFactors) -> StyleParameters {
    derive_styles(&PDF_BASE, scale)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
