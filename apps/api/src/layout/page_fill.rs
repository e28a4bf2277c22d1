//! Page fill analysis: how well the paginated export uses its pages.
//!
//! Runs after pagination. Reports the page count, how full the last page is, and a
//! verdict. A short spill (a few lines onto a second page) is the case density scaling
//! exists to prevent, so it gets its own verdict.
//!
//! # Fill rules
//! - one page                          → FitsOnePage
//! - last page < 25% full, 2+ pages    → ShortSpill
//! - otherwise                         → MultiPage

use serde::{Deserialize, Serialize};

use crate::render::pdf::paginate::{last_page_usage, PaginatedLayout};

/// Last-page fill below which an overflow counts as a short spill.
pub const SHORT_SPILL_FILL: f32 = 0.25;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFillVerdict {
    /// Everything fits on a single page.
    FitsOnePage,
    /// A small tail of content spilled onto an extra page.
    ShortSpill,
    /// Content genuinely needs several pages.
    MultiPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFillAnalysis {
    pub page_count: usize,
    /// Fullest column on the last page, 0.0..=1.0.
    pub last_page_fill: f32,
    pub whitespace_fraction: f32,
    pub verdict: PageFillVerdict,
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

pub fn analyze_page_fill(layout: &PaginatedLayout) -> PageFillAnalysis {
    let page_count = layout.page_count().max(1);
    let last_page_fill = last_page_usage(layout)
        .iter()
        .filter(|u| u.available > 0.0)
        .map(|u| (u.used / u.available) as f32)
        .fold(0.0_f32, f32::max)
        .clamp(0.0, 1.0);

    let verdict = if page_count == 1 {
        PageFillVerdict::FitsOnePage
    } else if last_page_fill < SHORT_SPILL_FILL {
        PageFillVerdict::ShortSpill
    } else {
        PageFillVerdict::MultiPage
    };

    PageFillAnalysis {
        page_count,
        last_page_fill,
        whitespace_fraction: 1.0 - last_page_fill,
        verdict,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
