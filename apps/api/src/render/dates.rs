//! Month-precision date labels for entries.

use chrono::{Datelike, NaiveDate};

use crate::models::{DateRange, EndDate};

const PRESENT: &str = "Present";

/// How a renderer prints a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Jan 2020`, used by the HTML preview.
    MonthYear,
    /// `01/2020`, used by the PDF export.
    Numeric,
}

pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
    match style {
        DateStyle::MonthYear => date.format("%b %Y").to_string(),
        DateStyle::Numeric => format!("{:02}/{}", date.month(), date.year()),
    }
}

/// `start - end`, with ongoing ranges ending in "Present". Without a start, a fixed end
/// prints alone and an ongoing end prints nothing: the entry simply has no dates.
pub fn format_range(range: &DateRange, style: DateStyle) -> String {
    let end = match range.end {
        EndDate::Fixed { date } => format_date(date, style),
        EndDate::Ongoing => PRESENT.to_string(),
    };
    match (range.start, range.end) {
        (Some(start), _) => format!("{} - {}", format_date(start, style), end),
        (None, EndDate::Fixed { .. }) => end,
        (None, EndDate::Ongoing) => String::new(),
    }
}
