//! A4 PDF export: outline → node tree → pages → bytes.

pub mod paginate;
pub mod photo;
pub mod tree;
pub mod writer;

use tracing::debug;

use crate::layout::page_fill::{analyze_page_fill, PageFillAnalysis};
use crate::layout::policy::{scale_factors_for, ScaleFactors};
use crate::layout::styles::{derive_pdf_styles, StyleParameters};
use crate::models::ResumeDocument;
use crate::render::outline::RenderMode;
use crate::render::RenderError;

pub use paginate::{paginate, PaginatedLayout};
pub use tree::{build_tree, PdfTree};
pub use writer::write_pdf;

pub const A4_WIDTH_PT: f64 = 595.28;
pub const A4_HEIGHT_PT: f64 = 841.89;

#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub scale: ScaleFactors,
    pub fill: PageFillAnalysis,
}

/// Lays out the document at explicit styles without writing bytes.
pub fn layout_with(
    resume: &ResumeDocument,
    styles: &StyleParameters,
    mode: RenderMode,
) -> Result<(PdfTree, PaginatedLayout), RenderError> {
    let tree = build_tree(resume, styles, mode)?;
    let layout = paginate(&tree);
    Ok((tree, layout))
}

/// Density-scaled export of the current document. CPU-bound.
pub fn render_pdf(resume: &ResumeDocument) -> Result<RenderedPdf, RenderError> {
    let scale = scale_factors_for(resume);
    let styles = derive_pdf_styles(&scale);
    let (tree, layout) = layout_with(resume, &styles, RenderMode::Export)?;
    let fill = analyze_page_fill(&layout);
    let bytes = write_pdf(&layout, &tree.images, &tree.title)?;

    debug!(
        density = scale.content_density,
        level = scale.compression_level.as_str(),
        pages = fill.page_count,
        bytes = bytes.len(),
        "Rendered PDF"
    );

    Ok(RenderedPdf { bytes, scale, fill })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::policy::{CompressionLevel, ScaleFactors};
    use crate::models::{DateRange, EducationEntry, ExperienceEntry, TemplateKind};
    use crate::render::outline::{SectionKind, ALL_SECTIONS, NAME_PLACEHOLDER, TITLE_PLACEHOLDER};
    use crate::render::pdf::photo::png_data_url;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn job(n: usize, bullets: usize) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: format!("Engineer {n}"),
            company: format!("Company {n}"),
            location: "Remote".to_string(),
            dates: DateRange::fixed(
                NaiveDate::from_ymd_opt(2010 + n as i32, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2011 + n as i32, 6, 1).unwrap(),
            ),
            description: (0..bullets)
                .map(|b| format!("Delivered improvement number {b} across several services and teams"))
                .collect(),
        }
    }

    fn resume(template: TemplateKind, jobs: usize) -> ResumeDocument {
        let mut doc = ResumeDocument::empty();
        doc.template = template;
        doc.personal_details.full_name = "Margaret Hamilton".to_string();
        doc.personal_details.title = "Software Engineer".to_string();
        doc.personal_details.email = "margaret@example.com".to_string();
        doc.personal_details.summary = Some("Led the Apollo flight software team.".to_string());
        doc.experience = (0..jobs).map(|n| job(n, 4)).collect();
        doc.education.push(EducationEntry {
            id: Uuid::new_v4(),
            institution: "Earlham College".to_string(),
            degree: "BA".to_string(),
            field: "Mathematics".to_string(),
            location: None,
            dates: DateRange::default(),
            achievements: Vec::new(),
        });
        doc.skills.skills = vec!["Assembly".to_string(), "Systems".to_string()];
        doc
    }

    #[test]
    fn test_export_contains_user_content() {
        let rendered = render_pdf(&resume(TemplateKind::Classic, 1)).unwrap();
        let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
        assert!(text.contains("Margaret Hamilton"));
        assert!(text.contains("Engineer 0"));
        assert!(text.contains("Earlham College"));
    }

    #[test]
    fn test_export_never_contains_placeholders() {
        let mut doc = ResumeDocument::empty();
        doc.personal_details.full_name = "Solo Name".to_string();
        for template in [TemplateKind::Classic, TemplateKind::Sidebar] {
            doc.template = template;
            let rendered = render_pdf(&doc).unwrap();
            let text = pdf_extract::extract_text_from_mem(&rendered.bytes).unwrap();
            assert!(text.contains("Solo Name"));
            assert!(!text.contains(NAME_PLACEHOLDER));
            assert!(!text.contains(TITLE_PLACEHOLDER));
            for kind in ALL_SECTIONS {
                assert!(!text.contains(kind.placeholder()), "{kind:?} placeholder leaked");
            }
        }
    }

    #[test]
    fn test_empty_document_exports_one_blank_page() {
        let rendered = render_pdf(&ResumeDocument::empty()).unwrap();
        assert_eq!(rendered.fill.page_count, 1);
        assert_eq!(rendered.scale.compression_level, CompressionLevel::None);
    }

    #[test]
    fn test_dense_document_gets_compressed_and_paginated() {
        let rendered = render_pdf(&resume(TemplateKind::Modern, 14)).unwrap();
        assert_eq!(rendered.scale.compression_level, CompressionLevel::Heavy);
        assert!(rendered.fill.page_count >= 2);
    }

    #[test]
    fn test_scaling_never_adds_pages() {
        for jobs in [3, 6, 9, 12] {
            let doc = resume(TemplateKind::Minimal, jobs);
            let identity = derive_pdf_styles(&ScaleFactors::identity());
            let scaled = derive_pdf_styles(&scale_factors_for(&doc));
            let (_, unscaled_layout) = layout_with(&doc, &identity, RenderMode::Export).unwrap();
            let (_, scaled_layout) = layout_with(&doc, &scaled, RenderMode::Export).unwrap();
            assert!(
                scaled_layout.page_count() <= unscaled_layout.page_count(),
                "{jobs} jobs: {} > {}",
                scaled_layout.page_count(),
                unscaled_layout.page_count()
            );
        }
    }

    #[test]
    fn test_headings_never_end_a_page() {
        let doc = resume(TemplateKind::Classic, 10);
        let (_, layout) = layout_with(
            &doc,
            &derive_pdf_styles(&scale_factors_for(&doc)),
            RenderMode::Export,
        )
        .unwrap();
        let heading = descriptor_title(&doc, SectionKind::Education);
        for page in &layout.pages {
            let texts: Vec<&str> = page
                .marks
                .iter()
                .filter_map(|m| match m {
                    paginate::Mark::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            assert_ne!(texts.last().copied(), Some(heading.as_str()));
        }
    }

    fn descriptor_title(doc: &ResumeDocument, kind: SectionKind) -> String {
        crate::render::preset::descriptor(doc.template).section_title(kind)
    }

    #[test]
    fn test_every_text_mark_stays_inside_its_column() {
        use crate::layout::font_metrics::get_metrics;

        for template in [TemplateKind::Sidebar, TemplateKind::Creative, TemplateKind::Classic] {
            let mut doc = resume(template, 2);
            doc.personal_details.email = "ada.lovelace.countess@analytical-engines-example.org".to_string();
            doc.personal_details.website =
                Some("https://analytical-engines-example.org/notes/on/the/sketch/of/the/engine".to_string());
            doc.skills.tools = vec!["SuperCalifragilisticExpialidociousToolchain".to_string()];
            let styles = derive_pdf_styles(&scale_factors_for(&doc));
            let (tree, layout) = layout_with(&doc, &styles, RenderMode::Export).unwrap();

            for page in &layout.pages {
                for mark in &page.marks {
                    let paginate::Mark::Text { x, text, font, size, .. } = mark else {
                        continue;
                    };
                    let column = tree
                        .columns
                        .iter()
                        .filter(|c| c.x <= *x + 1e-6)
                        .last()
                        .unwrap_or_else(|| panic!("{text:?} starts left of every column"));
                    let end = x + get_metrics(*font).width_pt(text, *size);
                    assert!(
                        end <= column.x + column.width + 1e-6,
                        "{template:?}: {text:?} ends at {end:.1}pt, column ends at {:.1}pt",
                        column.x + column.width
                    );
                }
            }
        }
    }

    #[test]
    fn test_photo_is_embedded_in_sidebar_export() {
        let mut doc = resume(TemplateKind::Sidebar, 1);
        doc.personal_details.photo = Some(png_data_url(8, 8));
        let rendered = render_pdf(&doc).unwrap();
        let parsed = lopdf::Document::load_mem(&rendered.bytes).unwrap();
        assert!(parsed.objects.values().any(|o| {
            o.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|n| n.as_name().ok())
                == Some(b"Image".as_slice())
        }));
    }
}
