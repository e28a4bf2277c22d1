//! HTML preview renderer.
//!
//! Produces a self-contained A4 page. Every size comes from the pixel-based
//! `StyleParameters`, so the preview shrinks in lock-step with the PDF export.

use std::fmt::Write;

use crate::layout::policy::scale_factors_for;
use crate::layout::styles::{derive_html_styles, StyleParameters, PX_PER_PT};
use crate::models::ResumeDocument;
use crate::render::dates::{format_date, format_range, DateStyle};
use crate::render::outline::{
    build_outline, EntryDate, HeaderLine, OutlineEntry, OutlineSection,
    RenderMode, ResumeOutline, SectionBody, SectionKind,
};
use crate::render::preset::{descriptor, ColumnLayout, ContactPlacement, HeaderAlign, LayoutDescriptor};
use crate::render::PHOTO_SIZE_PT;

/// Renders the preview (or a print-ready page in export mode) with density scaling.
pub fn render_html(resume: &ResumeDocument, mode: RenderMode) -> String {
    let scale = scale_factors_for(resume);
    let styles = derive_html_styles(&scale);
    let outline = build_outline(resume, mode);
    render_outline(&outline, &styles, descriptor(resume.template))
}

pub fn render_outline(
    outline: &ResumeOutline,
    styles: &StyleParameters,
    preset: &LayoutDescriptor,
) -> String {
    let mut body = String::new();
    match preset.columns {
        ColumnLayout::Single => {
            body.push_str(r#"<div class="single">"#);
            push_header(&mut body, outline, preset);
            for &kind in preset.main_sections {
                push_section(&mut body, outline, preset, kind);
            }
            body.push_str("</div>");
        }
        ColumnLayout::Sidebar { .. } => {
            body.push_str(r#"<div class="columns"><aside class="sidebar">"#);
            if preset.show_photo {
                push_photo(&mut body, outline);
            }
            if preset.contacts == ContactPlacement::Sidebar {
                push_contacts(&mut body, outline, "sidebar-contacts");
            }
            for &kind in preset.sidebar_sections {
                push_section(&mut body, outline, preset, kind);
            }
            body.push_str(r#"</aside><main class="main">"#);
            push_header(&mut body, outline, preset);
            for &kind in preset.main_sections {
                push_section(&mut body, outline, preset, kind);
            }
            body.push_str("</main></div>");
        }
    }

    let title = outline
        .header
        .name
        .as_ref()
        .filter(|n| !n.placeholder)
        .map(|n| format!("{} - CV", n.text))
        .unwrap_or_else(|| "CV".to_string());

    let scale = styles.scale;
    format!(
        concat!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<title>{title}</title>\n<style>\n{css}</style>\n</head>\n<body>\n",
            "<div class=\"page template-{template} mode-{mode}\" data-density=\"{density}\" ",
            "data-compression=\"{level}\" data-spacing-scale=\"{spacing}\" data-font-scale=\"{font}\">",
            "{body}</div>\n</body>\n</html>\n"
        ),
        title = escape(&title),
        css = stylesheet(styles, preset),
        template = template_slug(preset),
        mode = match outline.mode {
            RenderMode::Preview => "preview",
            RenderMode::Export => "export",
        },
        density = scale.content_density,
        level = scale.compression_level.as_str(),
        spacing = scale.spacing_scale,
        font = scale.font_scale,
        body = body,
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ────────────────────────────────────────────────────────────────────────────

fn stylesheet(s: &StyleParameters, preset: &LayoutDescriptor) -> String {
    let photo = PHOTO_SIZE_PT * PX_PER_PT;
    let mut css = String::new();

    let _ = writeln!(css, "@page {{ size: A4; margin: 0; }}");
    let _ = writeln!(css, "* {{ box-sizing: border-box; margin: 0; padding: 0; }}");
    let _ = writeln!(css, "body {{ background: #f3f4f6; }}");
    let _ = writeln!(
        css,
        ".page {{ width: 210mm; min-height: 297mm; margin: 0 auto; background: #fff; \
         color: {}; font-family: Helvetica, Arial, sans-serif; font-size: {}; line-height: {}; }}",
        preset.text.hex(),
        s.css(s.body_font_size),
        s.line_height,
    );
    let _ = writeln!(
        css,
        ".single {{ padding: {} {} {}; }}",
        s.css(s.padding_top),
        s.css(s.padding_side),
        s.css(s.padding_bottom),
    );
    if let ColumnLayout::Sidebar { width_fraction } = preset.columns {
        let column_padding = format!(
            "{} {} {}",
            s.css(s.padding_top),
            s.css(s.padding_side / 2.0),
            s.css(s.padding_bottom)
        );
        let _ = writeln!(
            css,
            ".columns {{ display: grid; grid-template-columns: {:.1}% 1fr; min-height: 297mm; }}",
            width_fraction * 100.0
        );
        let _ = writeln!(
            css,
            ".sidebar {{ background: {}; color: {}; padding: {column_padding}; }}",
            preset.sidebar_background.map(|c| c.hex()).unwrap_or_else(|| "transparent".into()),
            preset.sidebar_text.hex(),
        );
        let _ = writeln!(css, ".main {{ padding: {column_padding}; }}");
        let _ = writeln!(
            css,
            ".sidebar .photo {{ margin-bottom: {}; }}",
            s.css(s.section_margin_top)
        );
    }
    let _ = writeln!(
        css,
        ".header {{ display: flex; align-items: center; gap: {}; justify-content: {}; text-align: {}; }}",
        s.css(s.padding_side / 2.0),
        match preset.header_align {
            HeaderAlign::Center => "center",
            HeaderAlign::Left => "space-between",
        },
        match preset.header_align {
            HeaderAlign::Center => "center",
            HeaderAlign::Left => "left",
        },
    );
    let _ = writeln!(
        css,
        ".name {{ font-size: {}; font-weight: 700; line-height: 1.2; color: {}; }}",
        s.css(s.heading_font_size),
        preset.accent.hex(),
    );
    let _ = writeln!(
        css,
        ".title {{ font-size: {}; color: {}; }}",
        s.css(s.section_title_font_size),
        preset.muted.hex(),
    );
    let _ = writeln!(
        css,
        ".contacts {{ list-style: none; font-size: {}; margin-top: {}; }}",
        s.css(s.detail_font_size),
        s.css(s.item_gap),
    );
    let _ = writeln!(
        css,
        ".header .contacts li {{ display: inline; color: {}; }} .header .contacts li + li::before {{ content: \" | \"; }}",
        preset.muted.hex(),
    );
    let _ = writeln!(
        css,
        ".photo {{ width: {photo:.1}px; height: {photo:.1}px; flex: none; border-radius: 50%; \
         overflow: hidden; object-fit: cover; display: flex; align-items: center; justify-content: center; }}"
    );
    let _ = writeln!(
        css,
        ".badge {{ background: {}; color: #fff; font-weight: 700; font-size: {}; }}",
        preset.accent.hex(),
        s.css(s.heading_font_size),
    );
    let _ = writeln!(css, ".section {{ margin-top: {}; }}", s.css(s.section_margin_top));
    let _ = writeln!(
        css,
        ".section-title {{ font-size: {}; font-weight: 700; color: {}; margin-bottom: {}; break-after: avoid;{} }}",
        s.css(s.section_title_font_size),
        preset.accent.hex(),
        s.css(s.item_gap * 2.0),
        if preset.title_rule {
            format!(" border-bottom: 1px solid {}; padding-bottom: {};", preset.accent.hex(), s.css(s.item_gap))
        } else {
            String::new()
        },
    );
    let _ = writeln!(
        css,
        ".entry {{ margin-bottom: {}; break-inside: avoid; }}",
        s.css(s.item_margin_bottom)
    );
    let _ = writeln!(
        css,
        ".entry-head {{ display: flex; justify-content: space-between; gap: {}; }}",
        s.css(s.bullet_indent)
    );
    let _ = writeln!(css, ".entry-title {{ font-weight: 700; }}");
    let _ = writeln!(
        css,
        ".entry-date, .entry-meta, .detail {{ font-size: {}; color: {}; }}",
        s.css(s.detail_font_size),
        preset.muted.hex(),
    );
    let _ = writeln!(css, ".entry-date {{ white-space: nowrap; }}");
    let _ = writeln!(
        css,
        ".bullets {{ padding-left: {}; margin-top: {}; }} .bullets li {{ margin-bottom: {}; }}",
        s.css(s.bullet_indent),
        s.css(s.item_gap),
        s.css(s.item_gap),
    );
    let _ = writeln!(
        css,
        ".tags {{ list-style: none; display: flex; flex-wrap: wrap; gap: {} {}; }}",
        s.css(s.item_gap),
        s.css(s.item_gap * 2.0),
    );
    let _ = writeln!(css, ".placeholder {{ color: {}; font-style: italic; opacity: 0.7; }}", preset.muted.hex());
    let _ = writeln!(
        css,
        "@media print {{ body {{ background: none; }} .page {{ margin: 0; }} .placeholder {{ display: none; }} }}"
    );
    css
}

// ────────────────────────────────────────────────────────────────────────────
// Body fragments
// ────────────────────────────────────────────────────────────────────────────

/// Sidebar layouts show the photo in the sidebar, so the header only carries it otherwise.
fn push_header(out: &mut String, outline: &ResumeOutline, preset: &LayoutDescriptor) {
    out.push_str(r#"<header class="header"><div class="identity">"#);
    if let Some(name) = &outline.header.name {
        push_line(out, "h1", "name", name);
    }
    if let Some(title) = &outline.header.title {
        push_line(out, "p", "title", title);
    }
    if preset.contacts == ContactPlacement::Header {
        push_contacts(out, outline, "contacts");
    }
    out.push_str("</div>");
    if preset.show_photo && !preset.has_sidebar() {
        push_photo(out, outline);
    }
    out.push_str("</header>");
}

fn push_line(out: &mut String, tag: &str, class: &str, line: &HeaderLine) {
    let class = if line.placeholder {
        format!("{class} placeholder")
    } else {
        class.to_string()
    };
    let _ = write!(out, r#"<{tag} class="{class}">{}</{tag}>"#, escape(&line.text));
}

fn push_contacts(out: &mut String, outline: &ResumeOutline, class: &str) {
    if outline.header.contacts.is_empty() {
        return;
    }
    let _ = write!(out, r#"<ul class="contacts {class}">"#);
    for contact in &outline.header.contacts {
        let _ = write!(
            out,
            r#"<li title="{}">{}</li>"#,
            contact.kind.label(),
            escape(&contact.value)
        );
    }
    out.push_str("</ul>");
}

/// Fixed-size photo box. Without a usable photo the same box holds the initials
/// badge, or stays empty, so the header never reflows.
fn push_photo(out: &mut String, outline: &ResumeOutline) {
    match outline.header.photo.as_deref().filter(|p| is_image_data_url(p)) {
        Some(photo) => {
            let _ = write!(out, r#"<img class="photo" src="{}" alt="">"#, escape(photo));
        }
        None if !outline.header.initials.is_empty() => {
            let _ = write!(
                out,
                r#"<div class="photo badge">{}</div>"#,
                escape(&outline.header.initials)
            );
        }
        None => out.push_str(r#"<div class="photo"></div>"#),
    }
}

fn push_section(out: &mut String, outline: &ResumeOutline, preset: &LayoutDescriptor, kind: SectionKind) {
    let Some(section) = outline.section(kind) else {
        return;
    };
    let _ = write!(
        out,
        r#"<section class="section section-{}"><h2 class="section-title">{}</h2>"#,
        section_slug(kind),
        escape(&preset.section_title(kind)),
    );
    push_body(out, section);
    out.push_str("</section>");
}

fn push_body(out: &mut String, section: &OutlineSection) {
    match &section.body {
        SectionBody::Paragraph(text) => {
            let _ = write!(out, r#"<p class="summary">{}</p>"#, escape(text));
        }
        SectionBody::Tags(tags) => {
            out.push_str(r#"<ul class="tags">"#);
            for tag in tags {
                let _ = write!(out, "<li>{}</li>", escape(tag));
            }
            out.push_str("</ul>");
        }
        SectionBody::Entries(entries) => {
            for entry in entries {
                push_entry(out, entry);
            }
        }
        SectionBody::Placeholder(hint) => {
            let _ = write!(out, r#"<p class="placeholder">{}</p>"#, escape(hint));
        }
    }
}

fn push_entry(out: &mut String, entry: &OutlineEntry) {
    out.push_str(r#"<article class="entry"><div class="entry-head"><div>"#);
    if !entry.title.is_empty() {
        let _ = write!(out, r#"<h3 class="entry-title">{}</h3>"#, escape(&entry.title));
    }
    let meta: Vec<&str> = [Some(entry.subtitle.as_str()), entry.location.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    if !meta.is_empty() {
        let _ = write!(out, r#"<p class="entry-meta">{}</p>"#, escape(&meta.join(", ")));
    }
    out.push_str("</div>");
    if let Some(date) = entry.date.as_ref().map(html_date).filter(|d| !d.is_empty()) {
        let _ = write!(out, r#"<span class="entry-date">{}</span>"#, escape(&date));
    }
    out.push_str("</div>");
    if !entry.bullets.is_empty() {
        out.push_str(r#"<ul class="bullets">"#);
        for bullet in &entry.bullets {
            let _ = write!(out, "<li>{}</li>", escape(bullet));
        }
        out.push_str("</ul>");
    }
    for detail in &entry.details {
        let _ = write!(out, r#"<p class="detail">{}</p>"#, escape(detail));
    }
    out.push_str("</article>");
}

fn html_date(date: &EntryDate) -> String {
    match date {
        EntryDate::Range(range) => format_range(range, DateStyle::MonthYear),
        EntryDate::Single(date) => format_date(*date, DateStyle::MonthYear),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn is_image_data_url(src: &str) -> bool {
    src.starts_with("data:image/")
}

fn template_slug(preset: &LayoutDescriptor) -> &'static str {
    use crate::models::TemplateKind;
    match preset.kind {
        TemplateKind::Classic => "classic",
        TemplateKind::Modern => "modern",
        TemplateKind::Minimal => "minimal",
        TemplateKind::Sidebar => "sidebar",
        TemplateKind::Creative => "creative",
    }
}

fn section_slug(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "summary",
        SectionKind::Experience => "experience",
        SectionKind::Education => "education",
        SectionKind::Skills => "skills",
        SectionKind::Tools => "tools",
        SectionKind::Languages => "languages",
        SectionKind::Certifications => "certifications",
        SectionKind::Projects => "projects",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateRange, ExperienceEntry, TemplateKind};
    use crate::render::outline::{ALL_SECTIONS, NAME_PLACEHOLDER};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn filled(template: TemplateKind) -> ResumeDocument {
        let mut doc = ResumeDocument::empty();
        doc.template = template;
        doc.personal_details.full_name = "Ada <Lovelace>".to_string();
        doc.personal_details.title = "Engineer".to_string();
        doc.personal_details.email = "ada@example.com".to_string();
        doc.experience.push(ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Analyst".to_string(),
            company: "Engines & Co".to_string(),
            location: String::new(),
            dates: DateRange::ongoing(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            description: vec!["Wrote the first program".to_string()],
        });
        doc
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_html(&filled(TemplateKind::Classic), RenderMode::Export);
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(html.contains("Engines &amp; Co"));
        assert!(!html.contains("<Lovelace>"));
    }

    #[test]
    fn test_preview_shows_placeholders_and_export_hides_them() {
        let doc = ResumeDocument::empty();
        let preview = render_html(&doc, RenderMode::Preview);
        let export = render_html(&doc, RenderMode::Export);
        assert!(preview.contains(NAME_PLACEHOLDER));
        assert!(!export.contains(NAME_PLACEHOLDER));
        for kind in ALL_SECTIONS {
            assert!(preview.contains(&escape(kind.placeholder())), "{kind:?}");
            assert!(!export.contains(&escape(kind.placeholder())), "{kind:?}");
        }
    }

    #[test]
    fn test_sizes_follow_derived_styles() {
        let doc = filled(TemplateKind::Modern);
        let styles = derive_html_styles(&scale_factors_for(&doc));
        let html = render_html(&doc, RenderMode::Preview);
        assert!(html.contains(&format!("font-size: {};", styles.css(styles.body_font_size))));
        assert!(html.contains(&format!("font-size: {};", styles.css(styles.heading_font_size))));
    }

    #[test]
    fn test_ongoing_dates_show_present() {
        let html = render_html(&filled(TemplateKind::Minimal), RenderMode::Export);
        assert!(html.contains("Jan 2020 - Present"));
    }

    #[test]
    fn test_sidebar_template_renders_two_columns() {
        let html = render_html(&filled(TemplateKind::Sidebar), RenderMode::Preview);
        assert!(html.contains(r#"<aside class="sidebar">"#));
        assert!(html.contains("grid-template-columns: 32.0% 1fr"));
        // Initials badge stands in for the missing photo.
        assert_eq!(html.matches(r#"<div class="photo badge">AL</div>"#).count(), 1);
    }

    #[test]
    fn test_single_column_photo_sits_in_header() {
        let html = render_html(&filled(TemplateKind::Modern), RenderMode::Preview);
        let header = &html[html.find(r#"<header class="header">"#).unwrap()..];
        let header = &header[..header.find("</header>").unwrap()];
        assert!(header.contains(r#"<div class="photo badge">AL</div>"#));
    }

    #[test]
    fn test_non_image_photo_is_not_embedded() {
        let mut doc = filled(TemplateKind::Modern);
        doc.personal_details.photo = Some("javascript:alert(1)".to_string());
        let html = render_html(&doc, RenderMode::Preview);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_density_metadata_is_exposed() {
        let html = render_html(&ResumeDocument::empty(), RenderMode::Preview);
        assert!(html.contains(r#"data-density="0""#));
        assert!(html.contains(r#"data-compression="none""#));
    }
}
