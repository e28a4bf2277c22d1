//! PDF document tree: columns of measured-later nodes built from the outline.
//!
//! Nodes carry point sizes straight from the PDF `StyleParameters`; nothing here knows
//! about pages. Section headings are grouped with their first item so pagination
//! never strands a heading at the bottom of a page.

use crate::layout::font_metrics::PdfFont;
use crate::layout::styles::StyleParameters;
use crate::models::ResumeDocument;
use crate::render::dates::{format_date, format_range, DateStyle};
use crate::render::outline::{
    build_outline, EntryDate, HeaderLine, OutlineEntry, RenderMode, ResumeOutline, SectionBody,
    SectionKind,
};
use crate::render::pdf::photo::{decode_photo, DecodedPhoto};
use crate::render::pdf::{A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::render::preset::{
    descriptor, ColumnLayout, ContactPlacement, HeaderAlign, LayoutDescriptor, Rgb,
};
use crate::render::{RenderError, PHOTO_SIZE_PT};

const RULE_THICKNESS: f64 = 0.75;
const TAG_SEPARATOR: &str = "  \u{00B7}  ";
const CONTACT_SEPARATOR: &str = "  |  ";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: PdfFont,
    pub size: f64,
    pub color: Rgb,
    pub line_height: f64,
}

impl TextStyle {
    pub fn leading(&self) -> f64 {
        self.size * self.line_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    /// Left offset of the text. A bullet, when present, is drawn inside this indent.
    pub indent: f64,
    pub bullet: bool,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhotoSlot {
    /// Index into [`PdfTree::images`].
    Image(usize),
    Initials { text: String, background: Rgb },
    /// Reserved space with nothing drawn.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Paragraph(Paragraph),
    /// Left-aligned text with a right-aligned label on its first line.
    Row {
        left: Paragraph,
        right: String,
        right_style: TextStyle,
    },
    Rule {
        thickness: f64,
        color: Rgb,
    },
    Spacer(f64),
    Group {
        children: Vec<Node>,
        keep_together: bool,
    },
    Photo {
        slot: PhotoSlot,
        size: f64,
        align: Align,
    },
    /// Content beside a photo box on the right.
    WithPhoto {
        content: Vec<Node>,
        slot: PhotoSlot,
        size: f64,
        gap: f64,
    },
}

/// Full-height background stripe repeated on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub x: f64,
    pub width: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub x: f64,
    pub width: f64,
    /// First usable y, measured from the page top.
    pub top: f64,
    /// Last usable y, measured from the page top.
    pub bottom: f64,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfTree {
    pub page_width: f64,
    pub page_height: f64,
    pub title: String,
    pub bands: Vec<Band>,
    pub columns: Vec<Column>,
    pub images: Vec<DecodedPhoto>,
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

pub fn build_tree(
    resume: &ResumeDocument,
    styles: &StyleParameters,
    mode: RenderMode,
) -> Result<PdfTree, RenderError> {
    let outline = build_outline(resume, mode);
    let preset = descriptor(resume.template);
    TreeBuilder::new(&outline, styles, preset).build()
}

struct Palette {
    title: Rgb,
    text: Rgb,
    muted: Rgb,
}

struct TreeBuilder<'a> {
    outline: &'a ResumeOutline,
    s: &'a StyleParameters,
    preset: &'a LayoutDescriptor,
    images: Vec<DecodedPhoto>,
}

impl<'a> TreeBuilder<'a> {
    fn new(
        outline: &'a ResumeOutline,
        s: &'a StyleParameters,
        preset: &'a LayoutDescriptor,
    ) -> Self {
        Self {
            outline,
            s,
            preset,
            images: Vec::new(),
        }
    }

    fn build(mut self) -> Result<PdfTree, RenderError> {
        let s = self.s;
        let top = s.padding_top;
        let bottom = A4_HEIGHT_PT - s.padding_bottom;
        let main_palette = Palette {
            title: self.preset.accent,
            text: self.preset.text,
            muted: self.preset.muted,
        };

        let mut bands = Vec::new();
        let columns = match self.preset.columns {
            ColumnLayout::Single => {
                let mut nodes = vec![self.header(&main_palette, self.preset.show_photo)?];
                for &kind in self.preset.main_sections {
                    nodes.extend(self.section(kind, &main_palette));
                }
                vec![Column {
                    x: s.padding_side,
                    width: A4_WIDTH_PT - 2.0 * s.padding_side,
                    top,
                    bottom,
                    nodes,
                }]
            }
            ColumnLayout::Sidebar { width_fraction } => {
                let sidebar_width = A4_WIDTH_PT * width_fraction;
                let inset = s.padding_side / 2.0;
                if let Some(color) = self.preset.sidebar_background {
                    bands.push(Band {
                        x: 0.0,
                        width: sidebar_width,
                        color,
                    });
                }
                let side_palette = Palette {
                    title: if self.preset.sidebar_background.is_some() {
                        self.preset.sidebar_text
                    } else {
                        self.preset.accent
                    },
                    text: self.preset.sidebar_text,
                    muted: self.preset.sidebar_text,
                };

                let mut side = Vec::new();
                if self.preset.show_photo {
                    side.push(Node::Photo {
                        slot: self.photo_slot()?,
                        size: PHOTO_SIZE_PT,
                        align: Align::Center,
                    });
                }
                if self.preset.contacts == ContactPlacement::Sidebar {
                    side.extend(self.sidebar_contacts(&side_palette));
                }
                for &kind in self.preset.sidebar_sections {
                    side.extend(self.section(kind, &side_palette));
                }

                let mut main = vec![self.header(&main_palette, false)?];
                for &kind in self.preset.main_sections {
                    main.extend(self.section(kind, &main_palette));
                }

                vec![
                    Column {
                        x: inset,
                        width: sidebar_width - 2.0 * inset,
                        top,
                        bottom,
                        nodes: side,
                    },
                    Column {
                        x: sidebar_width + inset,
                        width: A4_WIDTH_PT - sidebar_width - 2.0 * inset,
                        top,
                        bottom,
                        nodes: main,
                    },
                ]
            }
        };

        let title = self
            .outline
            .header
            .name
            .as_ref()
            .filter(|n| !n.placeholder)
            .map(|n| format!("{} - CV", n.text))
            .unwrap_or_else(|| "CV".to_string());

        Ok(PdfTree {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            title,
            bands,
            columns,
            images: self.images,
        })
    }

    fn style(&self, font: PdfFont, size: f64, color: Rgb) -> TextStyle {
        TextStyle {
            font,
            size,
            color,
            line_height: self.s.line_height,
        }
    }

    fn paragraph(&self, text: impl Into<String>, style: TextStyle) -> Paragraph {
        Paragraph {
            text: text.into(),
            style,
            indent: 0.0,
            bullet: false,
            align: Align::Left,
        }
    }

    // ── Header ──────────────────────────────────────────────────────────────

    fn header(&mut self, palette: &Palette, with_photo: bool) -> Result<Node, RenderError> {
        let s = self.s;
        let align = match self.preset.header_align {
            HeaderAlign::Center if !with_photo => Align::Center,
            _ => Align::Left,
        };
        let outline = self.outline;
        let header = &outline.header;
        let line_style = |line: &HeaderLine, font: PdfFont, size: f64, color: Rgb| {
            let font = if line.placeholder {
                PdfFont::HelveticaOblique
            } else {
                font
            };
            self.style(font, size, color)
        };

        let mut content = Vec::new();
        if let Some(name) = &header.name {
            let style = line_style(name, PdfFont::HelveticaBold, s.heading_font_size, palette.title);
            // Heading lines sit tighter than body copy.
            let style = TextStyle {
                line_height: 1.25,
                ..style
            };
            content.push(Node::Paragraph(Paragraph {
                align,
                ..self.paragraph(name.text.clone(), style)
            }));
        }
        if let Some(title) = &header.title {
            let style = line_style(title, PdfFont::Helvetica, s.section_title_font_size, palette.muted);
            content.push(Node::Paragraph(Paragraph {
                align,
                ..self.paragraph(title.text.clone(), style)
            }));
        }
        if self.preset.contacts == ContactPlacement::Header && !header.contacts.is_empty() {
            let text = header
                .contacts
                .iter()
                .map(|c| c.value.as_str())
                .collect::<Vec<_>>()
                .join(CONTACT_SEPARATOR);
            content.push(Node::Spacer(s.item_gap));
            content.push(Node::Paragraph(Paragraph {
                align,
                ..self.paragraph(
                    text,
                    self.style(PdfFont::Helvetica, s.detail_font_size, palette.muted),
                )
            }));
        }

        if with_photo {
            Ok(Node::WithPhoto {
                content,
                slot: self.photo_slot()?,
                size: PHOTO_SIZE_PT,
                gap: s.padding_side / 2.0,
            })
        } else {
            Ok(Node::Group {
                children: content,
                keep_together: true,
            })
        }
    }

    fn photo_slot(&mut self) -> Result<PhotoSlot, RenderError> {
        if let Some(source) = &self.outline.header.photo {
            let decoded = decode_photo(source)?;
            self.images.push(decoded);
            return Ok(PhotoSlot::Image(self.images.len() - 1));
        }
        if self.outline.header.initials.is_empty() {
            return Ok(PhotoSlot::Empty);
        }
        Ok(PhotoSlot::Initials {
            text: self.outline.header.initials.clone(),
            background: self.preset.accent,
        })
    }

    fn sidebar_contacts(&self, palette: &Palette) -> Vec<Node> {
        let s = self.s;
        let contacts = &self.outline.header.contacts;
        if contacts.is_empty() {
            return Vec::new();
        }
        let mut nodes = vec![Node::Spacer(s.section_margin_top)];
        for contact in contacts {
            nodes.push(Node::Paragraph(self.paragraph(
                contact.kind.label(),
                self.style(PdfFont::HelveticaBold, s.detail_font_size, palette.title),
            )));
            nodes.push(Node::Paragraph(self.paragraph(
                contact.value.clone(),
                self.style(PdfFont::Helvetica, s.detail_font_size, palette.text),
            )));
            nodes.push(Node::Spacer(s.item_gap));
        }
        nodes
    }

    // ── Sections ────────────────────────────────────────────────────────────

    /// Spacer, then the heading glued to the first item, then the remaining items.
    fn section(&self, kind: SectionKind, palette: &Palette) -> Vec<Node> {
        let s = self.s;
        let Some(section) = self.outline.section(kind) else {
            return Vec::new();
        };

        let mut heading = vec![Node::Paragraph(self.paragraph(
            self.preset.section_title(kind),
            self.style(PdfFont::HelveticaBold, s.section_title_font_size, palette.title),
        ))];
        if self.preset.title_rule {
            heading.push(Node::Rule {
                thickness: RULE_THICKNESS,
                color: palette.title,
            });
        }
        heading.push(Node::Spacer(s.item_gap * 2.0));

        let body_style = self.style(PdfFont::Helvetica, s.body_font_size, palette.text);
        let mut items: Vec<Node> = match &section.body {
            SectionBody::Paragraph(text) => {
                vec![Node::Paragraph(self.paragraph(text.clone(), body_style))]
            }
            SectionBody::Tags(tags) => {
                vec![Node::Paragraph(self.paragraph(tags.join(TAG_SEPARATOR), body_style))]
            }
            SectionBody::Placeholder(hint) => vec![Node::Paragraph(self.paragraph(
                *hint,
                self.style(PdfFont::HelveticaOblique, s.body_font_size, palette.muted),
            ))],
            SectionBody::Entries(entries) => entries
                .iter()
                .map(|entry| self.entry(entry, palette))
                .collect(),
        };

        let mut nodes = vec![Node::Spacer(s.section_margin_top)];
        let first = if items.is_empty() {
            None
        } else {
            Some(items.remove(0))
        };
        heading.extend(first);
        nodes.push(Node::Group {
            children: heading,
            keep_together: true,
        });
        nodes.extend(items);
        nodes
    }

    fn entry(&self, entry: &OutlineEntry, palette: &Palette) -> Node {
        let s = self.s;
        let title_style = self.style(PdfFont::HelveticaBold, s.body_font_size, palette.text);
        let detail_style = self.style(PdfFont::Helvetica, s.detail_font_size, palette.muted);
        let mut children = Vec::new();

        let date = entry.date.as_ref().map(pdf_date).filter(|d| !d.is_empty());
        let title = self.paragraph(entry.title.clone(), title_style);
        match date {
            Some(date) => children.push(Node::Row {
                left: title,
                right: date,
                right_style: detail_style,
            }),
            None if !entry.title.is_empty() => children.push(Node::Paragraph(title)),
            None => {}
        }

        let meta: Vec<&str> = [Some(entry.subtitle.as_str()), entry.location.as_deref()]
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .collect();
        if !meta.is_empty() {
            children.push(Node::Paragraph(self.paragraph(
                meta.join(", "),
                self.style(PdfFont::HelveticaOblique, s.body_font_size, palette.muted),
            )));
        }

        if !entry.bullets.is_empty() {
            children.push(Node::Spacer(s.item_gap));
            for bullet in &entry.bullets {
                children.push(Node::Paragraph(Paragraph {
                    indent: s.bullet_indent,
                    bullet: true,
                    ..self.paragraph(
                        bullet.clone(),
                        self.style(PdfFont::Helvetica, s.body_font_size, palette.text),
                    )
                }));
                children.push(Node::Spacer(s.item_gap));
            }
        }

        for detail in &entry.details {
            children.push(Node::Paragraph(self.paragraph(detail.clone(), detail_style)));
        }
        children.push(Node::Spacer(s.item_margin_bottom));

        Node::Group {
            children,
            keep_together: true,
        }
    }
}

fn pdf_date(date: &EntryDate) -> String {
    match date {
        EntryDate::Range(range) => format_range(range, DateStyle::Numeric),
        EntryDate::Single(date) => format_date(*date, DateStyle::Numeric),
    }
}

#[cfg(test)]
impl Node {
    /// Every string this node would draw, in order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Node::Paragraph(p) => vec![p.text.as_str()],
            Node::Row { left, right, .. } => vec![left.text.as_str(), right.as_str()],
            Node::Rule { .. } | Node::Spacer(_) => Vec::new(),
            Node::Group { children, .. } => children.iter().flat_map(Node::texts).collect(),
            Node::Photo { slot, .. } => slot_text(slot),
            Node::WithPhoto { content, slot, .. } => content
                .iter()
                .flat_map(Node::texts)
                .chain(slot_text(slot))
                .collect(),
        }
    }
}

#[cfg(test)]
fn slot_text(slot: &PhotoSlot) -> Vec<&str> {
    match slot {
        PhotoSlot::Initials { text, .. } => vec![text.as_str()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::policy::ScaleFactors;
    use crate::layout::styles::derive_pdf_styles;
    use crate::models::{DateRange, ExperienceEntry, TemplateKind};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample(template: TemplateKind) -> ResumeDocument {
        let mut doc = ResumeDocument::empty();
        doc.template = template;
        doc.personal_details.full_name = "Grace Hopper".to_string();
        doc.personal_details.email = "grace@example.com".to_string();
        doc.skills.skills = vec!["COBOL".to_string(), "Compilers".to_string()];
        doc.experience.push(ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Rear Admiral".to_string(),
            company: "US Navy".to_string(),
            location: String::new(),
            dates: DateRange::fixed(
                NaiveDate::from_ymd_opt(1943, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(1986, 8, 1).unwrap(),
            ),
            description: vec!["Found the first bug".to_string()],
        });
        doc
    }

    fn all_texts(tree: &PdfTree) -> Vec<String> {
        tree.columns
            .iter()
            .flat_map(|c| c.nodes.iter().flat_map(Node::texts))
            .map(str::to_string)
            .collect()
    }

    fn styles() -> StyleParameters {
        derive_pdf_styles(&ScaleFactors::identity())
    }

    #[test]
    fn test_single_column_geometry_uses_padding() {
        let s = styles();
        let tree = build_tree(&sample(TemplateKind::Classic), &s, RenderMode::Export).unwrap();
        assert_eq!(tree.columns.len(), 1);
        let column = &tree.columns[0];
        assert_eq!(column.x, s.padding_side);
        assert_eq!(column.top, s.padding_top);
        assert!((column.bottom - (A4_HEIGHT_PT - s.padding_bottom)).abs() < 1e-9);
        assert!(tree.bands.is_empty());
    }

    #[test]
    fn test_sidebar_template_builds_two_columns_and_band() {
        let tree = build_tree(&sample(TemplateKind::Sidebar), &styles(), RenderMode::Export).unwrap();
        assert_eq!(tree.columns.len(), 2);
        assert_eq!(tree.bands.len(), 1);
        let side: Vec<_> = tree.columns[0].nodes.iter().flat_map(Node::texts).collect();
        assert!(side.contains(&"SKILLS"));
        assert!(side.contains(&"grace@example.com"));
    }

    #[test]
    fn test_dates_use_numeric_style() {
        let tree = build_tree(&sample(TemplateKind::Modern), &styles(), RenderMode::Export).unwrap();
        assert!(all_texts(&tree).contains(&"12/1943 - 08/1986".to_string()));
    }

    #[test]
    fn test_undated_entry_renders_without_date_label() {
        let mut doc = sample(TemplateKind::Classic);
        doc.education.push(crate::models::EducationEntry {
            id: Uuid::new_v4(),
            institution: "Bryn Mawr".to_string(),
            degree: "BA".to_string(),
            field: "Mathematics".to_string(),
            location: None,
            dates: DateRange::default(),
            achievements: Vec::new(),
        });
        let texts = all_texts(&build_tree(&doc, &styles(), RenderMode::Export).unwrap());
        assert!(texts.contains(&"BA in Mathematics".to_string()));
        assert!(!texts.iter().any(|t| t.contains("Present")), "{texts:?}");
    }

    #[test]
    fn test_heading_is_grouped_with_first_item() {
        let tree = build_tree(&sample(TemplateKind::Minimal), &styles(), RenderMode::Export).unwrap();
        let group = tree.columns[0]
            .nodes
            .iter()
            .find(|n| n.texts().first() == Some(&"Experience"))
            .expect("experience heading");
        let Node::Group { keep_together, .. } = group else {
            panic!("heading should be a group");
        };
        assert!(keep_together);
        assert!(group.texts().contains(&"Rear Admiral"));
    }

    #[test]
    fn test_export_tree_has_no_placeholders() {
        let tree = build_tree(&ResumeDocument::empty(), &styles(), RenderMode::Export).unwrap();
        let texts = all_texts(&tree);
        assert!(texts.is_empty(), "unexpected text: {texts:?}");
    }

    #[test]
    fn test_initials_badge_without_photo() {
        let tree = build_tree(&sample(TemplateKind::Modern), &styles(), RenderMode::Export).unwrap();
        let Node::WithPhoto { slot, .. } = &tree.columns[0].nodes[0] else {
            panic!("modern header carries a photo box");
        };
        assert!(matches!(slot, PhotoSlot::Initials { text, .. } if text == "GH"));
        assert!(tree.images.is_empty());
    }

    #[test]
    fn test_bad_photo_fails_the_build() {
        let mut doc = sample(TemplateKind::Modern);
        doc.personal_details.photo = Some("data:image/gif;base64,R0lGODlh".to_string());
        let err = build_tree(&doc, &styles(), RenderMode::Export).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedImage(_)));
    }

    #[test]
    fn test_photo_ignored_by_templates_without_photo_box() {
        let mut doc = sample(TemplateKind::Classic);
        doc.personal_details.photo = Some("data:image/gif;base64,R0lGODlh".to_string());
        assert!(build_tree(&doc, &styles(), RenderMode::Export).is_ok());
    }
}
