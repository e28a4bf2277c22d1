//! Flows the node tree onto A4 pages.
//!
//! Coordinates are in points with y measured down from the page top; the writer flips
//! them. Each column flows independently from page one. A keep-together group that
//! does not fit the remaining space moves to a fresh page when it would fit there;
//! taller groups are split line by line. Spacers at the top of a page are dropped.

use serde::Serialize;

use crate::layout::font_metrics::{get_metrics, PdfFont};
use crate::render::pdf::tree::{Align, Band, Column, Node, Paragraph, PdfTree, PhotoSlot, TextStyle};
use crate::render::preset::Rgb;

const EPSILON: f64 = 1e-6;
const BULLET: &str = "\u{2022}";

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        x: f64,
        /// Baseline, from the page top.
        baseline: f64,
        text: String,
        font: PdfFont,
        size: f64,
        color: Rgb,
    },
    Line {
        x: f64,
        y: f64,
        width: f64,
        thickness: f64,
        color: Rgb,
    },
    Fill {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Image {
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub marks: Vec<Mark>,
    /// Lowest used y per column on this page; `None` when the column is empty here.
    pub column_extents: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub bands: Vec<Band>,
    pub pages: Vec<PageLayout>,
    /// `(top, bottom)` of every column's usable area.
    pub column_bounds: Vec<(f64, f64)>,
}

impl PaginatedLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every drawn string, page by page.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| {
            p.marks.iter().filter_map(|m| match m {
                Mark::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
        })
    }
}

/// Page-level measurements for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnUsage {
    pub used: f64,
    pub available: f64,
}

pub fn paginate(tree: &PdfTree) -> PaginatedLayout {
    let column_count = tree.columns.len();
    let mut pages = vec![PageLayout {
        marks: Vec::new(),
        column_extents: vec![None; column_count],
    }];

    for (index, column) in tree.columns.iter().enumerate() {
        let mut flow = Flow::new(&mut pages, column, index, column_count);
        for node in &column.nodes {
            flow.place(node);
        }
    }

    PaginatedLayout {
        page_width: tree.page_width,
        page_height: tree.page_height,
        bands: tree.bands.clone(),
        pages,
        column_bounds: tree.columns.iter().map(|c| (c.top, c.bottom)).collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

fn wrap(paragraph: &Paragraph, width: f64) -> Vec<String> {
    let style = &paragraph.style;
    get_metrics(style.font).wrap_text(&paragraph.text, style.size, width - paragraph.indent)
}

/// Width left for a row's left text once the right label and a gap are reserved.
fn row_left_width(right: &str, right_style: &TextStyle, width: f64) -> f64 {
    let right_width = get_metrics(right_style.font).width_pt(right, right_style.size);
    (width - right_width - right_style.size).max(width / 3.0)
}

fn measure(node: &Node, width: f64) -> f64 {
    match node {
        Node::Paragraph(p) => wrap(p, width).len() as f64 * p.style.leading(),
        Node::Row {
            left,
            right,
            right_style,
        } => {
            let lines = wrap(left, row_left_width(right, right_style, width)).len().max(1);
            lines as f64 * left.style.leading().max(right_style.leading())
        }
        Node::Rule { thickness, .. } => *thickness,
        Node::Spacer(height) => *height,
        Node::Group { children, .. } => children.iter().map(|c| measure(c, width)).sum(),
        Node::Photo { size, .. } => *size,
        Node::WithPhoto {
            content, size, gap, ..
        } => {
            let inner = width - size - gap;
            let text: f64 = content.iter().map(|c| measure(c, inner)).sum();
            text.max(*size)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flow
// ────────────────────────────────────────────────────────────────────────────

struct Flow<'a> {
    pages: &'a mut Vec<PageLayout>,
    column_count: usize,
    column: usize,
    page: usize,
    x: f64,
    width: f64,
    top: f64,
    bottom: f64,
    y: f64,
}

impl<'a> Flow<'a> {
    fn new(
        pages: &'a mut Vec<PageLayout>,
        column: &Column,
        index: usize,
        column_count: usize,
    ) -> Self {
        Self {
            pages,
            column_count,
            column: index,
            page: 0,
            x: column.x,
            width: column.width,
            top: column.top,
            bottom: column.bottom,
            y: column.top,
        }
    }

    fn at_top(&self) -> bool {
        self.y <= self.top + EPSILON
    }

    fn fits(&self, height: f64) -> bool {
        self.y + height <= self.bottom + EPSILON
    }

    fn break_page(&mut self) {
        self.page += 1;
        self.y = self.top;
        while self.pages.len() <= self.page {
            self.pages.push(PageLayout {
                marks: Vec::new(),
                column_extents: vec![None; self.column_count],
            });
        }
    }

    /// Breaks unless `height` fits here or the page is still empty.
    fn reserve(&mut self, height: f64) {
        if !self.fits(height) && !self.at_top() {
            self.break_page();
        }
    }

    fn emit(&mut self, mark: Mark) {
        self.pages[self.page].marks.push(mark);
    }

    fn advance(&mut self, height: f64) {
        self.y += height;
        let extent = &mut self.pages[self.page].column_extents[self.column];
        *extent = Some(extent.map_or(self.y, |e| e.max(self.y)));
    }

    fn place(&mut self, node: &Node) {
        match node {
            Node::Spacer(height) => {
                if self.at_top() {
                    return;
                }
                if self.fits(*height) {
                    self.y += height;
                } else {
                    self.break_page();
                }
            }
            Node::Paragraph(p) => {
                let x = self.x;
                let width = self.width;
                self.place_paragraph(p, x, width);
            }
            Node::Row {
                left,
                right,
                right_style,
            } => {
                let height = measure(node, self.width);
                self.reserve(height);
                let leading = left.style.leading().max(right_style.leading());
                let left_width = row_left_width(right, right_style, self.width);
                let right_width = get_metrics(right_style.font).width_pt(right, right_style.size);
                let top = self.y;
                self.emit(Mark::Text {
                    x: self.x + self.width - right_width,
                    baseline: baseline(top, leading, left.style.size),
                    text: right.clone(),
                    font: right_style.font,
                    size: right_style.size,
                    color: right_style.color,
                });
                for (i, line) in wrap(left, left_width).into_iter().enumerate() {
                    let line_top = top + i as f64 * leading;
                    self.emit(text_mark(left, line, self.x, left_width, line_top, leading));
                }
                self.advance(height);
            }
            Node::Rule { thickness, color } => {
                self.reserve(*thickness);
                self.emit(Mark::Line {
                    x: self.x,
                    y: self.y + thickness / 2.0,
                    width: self.width,
                    thickness: *thickness,
                    color: *color,
                });
                self.advance(*thickness);
            }
            Node::Group {
                children,
                keep_together,
            } => {
                let height = measure(node, self.width);
                let page_height = self.bottom - self.top;
                if *keep_together && !self.fits(height) && !self.at_top() && height <= page_height
                {
                    self.break_page();
                }
                for child in children {
                    self.place(child);
                }
            }
            Node::Photo { slot, size, align } => {
                self.reserve(*size);
                let x = match align {
                    Align::Left => self.x,
                    Align::Center => self.x + (self.width - size) / 2.0,
                };
                let y = self.y;
                self.place_photo(slot, x, y, *size);
                self.advance(*size);
            }
            Node::WithPhoto {
                content,
                slot,
                size,
                gap,
            } => {
                let height = measure(node, self.width);
                self.reserve(height);
                let start = self.y;
                let inner = self.width - size - gap;
                let photo_x = self.x + self.width - size;
                self.place_photo(slot, photo_x, start, *size);

                let outer_width = self.width;
                self.width = inner;
                for child in content {
                    self.place(child);
                }
                self.width = outer_width;

                let used = self.y - start;
                if used < *size {
                    self.advance(size - used);
                }
            }
        }
    }

    fn place_paragraph(&mut self, p: &Paragraph, x: f64, width: f64) {
        let leading = p.style.leading();
        for (i, line) in wrap(p, width).into_iter().enumerate() {
            self.reserve(leading);
            if i == 0 && p.bullet {
                self.emit(Mark::Text {
                    x,
                    baseline: baseline(self.y, leading, p.style.size),
                    text: BULLET.to_string(),
                    font: p.style.font,
                    size: p.style.size,
                    color: p.style.color,
                });
            }
            let top = self.y;
            self.emit(text_mark(p, line, x, width, top, leading));
            self.advance(leading);
        }
    }

    fn place_photo(&mut self, slot: &PhotoSlot, x: f64, y: f64, size: f64) {
        match slot {
            PhotoSlot::Image(index) => self.emit(Mark::Image {
                index: *index,
                x,
                y,
                width: size,
                height: size,
            }),
            PhotoSlot::Initials { text, background } => {
                self.emit(Mark::Fill {
                    x,
                    y,
                    width: size,
                    height: size,
                    color: *background,
                });
                let font_size = size * 0.36;
                let text_width = get_metrics(PdfFont::HelveticaBold).width_pt(text, font_size);
                self.emit(Mark::Text {
                    x: x + (size - text_width) / 2.0,
                    baseline: y + size / 2.0 + font_size * 0.35,
                    text: text.clone(),
                    font: PdfFont::HelveticaBold,
                    size: font_size,
                    color: Rgb(0xff, 0xff, 0xff),
                });
            }
            PhotoSlot::Empty => {}
        }
    }
}

/// Baseline inside a line box: half the leading above, the ascent below that.
fn baseline(line_top: f64, leading: f64, size: f64) -> f64 {
    let ascent = get_metrics(PdfFont::Helvetica).ascent;
    line_top + (leading - size) / 2.0 + ascent * size
}

fn text_mark(p: &Paragraph, line: String, x: f64, width: f64, top: f64, leading: f64) -> Mark {
    let line_x = match p.align {
        Align::Left => x + p.indent,
        Align::Center => {
            let line_width = get_metrics(p.style.font).width_pt(&line, p.style.size);
            x + p.indent + ((width - p.indent - line_width) / 2.0).max(0.0)
        }
    };
    Mark::Text {
        x: line_x,
        baseline: baseline(top, leading, p.style.size),
        text: line,
        font: p.style.font,
        size: p.style.size,
        color: p.style.color,
    }
}

/// Used vs available height of each column on the last page.
pub fn last_page_usage(layout: &PaginatedLayout) -> Vec<ColumnUsage> {
    let Some(last) = layout.pages.last() else {
        return Vec::new();
    };
    layout
        .column_bounds
        .iter()
        .zip(&last.column_extents)
        .map(|(&(top, bottom), extent)| ColumnUsage {
            used: extent.map_or(0.0, |e| (e - top).max(0.0)),
            available: bottom - top,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb(0, 0, 0);

    fn style(size: f64) -> TextStyle {
        TextStyle {
            font: PdfFont::Helvetica,
            size,
            color: BLACK,
            line_height: 1.6,
        }
    }

    fn para(text: &str) -> Node {
        Node::Paragraph(Paragraph {
            text: text.to_string(),
            style: style(10.0),
            indent: 0.0,
            bullet: false,
            align: Align::Left,
        })
    }

    /// A tree with one column 100pt tall (16pt per line → 6 lines per page).
    fn tree(nodes: Vec<Node>) -> PdfTree {
        PdfTree {
            page_width: 300.0,
            page_height: 200.0,
            title: "test".to_string(),
            bands: Vec::new(),
            columns: vec![Column {
                x: 20.0,
                width: 260.0,
                top: 50.0,
                bottom: 150.0,
                nodes,
            }],
            images: Vec::new(),
        }
    }

    fn page_of(layout: &PaginatedLayout, needle: &str) -> usize {
        layout
            .pages
            .iter()
            .position(|p| {
                p.marks
                    .iter()
                    .any(|m| matches!(m, Mark::Text { text, .. } if text == needle))
            })
            .unwrap_or_else(|| panic!("{needle} not placed"))
    }

    #[test]
    fn test_short_content_fits_one_page() {
        let layout = paginate(&tree(vec![para("one"), para("two")]));
        assert_eq!(layout.page_count(), 1);
        let usage = last_page_usage(&layout);
        assert!((usage[0].used - 32.0).abs() < 1e-9);
        assert!((usage[0].available - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_lines_move_to_next_page() {
        let nodes = (0..8).map(|i| para(&format!("line {i}"))).collect();
        let layout = paginate(&tree(nodes));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(page_of(&layout, "line 5"), 0);
        assert_eq!(page_of(&layout, "line 6"), 1);
    }

    #[test]
    fn test_keep_together_group_moves_whole() {
        let group = Node::Group {
            children: vec![para("heading"), para("first item")],
            keep_together: true,
        };
        let mut nodes: Vec<Node> = (0..5).map(|i| para(&format!("filler {i}"))).collect();
        nodes.push(group);
        let layout = paginate(&tree(nodes));
        assert_eq!(page_of(&layout, "heading"), 1);
        assert_eq!(page_of(&layout, "first item"), 1);
    }

    #[test]
    fn test_oversized_group_is_split() {
        let children = (0..9).map(|i| para(&format!("row {i}"))).collect();
        let layout = paginate(&tree(vec![
            para("intro"),
            Node::Group {
                children,
                keep_together: true,
            },
        ]));
        // Taller than a page: flows in place instead of leaving page one nearly empty.
        assert_eq!(page_of(&layout, "row 0"), 0);
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn test_spacer_dropped_at_page_top() {
        let mut nodes: Vec<Node> = (0..6).map(|i| para(&format!("line {i}"))).collect();
        nodes.push(Node::Spacer(10.0));
        nodes.push(para("after"));
        let layout = paginate(&tree(nodes));
        let Some(Mark::Text { baseline, .. }) = layout.pages[1].marks.first().cloned() else {
            panic!("second page empty");
        };
        assert!(baseline < 50.0 + 16.0, "text should start at the top: {baseline}");
    }

    #[test]
    fn test_row_places_right_label_at_column_edge() {
        let layout = paginate(&tree(vec![Node::Row {
            left: Paragraph {
                text: "Title".to_string(),
                style: style(10.0),
                indent: 0.0,
                bullet: false,
                align: Align::Left,
            },
            right: "2020".to_string(),
            right_style: style(9.0),
        }]));
        let right = layout.pages[0]
            .marks
            .iter()
            .find_map(|m| match m {
                Mark::Text { text, x, .. } if text == "2020" => Some(*x),
                _ => None,
            })
            .unwrap();
        let width = get_metrics(PdfFont::Helvetica).width_pt("2020", 9.0);
        assert!((right + width - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_bullet_drawn_before_text() {
        let layout = paginate(&tree(vec![Node::Paragraph(Paragraph {
            text: "Did a thing".to_string(),
            style: style(10.0),
            indent: 9.0,
            bullet: true,
            align: Align::Left,
        })]));
        let texts: Vec<_> = layout.texts().collect();
        assert_eq!(texts, [BULLET, "Did a thing"]);
    }

    #[test]
    fn test_columns_flow_independently() {
        let mut t = tree(vec![para("main")]);
        t.columns.push(Column {
            x: 200.0,
            width: 80.0,
            top: 50.0,
            bottom: 150.0,
            nodes: (0..8).map(|i| para(&format!("side {i}"))).collect(),
        });
        let layout = paginate(&t);
        assert_eq!(layout.page_count(), 2);
        assert_eq!(page_of(&layout, "main"), 0);
        assert_eq!(layout.pages[1].column_extents[0], None);
        assert!(layout.pages[1].column_extents[1].is_some());
    }
}
