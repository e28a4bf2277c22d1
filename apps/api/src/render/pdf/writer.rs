//! Serialises a paginated layout into PDF bytes with `lopdf`.
//!
//! Text uses the base-14 Helvetica faces with WinAnsiEncoding, so nothing is embedded
//! beyond the optional photo. Each page gets one content stream; bands are painted first.

use lopdf::content::{Content, Operation};
use lopdf::Object::{Array, Dictionary, Integer, Name, Reference};
use lopdf::{Document, Object, Stream, StringFormat};

use crate::layout::font_metrics::PdfFont;
use crate::render::pdf::paginate::{Mark, PageLayout, PaginatedLayout};
use crate::render::pdf::photo::DecodedPhoto;
use crate::render::preset::Rgb;
use crate::render::RenderError;

const PRODUCER: &str = concat!("vitae ", env!("CARGO_PKG_VERSION"));

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

pub fn write_pdf(
    layout: &PaginatedLayout,
    images: &[DecodedPhoto],
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in PdfFont::ALL {
        let font_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", Name(b"Font".to_vec())),
            ("Subtype", Name(b"Type1".to_vec())),
            ("BaseFont", Name(font.base_font().as_bytes().to_vec())),
            ("Encoding", Name(b"WinAnsiEncoding".to_vec())),
        ]));
        fonts.set(font.resource_name(), Reference(font_id));
    }

    let mut xobjects = lopdf::Dictionary::new();
    for (index, photo) in images.iter().enumerate() {
        let stream = Stream::new(
            lopdf::Dictionary::from_iter(vec![
                ("Type", Name(b"XObject".to_vec())),
                ("Subtype", Name(b"Image".to_vec())),
                ("Width", Integer(i64::from(photo.width))),
                ("Height", Integer(i64::from(photo.height))),
                ("ColorSpace", Name(b"DeviceRGB".to_vec())),
                ("BitsPerComponent", Integer(8)),
            ]),
            photo.rgb.clone(),
        );
        let image_id = doc.add_object(stream);
        xobjects.set(image_name(index), Reference(image_id));
    }

    let mut resources = lopdf::Dictionary::new();
    resources.set("Font", Dictionary(fonts));
    if !images.is_empty() {
        resources.set("XObject", Dictionary(xobjects));
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(layout, page),
        };
        let encoded = content.encode()?;
        let content_id = doc.add_object(Stream::new(lopdf::Dictionary::new(), encoded));
        let page_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", Name(b"Page".to_vec())),
            ("Parent", Reference(pages_id)),
            (
                "MediaBox",
                Array(vec![
                    Integer(0),
                    Integer(0),
                    real(layout.page_width),
                    real(layout.page_height),
                ]),
            ),
            ("Resources", Reference(resources_id)),
            ("Contents", Reference(content_id)),
        ]));
        kids.push(Reference(page_id));
    }

    let pages = lopdf::Dictionary::from_iter(vec![
        ("Type", Name(b"Pages".to_vec())),
        ("Count", Integer(kids.len() as i64)),
        ("Kids", Array(kids)),
    ]);
    doc.objects.insert(pages_id, Dictionary(pages));

    let catalog_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
        ("Type", Name(b"Catalog".to_vec())),
        ("Pages", Reference(pages_id)),
    ]));
    let info_id = doc.add_object(lopdf::Dictionary::from_iter(vec![
        ("Title", literal(&win_ansi_lossy(title))),
        ("Producer", literal(PRODUCER)),
    ]));
    doc.trailer.set("Root", Reference(catalog_id));
    doc.trailer.set("Info", Reference(info_id));
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn set_fill(color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new("rg", vec![real(r), real(g), real(b)])
}

fn set_stroke(color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new("RG", vec![real(r), real(g), real(b)])
}

/// Content stream operators for one page. Layout y runs down from the top; PDF y runs up.
fn page_operations(layout: &PaginatedLayout, page: &PageLayout) -> Vec<Operation> {
    let height = layout.page_height;
    let mut ops = Vec::new();

    for band in &layout.bands {
        ops.push(set_fill(band.color));
        ops.push(Operation::new(
            "re",
            vec![real(band.x), real(0.0), real(band.width), real(height)],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    for mark in &page.marks {
        match mark {
            Mark::Fill {
                x,
                y,
                width,
                height: h,
                color,
            } => {
                ops.push(set_fill(*color));
                ops.push(Operation::new(
                    "re",
                    vec![real(*x), real(height - y - h), real(*width), real(*h)],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            Mark::Line {
                x,
                y,
                width,
                thickness,
                color,
            } => {
                ops.push(set_stroke(*color));
                ops.push(Operation::new("w", vec![real(*thickness)]));
                ops.push(Operation::new("m", vec![real(*x), real(height - y)]));
                ops.push(Operation::new("l", vec![real(x + width), real(height - y)]));
                ops.push(Operation::new("S", vec![]));
            }
            Mark::Image {
                index,
                x,
                y,
                width,
                height: h,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(*width),
                        real(0.0),
                        real(0.0),
                        real(*h),
                        real(*x),
                        real(height - y - h),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Name(image_name(*index).into_bytes())]));
                ops.push(Operation::new("Q", vec![]));
            }
            Mark::Text {
                x,
                baseline,
                text,
                font,
                size,
                color,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Name(font.resource_name().as_bytes().to_vec()), real(*size)],
                ));
                ops.push(set_fill(*color));
                ops.push(Operation::new("Td", vec![real(*x), real(height - baseline)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn win_ansi_lossy(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) < 0x100 { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::pdf::tree::Band;

    fn layout(marks: Vec<Mark>) -> PaginatedLayout {
        PaginatedLayout {
            page_width: 595.28,
            page_height: 841.89,
            bands: Vec::new(),
            pages: vec![PageLayout {
                marks,
                column_extents: vec![Some(100.0)],
            }],
            column_bounds: vec![(42.0, 770.0)],
        }
    }

    fn text(s: &str) -> Mark {
        Mark::Text {
            x: 42.0,
            baseline: 60.0,
            text: s.to_string(),
            font: PdfFont::Helvetica,
            size: 10.5,
            color: Rgb(0, 0, 0),
        }
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Aé•–"), vec![b'A', 0xE9, 0x95, 0x96]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_output_is_a_loadable_pdf() {
        let bytes = write_pdf(&layout(vec![text("Hello")]), &[], "Test - CV").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_page_count_matches_layout() {
        let mut l = layout(vec![text("one")]);
        l.pages.push(PageLayout {
            marks: vec![text("two")],
            column_extents: vec![Some(80.0)],
        });
        let bytes = write_pdf(&l, &[], "CV").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_text_is_extractable() {
        let bytes = write_pdf(&layout(vec![text("Ada Lovelace")]), &[], "CV").unwrap();
        let extracted = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(extracted.contains("Ada Lovelace"), "got: {extracted:?}");
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let ops = page_operations(&layout(vec![text("x")]), &layout(vec![text("x")]).pages[0]);
        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        let y = td.operands[1].as_float().unwrap();
        assert!((f64::from(y) - (841.89 - 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_bands_painted_before_marks() {
        let mut l = layout(vec![text("x")]);
        l.bands.push(Band {
            x: 0.0,
            width: 180.0,
            color: Rgb(10, 20, 30),
        });
        let ops = page_operations(&l, &l.pages[0]);
        assert_eq!(ops[0].operator, "rg");
        assert_eq!(ops[1].operator, "re");
        assert_eq!(ops[2].operator, "f");
    }

    #[test]
    fn test_image_is_embedded() {
        let photo = DecodedPhoto {
            width: 2,
            height: 2,
            rgb: vec![255; 12],
        };
        let l = layout(vec![Mark::Image {
            index: 0,
            x: 400.0,
            y: 42.0,
            width: 72.0,
            height: 72.0,
        }]);
        let bytes = write_pdf(&l, &[photo], "CV").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let has_image = doc.objects.values().any(|obj| {
            obj.as_stream()
                .ok()
                .and_then(|s| s.dict.get(b"Subtype").ok())
                .and_then(|o| o.as_name().ok())
                == Some(b"Image".as_slice())
        });
        assert!(has_image);
    }
}
