//! Layout presets: one descriptor per template variant.
//!
//! A descriptor only decides placement and colour. Sizes always come from the derived
//! `StyleParameters`, so every template scales with the same density factors.

use crate::models::TemplateKind;
use crate::render::outline::SectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Components in the 0..=1 range PDF colour operators expect.
    pub fn unit(self) -> [f64; 3] {
        [self.0, self.1, self.2].map(|c| f64::from(c) / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnLayout {
    Single,
    /// A sidebar on the left taking `width_fraction` of the page width.
    Sidebar { width_fraction: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPlacement {
    Header,
    Sidebar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDescriptor {
    pub kind: TemplateKind,
    pub columns: ColumnLayout,
    pub header_align: HeaderAlign,
    pub contacts: ContactPlacement,
    pub accent: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub sidebar_background: Option<Rgb>,
    pub sidebar_text: Rgb,
    pub main_sections: &'static [SectionKind],
    pub sidebar_sections: &'static [SectionKind],
    pub show_photo: bool,
    pub uppercase_titles: bool,
    /// Rule drawn under each section title.
    pub title_rule: bool,
}

impl LayoutDescriptor {
    pub fn has_sidebar(&self) -> bool {
        matches!(self.columns, ColumnLayout::Sidebar { .. })
    }

    pub fn section_title(&self, kind: SectionKind) -> String {
        if self.uppercase_titles {
            kind.title().to_uppercase()
        } else {
            kind.title().to_string()
        }
    }
}

const SINGLE_COLUMN_ORDER: &[SectionKind] = &[
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Tools,
    SectionKind::Languages,
    SectionKind::Certifications,
    SectionKind::Projects,
];

const SIDEBAR_MAIN_ORDER: &[SectionKind] = &[
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Projects,
];

const SIDEBAR_ORDER: &[SectionKind] = &[
    SectionKind::Skills,
    SectionKind::Tools,
    SectionKind::Languages,
    SectionKind::Certifications,
];

const BLACK: Rgb = Rgb(0x1a, 0x1a, 0x1a);
const GREY: Rgb = Rgb(0x5f, 0x63, 0x68);
const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

static CLASSIC: LayoutDescriptor = LayoutDescriptor {
    kind: TemplateKind::Classic,
    columns: ColumnLayout::Single,
    header_align: HeaderAlign::Center,
    contacts: ContactPlacement::Header,
    accent: BLACK,
    text: BLACK,
    muted: GREY,
    sidebar_background: None,
    sidebar_text: BLACK,
    main_sections: SINGLE_COLUMN_ORDER,
    sidebar_sections: &[],
    show_photo: false,
    uppercase_titles: true,
    title_rule: true,
};

static MODERN: LayoutDescriptor = LayoutDescriptor {
    kind: TemplateKind::Modern,
    columns: ColumnLayout::Single,
    header_align: HeaderAlign::Left,
    contacts: ContactPlacement::Header,
    accent: Rgb(0x25, 0x63, 0xeb),
    text: BLACK,
    muted: GREY,
    sidebar_background: None,
    sidebar_text: BLACK,
    main_sections: SINGLE_COLUMN_ORDER,
    sidebar_sections: &[],
    show_photo: true,
    uppercase_titles: false,
    title_rule: true,
};

static MINIMAL: LayoutDescriptor = LayoutDescriptor {
    kind: TemplateKind::Minimal,
    columns: ColumnLayout::Single,
    header_align: HeaderAlign::Left,
    contacts: ContactPlacement::Header,
    accent: Rgb(0x1e, 0x3a, 0x5f),
    text: BLACK,
    muted: GREY,
    sidebar_background: None,
    sidebar_text: BLACK,
    main_sections: SINGLE_COLUMN_ORDER,
    sidebar_sections: &[],
    show_photo: false,
    uppercase_titles: false,
    title_rule: false,
};

static SIDEBAR: LayoutDescriptor = LayoutDescriptor {
    kind: TemplateKind::Sidebar,
    columns: ColumnLayout::Sidebar {
        width_fraction: 0.32,
    },
    header_align: HeaderAlign::Left,
    contacts: ContactPlacement::Sidebar,
    accent: Rgb(0x0f, 0x76, 0x6e),
    text: BLACK,
    muted: GREY,
    sidebar_background: Some(Rgb(0x1f, 0x2a, 0x37)),
    sidebar_text: WHITE,
    main_sections: SIDEBAR_MAIN_ORDER,
    sidebar_sections: SIDEBAR_ORDER,
    show_photo: true,
    uppercase_titles: true,
    title_rule: false,
};

static CREATIVE: LayoutDescriptor = LayoutDescriptor {
    kind: TemplateKind::Creative,
    columns: ColumnLayout::Sidebar {
        width_fraction: 0.30,
    },
    header_align: HeaderAlign::Left,
    contacts: ContactPlacement::Sidebar,
    accent: Rgb(0xc0, 0x26, 0x5d),
    text: BLACK,
    muted: GREY,
    sidebar_background: Some(Rgb(0xfc, 0xe7, 0xf3)),
    sidebar_text: BLACK,
    main_sections: SIDEBAR_MAIN_ORDER,
    sidebar_sections: SIDEBAR_ORDER,
    show_photo: true,
    uppercase_titles: false,
    title_rule: true,
};

pub fn descriptor(kind: TemplateKind) -> &'static LayoutDescriptor {
    match kind {
        TemplateKind::Classic => &CLASSIC,
        TemplateKind::Modern => &MODERN,
        TemplateKind::Minimal => &MINIMAL,
        TemplateKind::Sidebar => &SIDEBAR,
        TemplateKind::Creative => &CREATIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::outline::ALL_SECTIONS;

    const TEMPLATES: [TemplateKind; 5] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Minimal,
        TemplateKind::Sidebar,
        TemplateKind::Creative,
    ];

    #[test]
    fn test_every_section_is_placed_exactly_once() {
        for kind in TEMPLATES {
            let preset = descriptor(kind);
            for section in ALL_SECTIONS {
                let placed = preset
                    .main_sections
                    .iter()
                    .chain(preset.sidebar_sections)
                    .filter(|&&s| s == section)
                    .count();
                assert_eq!(placed, 1, "{kind:?} places {section:?} {placed} times");
            }
        }
    }

    #[test]
    fn test_descriptor_matches_kind() {
        for kind in TEMPLATES {
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn test_sidebar_presets_have_sidebar_sections() {
        for kind in TEMPLATES {
            let preset = descriptor(kind);
            assert_eq!(preset.has_sidebar(), !preset.sidebar_sections.is_empty());
        }
    }

    #[test]
    fn test_rgb_helpers() {
        assert_eq!(Rgb(0x25, 0x63, 0xeb).hex(), "#2563eb");
        assert_eq!(Rgb(255, 0, 0).unit(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_uppercase_titles() {
        assert_eq!(
            descriptor(TemplateKind::Classic).section_title(SectionKind::Experience),
            "EXPERIENCE"
        );
        assert_eq!(
            descriptor(TemplateKind::Minimal).section_title(SectionKind::Experience),
            "Experience"
        );
    }
}
