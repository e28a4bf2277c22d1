//! Renderer-neutral outline of a résumé.
//!
//! Both the HTML preview and the PDF export walk the same outline, so section content,
//! entry ordering and placeholder rules cannot drift between them. Placeholders exist
//! only in [`RenderMode::Preview`]; an exported document carries user content alone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DateRange, ResumeDocument};
use crate::render::dates::{format_date, DateStyle};

/// Interactive preview or final export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Preview,
    Export,
}

impl RenderMode {
    pub fn shows_placeholders(self) -> bool {
        matches!(self, RenderMode::Preview)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outline types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Tools,
    Languages,
    Certifications,
    Projects,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "Professional Summary",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Tools => "Tools",
            SectionKind::Languages => "Languages",
            SectionKind::Certifications => "Certifications",
            SectionKind::Projects => "Projects",
        }
    }

    /// Hint shown in the preview while the section is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            SectionKind::Summary => "Add a short professional summary to introduce yourself.",
            SectionKind::Experience => "Add your work experience to see it here.",
            SectionKind::Education => "Add your education to see it here.",
            SectionKind::Skills => "Add skills to highlight your strengths.",
            SectionKind::Tools => "Add the tools you work with.",
            SectionKind::Languages => "Add the languages you speak.",
            SectionKind::Certifications => "Add certifications to back up your expertise.",
            SectionKind::Projects => "Add projects to showcase your work.",
        }
    }
}

/// Every kind in canonical order.
pub const ALL_SECTIONS: [SectionKind; 8] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Tools,
    SectionKind::Languages,
    SectionKind::Certifications,
    SectionKind::Projects,
];

pub const NAME_PLACEHOLDER: &str = "Your Name";
pub const TITLE_PLACEHOLDER: &str = "Your Professional Title";

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub text: String,
    pub placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Website,
    LinkedIn,
    GitHub,
}

impl ContactKind {
    pub fn label(self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "Phone",
            ContactKind::Location => "Location",
            ContactKind::Website => "Website",
            ContactKind::LinkedIn => "LinkedIn",
            ContactKind::GitHub => "GitHub",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineHeader {
    pub name: Option<HeaderLine>,
    pub title: Option<HeaderLine>,
    pub contacts: Vec<ContactItem>,
    /// Raw `data:` URL, when the user uploaded a photo.
    pub photo: Option<String>,
    /// Initials for the badge drawn in place of a missing photo. Empty when there is
    /// nothing to show.
    pub initials: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryDate {
    Range(DateRange),
    Single(NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlineEntry {
    pub title: String,
    pub subtitle: String,
    pub location: Option<String>,
    pub date: Option<EntryDate>,
    pub bullets: Vec<String>,
    /// Secondary lines in the detail font (credential ids, links, technologies).
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Paragraph(String),
    Entries(Vec<OutlineEntry>),
    Tags(Vec<String>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSection {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl OutlineSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, SectionBody::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeOutline {
    pub mode: RenderMode,
    pub header: OutlineHeader,
    /// Present sections in canonical order. Empty sections are absent in export mode.
    pub sections: Vec<OutlineSection>,
}

impl ResumeOutline {
    pub fn section(&self, kind: SectionKind) -> Option<&OutlineSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

pub fn build_outline(resume: &ResumeDocument, mode: RenderMode) -> ResumeOutline {
    let sections = ALL_SECTIONS
        .iter()
        .filter_map(|&kind| {
            let body = match section_body(resume, kind) {
                Some(body) => body,
                None if mode.shows_placeholders() => SectionBody::Placeholder(kind.placeholder()),
                None => return None,
            };
            Some(OutlineSection { kind, body })
        })
        .collect();

    ResumeOutline {
        mode,
        header: build_header(resume, mode),
        sections,
    }
}

fn build_header(resume: &ResumeDocument, mode: RenderMode) -> OutlineHeader {
    let details = &resume.personal_details;

    let line = |value: &str, placeholder: &str| -> Option<HeaderLine> {
        let value = value.trim();
        if !value.is_empty() {
            Some(HeaderLine {
                text: value.to_string(),
                placeholder: false,
            })
        } else if mode.shows_placeholders() {
            Some(HeaderLine {
                text: placeholder.to_string(),
                placeholder: true,
            })
        } else {
            None
        }
    };

    let mut contacts = Vec::new();
    let mut push = |kind: ContactKind, value: Option<&str>| {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            let value = match kind {
                ContactKind::Website | ContactKind::LinkedIn | ContactKind::GitHub => {
                    clean_url(value)
                }
                _ => value.to_string(),
            };
            contacts.push(ContactItem { kind, value });
        }
    };
    push(ContactKind::Email, Some(details.email.as_str()));
    push(ContactKind::Phone, Some(details.phone.as_str()));
    push(ContactKind::Location, details.location.as_deref());
    push(ContactKind::Website, details.website.as_deref());
    push(ContactKind::LinkedIn, details.linkedin.as_deref());
    push(ContactKind::GitHub, details.github.as_deref());

    let photo = details
        .photo
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let mut badge = initials(&details.full_name);
    if badge.is_empty() && mode.shows_placeholders() {
        badge = initials(NAME_PLACEHOLDER);
    }

    OutlineHeader {
        name: line(&details.full_name, NAME_PLACEHOLDER),
        title: line(&details.title, TITLE_PLACEHOLDER),
        contacts,
        photo,
        initials: badge,
    }
}

/// `None` when the section has no user content.
fn section_body(resume: &ResumeDocument, kind: SectionKind) -> Option<SectionBody> {
    let body = match kind {
        SectionKind::Summary => {
            let summary = resume.personal_details.summary.as_deref()?.trim();
            if summary.is_empty() {
                return None;
            }
            SectionBody::Paragraph(summary.to_string())
        }
        SectionKind::Experience => SectionBody::Entries(
            resume
                .experience
                .iter()
                .map(|e| OutlineEntry {
                    title: e.position.trim().to_string(),
                    subtitle: e.company.trim().to_string(),
                    location: non_blank(&e.location),
                    date: Some(EntryDate::Range(e.dates)),
                    bullets: non_blank_lines(&e.description),
                    details: Vec::new(),
                })
                .collect(),
        ),
        SectionKind::Education => SectionBody::Entries(
            resume
                .education
                .iter()
                .map(|e| {
                    let degree = e.degree.trim();
                    let field = e.field.trim();
                    let title = match (degree.is_empty(), field.is_empty()) {
                        (false, false) => format!("{degree} in {field}"),
                        (false, true) => degree.to_string(),
                        (true, _) => field.to_string(),
                    };
                    OutlineEntry {
                        title,
                        subtitle: e.institution.trim().to_string(),
                        location: e.location.as_deref().and_then(non_blank),
                        date: Some(EntryDate::Range(e.dates)),
                        bullets: non_blank_lines(&e.achievements),
                        details: Vec::new(),
                    }
                })
                .collect(),
        ),
        SectionKind::Skills => SectionBody::Tags(non_blank_lines(&resume.skills.skills)),
        SectionKind::Tools => SectionBody::Tags(non_blank_lines(&resume.skills.tools)),
        SectionKind::Languages => SectionBody::Tags(
            resume
                .skills
                .languages
                .iter()
                .filter(|l| !l.language.trim().is_empty())
                .map(|l| l.display())
                .collect(),
        ),
        SectionKind::Certifications => SectionBody::Entries(
            resume
                .certifications
                .iter()
                .map(|c| {
                    let mut details = Vec::new();
                    if let Some(expiry) = c.expiry_date {
                        details.push(format!(
                            "Valid until {}",
                            format_date(expiry, DateStyle::MonthYear)
                        ));
                    }
                    if let Some(id) = c.credential_id.as_deref().and_then(non_blank) {
                        details.push(format!("Credential ID: {id}"));
                    }
                    if let Some(url) = c.url.as_deref().and_then(non_blank) {
                        details.push(clean_url(&url));
                    }
                    OutlineEntry {
                        title: c.name.trim().to_string(),
                        subtitle: c.issuer.trim().to_string(),
                        location: None,
                        date: c.date.map(EntryDate::Single),
                        bullets: Vec::new(),
                        details,
                    }
                })
                .collect(),
        ),
        SectionKind::Projects => SectionBody::Entries(
            resume
                .projects
                .iter()
                .map(|p| {
                    let mut details = Vec::new();
                    let technologies = non_blank_lines(&p.technologies);
                    if !technologies.is_empty() {
                        details.push(technologies.join(" · "));
                    }
                    for link in [&p.url, &p.repository_url].into_iter().flatten() {
                        if let Some(link) = non_blank(link) {
                            details.push(clean_url(&link));
                        }
                    }
                    OutlineEntry {
                        title: p.name.trim().to_string(),
                        subtitle: String::new(),
                        location: None,
                        date: None,
                        bullets: non_blank(&p.description).into_iter().collect(),
                        details,
                    }
                })
                .collect(),
        ),
    };

    let empty = match &body {
        SectionBody::Entries(entries) => entries.is_empty(),
        SectionBody::Tags(tags) => tags.is_empty(),
        SectionBody::Paragraph(text) => text.is_empty(),
        SectionBody::Placeholder(_) => false,
    };
    (!empty).then_some(body)
}

// ────────────────────────────────────────────────────────────────────────────
// Text helpers
// ────────────────────────────────────────────────────────────────────────────

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn non_blank_lines(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| non_blank(v)).collect()
}

/// Strips the scheme, a leading `www.` and any trailing slash for display.
pub fn clean_url(url: &str) -> String {
    let url = url.trim();
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let url = url.strip_prefix("www.").unwrap_or(url);
    url.trim_end_matches('/').to_string()
}

/// First letters of the first and last name, uppercased.
pub fn initials(full_name: &str) -> String {
    let words: Vec<&str> = full_name.split_whitespace().collect();
    let picks = match words.as_slice() {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, .., last] => vec![*first, *last],
    };
    picks
        .into_iter()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Certification, ExperienceEntry, LanguageEntry, Proficiency, Project,
    };
    use uuid::Uuid;

    fn experience(position: &str) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: position.to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            dates: DateRange::default(),
            description: vec!["Shipped things".to_string(), "   ".to_string()],
        }
    }

    #[test]
    fn test_preview_of_empty_resume_has_placeholders_everywhere() {
        let outline = build_outline(&ResumeDocument::empty(), RenderMode::Preview);
        assert_eq!(outline.sections.len(), ALL_SECTIONS.len());
        assert!(outline.sections.iter().all(OutlineSection::is_placeholder));

        let name = outline.header.name.unwrap();
        assert!(name.placeholder);
        assert_eq!(name.text, NAME_PLACEHOLDER);
        assert_eq!(outline.header.initials, "YN");
    }

    #[test]
    fn test_export_of_empty_resume_omits_everything() {
        let outline = build_outline(&ResumeDocument::empty(), RenderMode::Export);
        assert!(outline.sections.is_empty());
        assert!(outline.header.name.is_none());
        assert!(outline.header.title.is_none());
        assert!(outline.header.initials.is_empty());
    }

    #[test]
    fn test_entries_keep_document_order() {
        let mut doc = ResumeDocument::empty();
        doc.experience = vec![experience("First"), experience("Second"), experience("Third")];
        let outline = build_outline(&doc, RenderMode::Export);
        let Some(SectionBody::Entries(entries)) =
            outline.section(SectionKind::Experience).map(|s| s.body.clone())
        else {
            panic!("experience section missing");
        };
        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
        assert_eq!(entries[0].bullets, vec!["Shipped things".to_string()]);
    }

    #[test]
    fn test_export_keeps_only_filled_sections() {
        let mut doc = ResumeDocument::empty();
        doc.personal_details.full_name = "Ada Lovelace".to_string();
        doc.skills.skills = vec!["Rust".to_string()];
        let outline = build_outline(&doc, RenderMode::Export);
        let kinds: Vec<_> = outline.sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SectionKind::Skills]);
        assert_eq!(outline.header.initials, "AL");
    }

    #[test]
    fn test_languages_render_with_proficiency() {
        let mut doc = ResumeDocument::empty();
        doc.skills.languages = vec![LanguageEntry {
            language: "German".to_string(),
            proficiency: Proficiency::Fluent,
        }];
        let outline = build_outline(&doc, RenderMode::Export);
        assert_eq!(
            outline.section(SectionKind::Languages).map(|s| s.body.clone()),
            Some(SectionBody::Tags(vec!["German (Fluent)".to_string()]))
        );
    }

    #[test]
    fn test_certification_details() {
        let mut doc = ResumeDocument::empty();
        doc.certifications = vec![Certification {
            id: Uuid::new_v4(),
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 5, 1),
            expiry_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            credential_id: Some("ABC-123".to_string()),
            url: Some("https://www.credly.com/badges/1/".to_string()),
        }];
        let outline = build_outline(&doc, RenderMode::Export);
        let Some(SectionBody::Entries(entries)) =
            outline.section(SectionKind::Certifications).map(|s| s.body.clone())
        else {
            panic!("certifications missing");
        };
        assert_eq!(
            entries[0].details,
            vec![
                "Valid until May 2026".to_string(),
                "Credential ID: ABC-123".to_string(),
                "credly.com/badges/1".to_string(),
            ]
        );
    }

    #[test]
    fn test_project_technologies_and_links() {
        let mut doc = ResumeDocument::empty();
        doc.projects = vec![Project {
            id: Uuid::new_v4(),
            name: "vitae".to_string(),
            description: "Résumé builder".to_string(),
            technologies: vec!["Rust".to_string(), "axum".to_string()],
            url: None,
            repository_url: Some("https://github.com/someone/vitae".to_string()),
        }];
        let outline = build_outline(&doc, RenderMode::Preview);
        let Some(SectionBody::Entries(entries)) =
            outline.section(SectionKind::Projects).map(|s| s.body.clone())
        else {
            panic!("projects missing");
        };
        assert_eq!(entries[0].bullets, vec!["Résumé builder".to_string()]);
        assert_eq!(
            entries[0].details,
            vec!["Rust · axum".to_string(), "github.com/someone/vitae".to_string()]
        );
    }

    #[test]
    fn test_clean_url() {
        assert_eq!(clean_url("https://www.example.com/"), "example.com");
        assert_eq!(clean_url("http://linkedin.com/in/ada"), "linkedin.com/in/ada");
        assert_eq!(clean_url("example.org"), "example.org");
    }

    #[test]
    fn test_initials_use_first_and_last_name() {
        assert_eq!(initials("ada king lovelace"), "AL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("  "), "");
    }
}
