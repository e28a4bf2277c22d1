//! The résumé document: the single aggregate the editor mutates and every renderer reads.
//!
//! Pure data. List entries carry a `Uuid` that is unique within its list; the editor
//! assigns ids, so incoming JSON may omit them.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Dates
// ────────────────────────────────────────────────────────────────────────────

/// End of an experience or education period.
///
/// A position is either finished on a fixed date or still ongoing; there is no way
/// to store a stale end date next to an "ongoing" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndDate {
    Fixed { date: NaiveDate },
    #[default]
    Ongoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: EndDate,
}

impl DateRange {
    pub fn fixed(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: EndDate::Fixed { date: end },
        }
    }

    pub fn ongoing(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: EndDate::Ongoing,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self.end, EndDate::Ongoing)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    /// Profile photo as a `data:` URL. Cosmetic only.
    pub photo: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: DateRange,
    /// Bullet lines, in display order.
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub dates: DateRange,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Native,
    Fluent,
    Professional,
    Intermediate,
    Basic,
}

impl Proficiency {
    pub fn label(&self) -> &'static str {
        match self {
            Proficiency::Native => "Native",
            Proficiency::Fluent => "Fluent",
            Proficiency::Professional => "Professional",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Basic => "Basic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: Proficiency,
}

impl LanguageEntry {
    /// Two-part display string, e.g. `German (Fluent)`.
    pub fn display(&self) -> String {
        format!("{} ({})", self.language, self.proficiency.label())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub languages: Vec<LanguageEntry>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.tools.is_empty() && self.languages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
}

/// Visual template variant. Each maps to a layout preset in `render::preset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Minimal,
    Sidebar,
    Creative,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregate root
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub id: Uuid,
    #[serde(default)]
    pub personal_details: PersonalDetails,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub template: TemplateKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeDocument {
    /// A fresh document with no content and the default template.
    pub fn empty() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            personal_details: PersonalDetails::default(),
            experience: Vec::new(),
            education: Vec::new(),
            skills: Skills::default(),
            certifications: Vec::new(),
            projects: Vec::new(),
            template: TemplateKind::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Gives a fresh id to every list entry whose id already appeared earlier in the
    /// same list. Returns how many ids were replaced.
    pub fn dedupe_ids(&mut self) -> usize {
        reassign_repeated(&mut self.experience, |e| &mut e.id)
            + reassign_repeated(&mut self.education, |e| &mut e.id)
            + reassign_repeated(&mut self.certifications, |c| &mut c.id)
            + reassign_repeated(&mut self.projects, |p| &mut p.id)
    }
}

fn reassign_repeated<T>(list: &mut [T], id_of: impl Fn(&mut T) -> &mut Uuid) -> usize {
    let mut seen = HashSet::new();
    let mut replaced = 0;
    for entry in list.iter_mut() {
        let id = id_of(entry);
        if !seen.insert(*id) {
            *id = Uuid::new_v4();
            seen.insert(*id);
            replaced += 1;
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_date_serializes_as_tagged_union() {
        let fixed = EndDate::Fixed {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let json = serde_json::to_value(fixed).unwrap();
        assert_eq!(json["kind"], "fixed");
        assert_eq!(json["date"], "2024-03-01");

        let ongoing = serde_json::to_value(EndDate::Ongoing).unwrap();
        assert_eq!(ongoing, serde_json::json!({ "kind": "ongoing" }));
    }

    #[test]
    fn test_missing_end_date_defaults_to_ongoing() {
        let entry: ExperienceEntry = serde_json::from_value(serde_json::json!({
            "position": "Engineer",
            "company": "Acme",
            "dates": { "start": "2021-01-01" }
        }))
        .unwrap();
        assert!(entry.dates.is_ongoing());
        assert!(entry.description.is_empty());
    }

    #[test]
    fn test_empty_document_has_no_content() {
        let doc = ResumeDocument::empty();
        assert!(doc.experience.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.skills.is_empty());
        assert_eq!(doc.template, TemplateKind::Classic);
    }

    #[test]
    fn test_dedupe_ids_keeps_first_and_renames_repeats() {
        let shared = Uuid::new_v4();
        let mut doc = ResumeDocument::empty();
        doc.experience = ["A", "B", "C"]
            .iter()
            .map(|company| ExperienceEntry {
                id: shared,
                position: "Engineer".to_string(),
                company: company.to_string(),
                location: String::new(),
                dates: DateRange::default(),
                description: Vec::new(),
            })
            .collect();

        assert_eq!(doc.dedupe_ids(), 2);
        assert_eq!(doc.experience[0].id, shared);
        let ids: HashSet<Uuid> = doc.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(doc.dedupe_ids(), 0);
    }

    #[test]
    fn test_language_display_is_two_part() {
        let lang = LanguageEntry {
            language: "German".to_string(),
            proficiency: Proficiency::Fluent,
        };
        assert_eq!(lang.display(), "German (Fluent)");
    }
}
