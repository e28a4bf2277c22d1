//! The editor store: sole owner of the mutable résumé document.
//!
//! Every mutation goes through a method here and bumps `updated_at`. Ids for new list
//! entries are assigned by the store, never trusted from the caller.

use serde::Deserialize;
use uuid::Uuid;

use crate::editor::demo::demo_resume;
use crate::editor::StoreError;
use crate::models::{
    Certification, EducationEntry, ExperienceEntry, LanguageEntry, Project, ResumeDocument,
    TemplateKind,
};

/// Partial update of the personal details. Absent fields are left alone; for the
/// optional fields an empty string clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetailsPatch {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub photo: Option<String>,
    pub summary: Option<String>,
}

/// Which plain string list a skill operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillList {
    Skills,
    Tools,
}

#[derive(Debug, Clone)]
pub struct ResumeStore {
    resume: ResumeDocument,
}

impl Default for ResumeStore {
    fn default() -> Self {
        Self::new(ResumeDocument::empty())
    }
}

fn apply(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn apply_optional(target: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value {
        *target = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }
}

/// Replaces the entry with `id` by `entry`, keeping the id.
fn replace_by_id<T>(
    list: &mut [T],
    id: Uuid,
    entry: T,
    id_of: impl Fn(&T) -> Uuid,
    set_id: impl FnOnce(&mut T, Uuid),
    what: &'static str,
) -> Result<(), StoreError> {
    let slot = list
        .iter_mut()
        .find(|e| id_of(e) == id)
        .ok_or(StoreError::NotFound { what, id })?;
    *slot = entry;
    set_id(slot, id);
    Ok(())
}

fn remove_by_id<T>(
    list: &mut Vec<T>,
    id: Uuid,
    id_of: impl Fn(&T) -> Uuid,
    what: &'static str,
) -> Result<(), StoreError> {
    let index = list
        .iter()
        .position(|e| id_of(e) == id)
        .ok_or(StoreError::NotFound { what, id })?;
    list.remove(index);
    Ok(())
}

/// Moves the element at `from` so it ends up at `to`.
fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> Result<(), StoreError> {
    let len = list.len();
    if from >= len || to >= len {
        return Err(StoreError::IndexOutOfRange { from, to, len });
    }
    let item = list.remove(from);
    list.insert(to, item);
    Ok(())
}

fn normalized(value: &str, what: &'static str) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::Invalid(format!("{what} must not be blank")));
    }
    Ok(value.to_string())
}

impl ResumeStore {
    pub fn new(mut resume: ResumeDocument) -> Self {
        resume.dedupe_ids();
        Self { resume }
    }

    pub fn resume(&self) -> &ResumeDocument {
        &self.resume
    }

    pub fn snapshot(&self) -> ResumeDocument {
        self.resume.clone()
    }

    // ── Personal details ────────────────────────────────────────────────────

    pub fn update_personal_details(&mut self, patch: PersonalDetailsPatch) {
        let details = &mut self.resume.personal_details;
        apply(&mut details.full_name, patch.full_name);
        apply(&mut details.title, patch.title);
        apply(&mut details.email, patch.email);
        apply(&mut details.phone, patch.phone);
        apply_optional(&mut details.location, patch.location);
        apply_optional(&mut details.website, patch.website);
        apply_optional(&mut details.linkedin, patch.linkedin);
        apply_optional(&mut details.github, patch.github);
        apply_optional(&mut details.photo, patch.photo);
        apply_optional(&mut details.summary, patch.summary);
        self.resume.touch();
    }

    // ── Experience ──────────────────────────────────────────────────────────

    pub fn add_experience(&mut self, mut entry: ExperienceEntry) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        self.resume.experience.push(entry);
        self.resume.touch();
        id
    }

    pub fn update_experience(&mut self, id: Uuid, entry: ExperienceEntry) -> Result<(), StoreError> {
        replace_by_id(
            &mut self.resume.experience,
            id,
            entry,
            |e| e.id,
            |e, id| e.id = id,
            "experience",
        )?;
        self.resume.touch();
        Ok(())
    }

    pub fn delete_experience(&mut self, id: Uuid) -> Result<(), StoreError> {
        remove_by_id(&mut self.resume.experience, id, |e| e.id, "experience")?;
        self.resume.touch();
        Ok(())
    }

    pub fn reorder_experience(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        move_item(&mut self.resume.experience, from, to)?;
        self.resume.touch();
        Ok(())
    }

    // ── Education ───────────────────────────────────────────────────────────

    pub fn add_education(&mut self, mut entry: EducationEntry) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        self.resume.education.push(entry);
        self.resume.touch();
        id
    }

    pub fn update_education(&mut self, id: Uuid, entry: EducationEntry) -> Result<(), StoreError> {
        replace_by_id(
            &mut self.resume.education,
            id,
            entry,
            |e| e.id,
            |e, id| e.id = id,
            "education",
        )?;
        self.resume.touch();
        Ok(())
    }

    pub fn delete_education(&mut self, id: Uuid) -> Result<(), StoreError> {
        remove_by_id(&mut self.resume.education, id, |e| e.id, "education")?;
        self.resume.touch();
        Ok(())
    }

    pub fn reorder_education(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        move_item(&mut self.resume.education, from, to)?;
        self.resume.touch();
        Ok(())
    }

    // ── Certifications ──────────────────────────────────────────────────────

    pub fn add_certification(&mut self, mut entry: Certification) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        self.resume.certifications.push(entry);
        self.resume.touch();
        id
    }

    pub fn update_certification(&mut self, id: Uuid, entry: Certification) -> Result<(), StoreError> {
        replace_by_id(
            &mut self.resume.certifications,
            id,
            entry,
            |e| e.id,
            |e, id| e.id = id,
            "certification",
        )?;
        self.resume.touch();
        Ok(())
    }

    pub fn delete_certification(&mut self, id: Uuid) -> Result<(), StoreError> {
        remove_by_id(&mut self.resume.certifications, id, |e| e.id, "certification")?;
        self.resume.touch();
        Ok(())
    }

    // ── Projects ────────────────────────────────────────────────────────────

    pub fn add_project(&mut self, mut entry: Project) -> Uuid {
        entry.id = Uuid::new_v4();
        let id = entry.id;
        self.resume.projects.push(entry);
        self.resume.touch();
        id
    }

    pub fn update_project(&mut self, id: Uuid, entry: Project) -> Result<(), StoreError> {
        replace_by_id(
            &mut self.resume.projects,
            id,
            entry,
            |e| e.id,
            |e, id| e.id = id,
            "project",
        )?;
        self.resume.touch();
        Ok(())
    }

    pub fn delete_project(&mut self, id: Uuid) -> Result<(), StoreError> {
        remove_by_id(&mut self.resume.projects, id, |e| e.id, "project")?;
        self.resume.touch();
        Ok(())
    }

    // ── Skills, tools, languages ────────────────────────────────────────────

    fn list_mut(&mut self, list: SkillList) -> &mut Vec<String> {
        match list {
            SkillList::Skills => &mut self.resume.skills.skills,
            SkillList::Tools => &mut self.resume.skills.tools,
        }
    }

    /// Adds a trimmed value. Adding a value already present (ignoring case) is a no-op.
    pub fn add_skill(&mut self, list: SkillList, value: &str) -> Result<(), StoreError> {
        let value = normalized(value, "skill")?;
        let entries = self.list_mut(list);
        if entries.iter().any(|s| s.eq_ignore_ascii_case(&value)) {
            return Ok(());
        }
        entries.push(value);
        self.resume.touch();
        Ok(())
    }

    /// Removes a value, matched the way `add_skill` deduplicates: trimmed, ignoring case.
    pub fn remove_skill(&mut self, list: SkillList, value: &str) -> Result<(), StoreError> {
        let value = value.trim();
        let entries = self.list_mut(list);
        let before = entries.len();
        entries.retain(|s| !s.trim().eq_ignore_ascii_case(value));
        if entries.len() == before {
            return Err(StoreError::Missing(value.to_string()));
        }
        self.resume.touch();
        Ok(())
    }

    /// Adds a language or updates the proficiency of one already listed.
    pub fn add_language(&mut self, entry: LanguageEntry) -> Result<(), StoreError> {
        let language = normalized(&entry.language, "language")?;
        let languages = &mut self.resume.skills.languages;
        match languages
            .iter_mut()
            .find(|l| l.language.eq_ignore_ascii_case(&language))
        {
            Some(existing) => existing.proficiency = entry.proficiency,
            None => languages.push(LanguageEntry {
                language,
                proficiency: entry.proficiency,
            }),
        }
        self.resume.touch();
        Ok(())
    }

    pub fn remove_language(&mut self, language: &str) -> Result<(), StoreError> {
        let languages = &mut self.resume.skills.languages;
        let before = languages.len();
        let language = language.trim();
        languages.retain(|l| !l.language.trim().eq_ignore_ascii_case(language));
        if languages.len() == before {
            return Err(StoreError::Missing(language.to_string()));
        }
        self.resume.touch();
        Ok(())
    }

    // ── Whole document ──────────────────────────────────────────────────────

    pub fn set_template(&mut self, template: TemplateKind) {
        self.resume.template = template;
        self.resume.touch();
    }

    /// Replaces the document with a fresh empty one under a new id.
    pub fn reset(&mut self) {
        self.resume = ResumeDocument::empty();
    }

    /// Replaces the document wholesale, e.g. from an imported file. Repeated entry ids
    /// are renamed so every later update or delete targets exactly one entry.
    pub fn load(&mut self, resume: ResumeDocument) {
        self.resume = resume;
        self.resume.dedupe_ids();
        self.resume.touch();
    }

    pub fn load_demo(&mut self) {
        self.resume = demo_resume();
    }
}
