// Skill suggestions for the skills editor.
// Static data, no I/O: lookups run inline in the handler.

pub mod data;
pub mod handlers;

use serde::{Deserialize, Serialize};

pub use data::SKILL_CATALOG;

pub const DEFAULT_SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Development,
    Design,
    Marketing,
    Management,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
}

/// Which list a suggestion belongs in: plain skills, tools, or soft skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Hard,
    Tool,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillSuggestion {
    pub id: &'static str,
    pub name: &'static str,
    pub category: SkillCategory,
    pub kind: SkillKind,
    pub popular: bool,
}

/// Case-insensitive substring search. Popular entries first, then alphabetical.
/// An empty query matches everything.
pub fn search(query: &str, kind: Option<SkillKind>, limit: usize) -> Vec<&'static SkillSuggestion> {
    let needle = query.trim().to_lowercase();
    let mut hits: Vec<&'static SkillSuggestion> = SKILL_CATALOG
        .iter()
        .filter(|s| kind.map_or(true, |k| s.kind == k))
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect();
    hits.sort_by(|a, b| {
        b.popular
            .cmp(&a.popular)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    hits.truncate(limit);
    hits
}

pub fn by_category(category: SkillCategory) -> Vec<&'static SkillSuggestion> {
    SKILL_CATALOG
        .iter()
        .filter(|s| s.category == category)
        .collect()
}

pub fn popular() -> Vec<&'static SkillSuggestion> {
    SKILL_CATALOG.iter().filter(|s| s.popular).collect()
}
