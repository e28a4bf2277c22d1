//! Content density scoring.
//!
//! The score approximates the vertical space a résumé consumes at 100% scale. Entry
//! counts and bullet counts dominate over raw character counts: many short jobs take
//! more room than one job with a long summary.

use serde::{Deserialize, Serialize};

use crate::models::ResumeDocument;

/// Point values per content unit. All weights are whole points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityWeights {
    /// Points per started chunk of summary text.
    pub summary_chunk: u32,
    /// Characters per summary chunk.
    pub summary_chunk_chars: u32,
    pub experience_entry: u32,
    pub experience_bullet: u32,
    pub education_entry: u32,
    pub education_achievement: u32,
    pub certification: u32,
    pub project_entry: u32,
    pub project_technology: u32,
    pub skill: u32,
    pub tool: u32,
    /// Languages render as `Name (Level)`, so they cost more than a plain skill.
    pub language: u32,
}

impl Default for DensityWeights {
    fn default() -> Self {
        Self {
            summary_chunk: 5,
            summary_chunk_chars: 100,
            experience_entry: 15,
            experience_bullet: 3,
            education_entry: 12,
            education_achievement: 2,
            certification: 8,
            project_entry: 10,
            project_technology: 1,
            skill: 1,
            tool: 1,
            language: 2,
        }
    }
}

/// Scores a document with the default weights.
pub fn score_density(resume: &ResumeDocument) -> u32 {
    score_density_with(resume, &DensityWeights::default())
}

/// Scores a document with explicit weights. Total: absent or empty fields add nothing.
pub fn score_density_with(resume: &ResumeDocument, weights: &DensityWeights) -> u32 {
    let mut score = 0u64;

    if let Some(summary) = resume.personal_details.summary.as_deref() {
        score += summary_chunks(summary, weights.summary_chunk_chars)
            * u64::from(weights.summary_chunk);
    }

    for exp in &resume.experience {
        score += u64::from(weights.experience_entry);
        score += count(exp.description.len()) * u64::from(weights.experience_bullet);
    }

    for edu in &resume.education {
        score += u64::from(weights.education_entry);
        score += count(edu.achievements.len()) * u64::from(weights.education_achievement);
    }

    score += count(resume.certifications.len()) * u64::from(weights.certification);

    for project in &resume.projects {
        score += u64::from(weights.project_entry);
        score += count(project.technologies.len()) * u64::from(weights.project_technology);
    }

    score += count(resume.skills.skills.len()) * u64::from(weights.skill);
    score += count(resume.skills.tools.len()) * u64::from(weights.tool);
    score += count(resume.skills.languages.len()) * u64::from(weights.language);

    u32::try_from(score).unwrap_or(u32::MAX)
}

/// Number of started `chunk_chars`-sized chunks (ceil division over chars).
fn summary_chunks(text: &str, chunk_chars: u32) -> u64 {
    if chunk_chars == 0 {
        return 0;
    }
    count(text.chars().count()).div_ceil(u64::from(chunk_chars))
}

fn count(n: usize) -> u64 {
    n as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Certification, DateRange, EducationEntry, ExperienceEntry, LanguageEntry, Proficiency,
        Project,
    };
    use uuid::Uuid;

    fn experience(bullets: usize) -> ExperienceEntry {
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            dates: DateRange::default(),
            description: (0..bullets).map(|i| format!("Shipped feature {i}")).collect(),
        }
    }

    fn education(achievements: usize) -> EducationEntry {
        EducationEntry {
            id: Uuid::new_v4(),
            institution: "TU Berlin".to_string(),
            degree: "MSc".to_string(),
            field: "Computer Science".to_string(),
            location: None,
            dates: DateRange::default(),
            achievements: (0..achievements).map(|i| format!("Award {i}")).collect(),
        }
    }

    #[test]
    fn test_empty_document_scores_zero() {
        assert_eq!(score_density(&ResumeDocument::empty()), 0);
    }

    #[test]
    fn test_summary_rounds_up_per_hundred_chars() {
        let mut doc = ResumeDocument::empty();
        doc.personal_details.summary = Some("x".repeat(1));
        assert_eq!(score_density(&doc), 5);

        doc.personal_details.summary = Some("x".repeat(100));
        assert_eq!(score_density(&doc), 5);

        doc.personal_details.summary = Some("x".repeat(101));
        assert_eq!(score_density(&doc), 10);
    }

    #[test]
    fn test_empty_summary_adds_nothing() {
        let mut doc = ResumeDocument::empty();
        doc.personal_details.summary = Some(String::new());
        assert_eq!(score_density(&doc), 0);
    }

    #[test]
    fn test_experience_base_plus_bullets() {
        let mut doc = ResumeDocument::empty();
        doc.experience.push(experience(4));
        // 15 + 4 * 3
        assert_eq!(score_density(&doc), 27);
    }

    #[test]
    fn test_education_base_plus_achievements() {
        let mut doc = ResumeDocument::empty();
        doc.education.push(education(2));
        // 12 + 2 * 2
        assert_eq!(score_density(&doc), 16);
    }

    #[test]
    fn test_flat_costs_for_certifications_skills_languages_projects() {
        let mut doc = ResumeDocument::empty();
        doc.certifications.push(Certification {
            id: Uuid::new_v4(),
            name: "CKA".to_string(),
            issuer: "CNCF".to_string(),
            date: None,
            expiry_date: None,
            credential_id: None,
            url: None,
        });
        doc.skills.skills = vec!["Rust".to_string(), "Go".to_string()];
        doc.skills.tools = vec!["Git".to_string()];
        doc.skills.languages = vec![LanguageEntry {
            language: "English".to_string(),
            proficiency: Proficiency::Native,
        }];
        doc.projects.push(Project {
            id: Uuid::new_v4(),
            name: "vitae".to_string(),
            description: "Résumé builder".to_string(),
            technologies: vec!["Rust".to_string(), "axum".to_string()],
            url: None,
            repository_url: None,
        });
        // 8 + 2 + 1 + 2 + (10 + 2)
        assert_eq!(score_density(&doc), 25);
    }

    #[test]
    fn test_many_short_jobs_outweigh_one_long_summary() {
        let mut many_jobs = ResumeDocument::empty();
        many_jobs.experience = (0..4).map(|_| experience(1)).collect();

        let mut long_summary = ResumeDocument::empty();
        long_summary.experience.push(experience(1));
        long_summary.personal_details.summary = Some("word ".repeat(100));

        assert!(score_density(&many_jobs) > score_density(&long_summary));
    }

    #[test]
    fn test_additional_bullet_never_decreases_score() {
        let mut doc = ResumeDocument::empty();
        doc.experience.push(experience(2));
        let before = score_density(&doc);
        doc.experience[0].description.push("One more".to_string());
        assert!(score_density(&doc) >= before);
    }

    #[test]
    fn test_custom_weights_are_respected() {
        let mut doc = ResumeDocument::empty();
        doc.experience.push(experience(1));
        let weights = DensityWeights {
            experience_entry: 100,
            experience_bullet: 0,
            ..DensityWeights::default()
        };
        assert_eq!(score_density_with(&doc, &weights), 100);
    }
}
