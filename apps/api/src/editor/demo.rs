//! Demo document used by "load demo" so every template can be tried with realistic content.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    Certification, DateRange, EducationEntry, ExperienceEntry, LanguageEntry, PersonalDetails,
    Proficiency, Project, ResumeDocument, Skills, TemplateKind,
};

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_resume() -> ResumeDocument {
    let mut resume = ResumeDocument::empty();

    resume.personal_details = PersonalDetails {
        full_name: "Alex Morgan".to_string(),
        title: "Senior Full-Stack Engineer".to_string(),
        email: "alex.morgan@example.com".to_string(),
        phone: "+1 555 010 2030".to_string(),
        location: Some("Berlin, Germany".to_string()),
        website: Some("https://alexmorgan.dev".to_string()),
        linkedin: Some("https://www.linkedin.com/in/alexmorgan".to_string()),
        github: Some("https://github.com/alexmorgan".to_string()),
        photo: None,
        summary: Some(
            "Full-stack engineer with eight years of experience building web platforms \
             used by millions. Comfortable across the stack, from database tuning to \
             design systems, and happiest when mentoring a small team that ships often."
                .to_string(),
        ),
    };

    resume.experience = vec![
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Senior Software Engineer".to_string(),
            company: "Northwind Labs".to_string(),
            location: "Berlin".to_string(),
            dates: DateRange::ongoing(month(2021, 3)),
            description: lines(&[
                "Led the rewrite of the billing service, cutting p99 latency by 60%",
                "Introduced contract tests across six teams and halved release rollbacks",
                "Mentored four engineers through promotion to mid-level",
            ]),
        },
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Software Engineer".to_string(),
            company: "Brightside Commerce".to_string(),
            location: "Hamburg".to_string(),
            dates: DateRange::fixed(month(2018, 1), month(2021, 2)),
            description: lines(&[
                "Built the checkout flow serving 40k orders per day",
                "Migrated the product catalogue from MySQL to PostgreSQL without downtime",
            ]),
        },
        ExperienceEntry {
            id: Uuid::new_v4(),
            position: "Junior Web Developer".to_string(),
            company: "Pixel & Co".to_string(),
            location: "Remote".to_string(),
            dates: DateRange::fixed(month(2016, 6), month(2017, 12)),
            description: lines(&["Delivered marketing sites for twelve clients"]),
        },
    ];

    resume.education = vec![EducationEntry {
        id: Uuid::new_v4(),
        institution: "Technical University of Munich".to_string(),
        degree: "B.Sc.".to_string(),
        field: "Computer Science".to_string(),
        location: Some("Munich".to_string()),
        dates: DateRange::fixed(month(2012, 10), month(2016, 3)),
        achievements: lines(&["Thesis on incremental static analysis, graded 1.3"]),
    }];

    resume.skills = Skills {
        skills: lines(&["TypeScript", "Rust", "PostgreSQL", "React", "GraphQL", "Docker"]),
        tools: lines(&["Git", "Figma", "Jira"]),
        languages: vec![
            LanguageEntry {
                language: "English".to_string(),
                proficiency: Proficiency::Native,
            },
            LanguageEntry {
                language: "German".to_string(),
                proficiency: Proficiency::Professional,
            },
        ],
    };

    resume.certifications = vec![Certification {
        id: Uuid::new_v4(),
        name: "AWS Certified Solutions Architect".to_string(),
        issuer: "Amazon Web Services".to_string(),
        date: Some(month(2022, 5)),
        expiry_date: Some(month(2025, 5)),
        credential_id: Some("AWS-SAA-1234".to_string()),
        url: None,
    }];

    resume.projects = vec![Project {
        id: Uuid::new_v4(),
        name: "tidy-ledger".to_string(),
        description: "Open-source double-entry bookkeeping CLI with plain-text storage."
            .to_string(),
        technologies: lines(&["Rust", "SQLite"]),
        url: None,
        repository_url: Some("https://github.com/alexmorgan/tidy-ledger".to_string()),
    }];

    resume.template = TemplateKind::Modern;
    resume
}
