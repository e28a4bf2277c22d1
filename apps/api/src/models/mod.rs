pub mod resume;

pub use resume::{
    Certification, DateRange, EducationEntry, EndDate, ExperienceEntry, LanguageEntry,
    PersonalDetails, Proficiency, Project, ResumeDocument, Skills, TemplateKind,
};
