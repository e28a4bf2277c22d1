//! The built-in skill suggestion list, grouped by field.

use crate::catalog::SkillCategory::{Design, Development, Management, Marketing, SoftSkills};
use crate::catalog::SkillKind::{Hard, Soft, Tool};
use crate::catalog::{SkillCategory, SkillKind, SkillSuggestion};

const fn skill(
    id: &'static str,
    name: &'static str,
    category: SkillCategory,
    kind: SkillKind,
    popular: bool,
) -> SkillSuggestion {
    SkillSuggestion {
        id,
        name,
        category,
        kind,
        popular,
    }
}

pub static SKILL_CATALOG: &[SkillSuggestion] = &[
    skill("js", "JavaScript", Development, Hard, true),
    skill("ts", "TypeScript", Development, Hard, true),
    skill("python", "Python", Development, Hard, true),
    skill("java", "Java", Development, Hard, true),
    skill("csharp", "C#", Development, Hard, true),
    skill("cpp", "C++", Development, Hard, false),
    skill("go", "Go (Golang)", Development, Hard, false),
    skill("php", "PHP", Development, Hard, false),
    skill("ruby", "Ruby", Development, Hard, false),
    skill("swift", "Swift", Development, Hard, false),
    skill("kotlin", "Kotlin", Development, Hard, false),
    skill("rust", "Rust", Development, Hard, false),
    skill("sql", "SQL", Development, Hard, true),
    skill("react", "React", Development, Hard, true),
    skill("nextjs", "Next.js", Development, Hard, true),
    skill("vue", "Vue.js", Development, Hard, true),
    skill("angular", "Angular", Development, Hard, true),
    skill("html5", "HTML5", Development, Hard, true),
    skill("css3", "CSS3", Development, Hard, true),
    skill("sass", "SASS/SCSS", Development, Hard, false),
    skill("tailwind", "Tailwind CSS", Development, Hard, true),
    skill("redux", "Redux", Development, Hard, false),
    skill("zustand", "Zustand", Development, Hard, false),
    skill("webpack", "Webpack", Development, Tool, false),
    skill("vite", "Vite", Development, Tool, true),
    skill("nodejs", "Node.js", Development, Hard, true),
    skill("express", "Express", Development, Hard, true),
    skill("nestjs", "NestJS", Development, Hard, false),
    skill("django", "Django", Development, Hard, true),
    skill("springboot", "Spring Boot", Development, Hard, false),
    skill("dotnet", ".NET Core", Development, Hard, false),
    skill("postgresql", "PostgreSQL", Development, Hard, true),
    skill("mongodb", "MongoDB", Development, Hard, true),
    skill("mysql", "MySQL", Development, Hard, true),
    skill("redis", "Redis", Development, Hard, false),
    skill("graphql", "GraphQL", Development, Hard, true),
    skill("restapi", "REST API", Development, Hard, true),
    skill("git", "Git", Development, Tool, true),
    skill("github", "GitHub/GitLab", Development, Tool, true),
    skill("docker", "Docker", Development, Hard, true),
    skill("kubernetes", "Kubernetes", Development, Hard, false),
    skill("aws", "AWS", Development, Hard, true),
    skill("azure", "Azure", Development, Hard, false),
    skill("gcp", "Google Cloud", Development, Hard, false),
    skill("cicd", "CI/CD", Development, Hard, true),
    skill("linux", "Linux", Development, Hard, true),
    skill("nginx", "Nginx", Development, Hard, false),
    skill("terraform", "Terraform", Development, Hard, false),
    skill("jenkins", "Jenkins", Development, Tool, false),
    skill("figma", "Figma", Design, Tool, true),
    skill("photoshop", "Adobe Photoshop", Design, Tool, true),
    skill("illustrator", "Adobe Illustrator", Design, Tool, true),
    skill("aftereffects", "Adobe After Effects", Design, Tool, false),
    skill("indesign", "Adobe InDesign", Design, Tool, false),
    skill("sketch", "Sketch", Design, Tool, false),
    skill("cinema4d", "Cinema 4D", Design, Tool, false),
    skill("blender", "Blender", Design, Tool, false),
    skill("miro", "Miro", Design, Tool, false),
    skill("protopie", "ProtoPie", Design, Tool, false),
    skill("uidesign", "UI Design", Design, Hard, true),
    skill("uxresearch", "UX Research", Design, Hard, true),
    skill("prototyping", "Prototyping", Design, Hard, true),
    skill("wireframing", "Wireframing", Design, Hard, true),
    skill("usertesting", "User Testing", Design, Hard, false),
    skill("designsystems", "Design Systems", Design, Hard, true),
    skill("typography", "Typography", Design, Hard, false),
    skill("colortheory", "Color Theory", Design, Hard, false),
    skill("motiondesign", "Motion Design", Design, Hard, false),
    skill("3dmodeling", "3D Modeling", Design, Hard, false),
    skill("branding", "Branding", Design, Hard, false),
    skill("agile", "Agile", Management, Hard, true),
    skill("scrum", "Scrum", Management, Hard, true),
    skill("kanban", "Kanban", Management, Hard, true),
    skill("waterfall", "Waterfall", Management, Hard, false),
    skill("lean", "Lean", Management, Hard, false),
    skill("sixsigma", "Six Sigma", Management, Hard, false),
    skill("roadmap", "Roadmap Planning", Management, Hard, true),
    skill("backlog", "Backlog Grooming", Management, Hard, false),
    skill("sprint", "Sprint Planning", Management, Hard, true),
    skill("stakeholder", "Stakeholder Management", Management, Hard, true),
    skill("risk", "Risk Management", Management, Hard, false),
    skill("resource", "Resource Planning", Management, Hard, false),
    skill("userstories", "User Stories", Management, Hard, true),
    skill("abtesting", "A/B Testing", Management, Hard, false),
    skill("productstrategy", "Product Strategy", Management, Hard, true),
    skill("okrs", "OKRs", Management, Hard, false),
    skill("kpi", "KPI Tracking", Management, Hard, true),
    skill("jira", "Jira", Management, Tool, true),
    skill("confluence", "Confluence", Management, Tool, false),
    skill("trello", "Trello", Management, Tool, false),
    skill("asana", "Asana", Management, Tool, false),
    skill("notion", "Notion", Management, Tool, true),
    skill("monday", "Monday.com", Management, Tool, false),
    skill("linear", "Linear", Management, Tool, false),
    skill("msproject", "Microsoft Project", Management, Tool, false),
    skill("seo", "SEO", Marketing, Hard, true),
    skill("sem", "SEM", Marketing, Hard, false),
    skill("googleads", "Google Ads", Marketing, Hard, true),
    skill("facebookads", "Facebook Ads", Marketing, Hard, true),
    skill("contentmarketing", "Content Marketing", Marketing, Hard, true),
    skill("emailmarketing", "Email Marketing", Marketing, Hard, true),
    skill("smm", "SMM", Marketing, Hard, true),
    skill("copywriting", "Copywriting", Marketing, Hard, true),
    skill("affiliate", "Affiliate Marketing", Marketing, Hard, false),
    skill("growthhacking", "Growth Hacking", Marketing, Hard, false),
    skill("ga4", "Google Analytics 4", Marketing, Tool, true),
    skill("gtm", "Google Tag Manager", Marketing, Tool, true),
    skill("yandexmetrica", "Yandex Metrica", Marketing, Tool, false),
    skill("excel", "Excel (Advanced)", Marketing, Tool, true),
    skill("tableau", "Tableau", Marketing, Tool, false),
    skill("powerbi", "Power BI", Marketing, Tool, true),
    skill("sqlanalytics", "SQL for Analytics", Marketing, Hard, true),
    skill("pandas", "Python (Pandas)", Marketing, Hard, false),
    skill("dataviz", "Data Visualization", Marketing, Hard, false),
    skill("salesforce", "Salesforce", Marketing, Tool, true),
    skill("hubspot", "HubSpot", Marketing, Tool, true),
    skill("mailchimp", "Mailchimp", Marketing, Tool, false),
    skill("wordpress", "WordPress", Marketing, Tool, true),
    skill("shopify", "Shopify", Marketing, Tool, false),
    skill("zapier", "Zapier", Marketing, Tool, false),
    skill("crossfunctional", "Cross-functional Collaboration", SoftSkills, Soft, true),
    skill("mentoring", "Mentoring", SoftSkills, Soft, true),
    skill("teamleadership", "Team Leadership", SoftSkills, Soft, true),
    skill("conflictresolution", "Conflict Resolution", SoftSkills, Soft, false),
    skill("criticalthinking", "Critical Thinking", SoftSkills, Soft, true),
    skill("strategicplanning", "Strategic Planning", SoftSkills, Soft, true),
    skill("adaptability", "Adaptability", SoftSkills, Soft, false),
    skill("timemanagement", "Time Management", SoftSkills, Soft, true),
    skill("remotework", "Remote Work", SoftSkills, Soft, true),
    skill("presentation", "Presentation Skills", SoftSkills, Soft, true),
    skill("codereview", "Code Review", SoftSkills, Soft, true),
];
