//! Section builder — `render(model)` maps the canonical model into a
//! [`LayoutDocument`] with the fixed emission order and the per-field
//! fallback text the export format is contractually bound to.
//!
//! # Emission rules
//! - Header is always emitted, even when every field falls back.
//! - Scalar-backed sections (Summary) require the value to be present and
//!   non-empty; sequence-backed sections require a non-empty list.
//! - Named/titled fields always show a placeholder when absent; contact
//!   fields are omitted entirely instead.

use crate::layout::document::{
    CertificationItem, ContactItem, ContactKind, EducationItem, ExperienceItem, Header,
    LayoutDocument, ProjectItem, Section, SkillBadge,
};
use crate::models::resume::{LanguageEntry, ResumeModel, SkillEntry};

// Placeholder text is part of the output contract; downstream consumers and
// exported documents carry these exact strings.
pub const FALLBACK_FULL_NAME: &str = "Name Not Provided";
pub const FALLBACK_JOB_TITLE: &str = "Job Title";
pub const FALLBACK_COMPANY: &str = "Company";
pub const FALLBACK_DEGREE: &str = "Degree";
pub const FALLBACK_UNIVERSITY: &str = "University";
pub const FALLBACK_PROJECT_TITLE: &str = "Project";
pub const FALLBACK_CERTIFICATE_TITLE: &str = "Certificate";
pub const FALLBACK_SKILL_LABEL: &str = "Skill";
pub const FALLBACK_LANGUAGE_LABEL: &str = "Language";

/// Link text for a project's repository link.
pub const PROJECT_LINK_TEXT: &str = "View Code";

/// Maps a normalized model into the presentational document. Pure.
pub fn render(model: &ResumeModel) -> LayoutDocument {
    let sections = [
        build_summary(model),
        build_skills(model),
        build_experience(model),
        build_education(model),
        build_projects(model),
        build_certifications(model),
        build_languages(model),
    ]
    .into_iter()
    .flatten()
    .collect();

    LayoutDocument {
        header: build_header(model),
        sections,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn build_header(model: &ResumeModel) -> Header {
    let info = &model.personal_information;

    let mut contacts = Vec::new();
    if let Some(email) = &info.email {
        contacts.push(ContactItem {
            kind: ContactKind::Email,
            label: email.clone(),
            href: Some(format!("mailto:{email}")),
        });
    }
    if let Some(phone) = &info.phone_number {
        contacts.push(ContactItem {
            kind: ContactKind::Phone,
            label: phone.clone(),
            href: None,
        });
    }

    let mut profiles = Vec::new();
    if let Some(url) = &info.git_hub {
        profiles.push(ContactItem {
            kind: ContactKind::GitHub,
            label: "GitHub".to_string(),
            href: Some(url.clone()),
        });
    }
    if let Some(url) = &info.linked_in {
        profiles.push(ContactItem {
            kind: ContactKind::LinkedIn,
            label: "LinkedIn".to_string(),
            href: Some(url.clone()),
        });
    }

    Header {
        full_name: info
            .full_name
            .clone()
            .unwrap_or_else(|| FALLBACK_FULL_NAME.to_string()),
        location: info.location.clone(),
        contacts,
        profiles,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn build_summary(model: &ResumeModel) -> Option<Section> {
    let text = model.summary.as_ref().filter(|text| !text.is_empty())?;
    Some(Section::Summary { text: text.clone() })
}

fn build_skills(model: &ResumeModel) -> Option<Section> {
    if model.skills.is_empty() {
        return None;
    }
    // Per-element resolution of the string-or-object ambiguity happens here,
    // independently for every entry; mixed lists are valid.
    let badges = model
        .skills
        .iter()
        .map(|entry| match entry {
            SkillEntry::Plain(label) => SkillBadge {
                label: label.clone(),
                level: None,
            },
            SkillEntry::Detailed(detail) => SkillBadge {
                label: detail
                    .title
                    .clone()
                    .unwrap_or_else(|| FALLBACK_SKILL_LABEL.to_string()),
                level: detail.level.clone(),
            },
        })
        .collect();
    Some(Section::Skills { badges })
}

fn build_experience(model: &ResumeModel) -> Option<Section> {
    if model.experience.is_empty() {
        return None;
    }
    let entries = model
        .experience
        .iter()
        .map(|entry| ExperienceItem {
            job_title: entry
                .job_title
                .clone()
                .unwrap_or_else(|| FALLBACK_JOB_TITLE.to_string()),
            duration: entry.duration.clone(),
            company: entry
                .company
                .clone()
                .unwrap_or_else(|| FALLBACK_COMPANY.to_string()),
            location: entry.location.clone(),
            responsibility: entry.responsibility.clone(),
        })
        .collect();
    Some(Section::Experience { entries })
}

fn build_education(model: &ResumeModel) -> Option<Section> {
    if model.education.is_empty() {
        return None;
    }
    let entries = model
        .education
        .iter()
        .map(|entry| EducationItem {
            degree: entry
                .degree
                .clone()
                .unwrap_or_else(|| FALLBACK_DEGREE.to_string()),
            graduation_year: entry.graduation_year.clone(),
            university: entry
                .university
                .clone()
                .unwrap_or_else(|| FALLBACK_UNIVERSITY.to_string()),
            location: entry.location.clone(),
        })
        .collect();
    Some(Section::Education { entries })
}

fn build_projects(model: &ResumeModel) -> Option<Section> {
    if model.projects.is_empty() {
        return None;
    }
    let entries = model
        .projects
        .iter()
        .map(|entry| ProjectItem {
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| FALLBACK_PROJECT_TITLE.to_string()),
            description: entry.description.clone(),
            github_link: entry.github_link.clone(),
            technologies: entry.technologies_used.clone(),
        })
        .collect();
    Some(Section::Projects { entries })
}

fn build_certifications(model: &ResumeModel) -> Option<Section> {
    if model.certifications.is_empty() {
        return None;
    }
    let entries = model
        .certifications
        .iter()
        .map(|entry| CertificationItem {
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| FALLBACK_CERTIFICATE_TITLE.to_string()),
            issuing_organization: entry.issuing_organization.clone(),
            year: entry.year.clone(),
        })
        .collect();
    Some(Section::Certifications { entries })
}

fn build_languages(model: &ResumeModel) -> Option<Section> {
    if model.languages.is_empty() {
        return None;
    }
    let labels = model
        .languages
        .iter()
        .map(|entry| match entry {
            LanguageEntry::Plain(label) => label.clone(),
            LanguageEntry::Named(detail) => detail
                .name
                .clone()
                .unwrap_or_else(|| FALLBACK_LANGUAGE_LABEL.to_string()),
        })
        .collect();
    Some(Section::Languages { labels })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        EducationEntry, ExperienceEntry, LanguageDetail, PersonalInformation, SkillDetail,
    };
    use crate::normalize::normalize;
    use serde_json::json;

    fn make_full_model() -> ResumeModel {
        normalize(Some(json!({
            "personalInformation": {
                "fullName": "Ada Lovelace",
                "location": "London",
                "email": "ada@example.com",
                "phoneNumber": "555-0100",
                "gitHub": "https://github.com/ada",
                "linkedIn": "https://linkedin.com/in/ada",
            },
            "summary": "Analyst and programmer.",
            "skills": ["Mathematics"],
            "experience": [{"jobTitle": "Analyst", "company": "Babbage & Co"}],
            "education": [{"degree": "Mathematics", "university": "Home tutoring"}],
            "certifications": [{"title": "First Programmer"}],
            "projects": [{"title": "Analytical Engine Notes"}],
            "languages": ["English", {"name": "French"}],
        })))
    }

    #[test]
    fn test_header_always_emitted_with_fallback_name() {
        let doc = render(&ResumeModel::default());
        assert_eq!(doc.header.full_name, FALLBACK_FULL_NAME);
        assert!(doc.header.location.is_none());
        assert!(
            doc.header.contacts.is_empty() && doc.header.profiles.is_empty(),
            "absent contact fields must be omitted, not placeholdered"
        );
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_canonical_section_order() {
        let doc = render(&make_full_model());
        let titles: Vec<&str> = doc.sections.iter().map(Section::title).collect();
        assert_eq!(
            titles,
            vec![
                "Summary",
                "Skills",
                "Experience",
                "Education",
                "Projects",
                "Certifications",
                "Languages",
            ]
        );
    }

    #[test]
    fn test_empty_skills_omits_section() {
        let model = ResumeModel {
            summary: Some("text".to_string()),
            ..Default::default()
        };
        let doc = render(&model);
        assert!(doc
            .sections
            .iter()
            .all(|section| !matches!(section, Section::Skills { .. })));
    }

    #[test]
    fn test_bare_string_skill_renders_label_without_level() {
        let model = ResumeModel {
            skills: vec![SkillEntry::Plain("Go".to_string())],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Skills { badges }) = doc.sections.first() else {
            panic!("expected a Skills section");
        };
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].display_text(), "Go");
    }

    #[test]
    fn test_detailed_skill_renders_label_with_level() {
        let model = ResumeModel {
            skills: vec![SkillEntry::Detailed(SkillDetail {
                title: Some("Go".to_string()),
                level: Some("Expert".to_string()),
            })],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Skills { badges }) = doc.sections.first() else {
            panic!("expected a Skills section");
        };
        assert_eq!(badges[0].display_text(), "Go (Expert)");
    }

    #[test]
    fn test_skill_object_without_title_uses_generic_label() {
        let model = ResumeModel {
            skills: vec![SkillEntry::Detailed(SkillDetail::default())],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Skills { badges }) = doc.sections.first() else {
            panic!("expected a Skills section");
        };
        assert_eq!(badges[0].label, FALLBACK_SKILL_LABEL);
    }

    #[test]
    fn test_mixed_language_list_resolved_per_element() {
        let model = ResumeModel {
            languages: vec![
                LanguageEntry::Plain("English".to_string()),
                LanguageEntry::Named(LanguageDetail {
                    name: Some("French".to_string()),
                }),
                LanguageEntry::Named(LanguageDetail::default()),
            ],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Languages { labels }) = doc.sections.first() else {
            panic!("expected a Languages section");
        };
        assert_eq!(labels, &["English", "French", FALLBACK_LANGUAGE_LABEL]);
    }

    #[test]
    fn test_empty_summary_string_omits_section() {
        let model = ResumeModel {
            summary: Some(String::new()),
            ..Default::default()
        };
        assert!(render(&model).sections.is_empty());
    }

    #[test]
    fn test_contact_link_semantics() {
        let model = ResumeModel {
            personal_information: PersonalInformation {
                email: Some("ada@example.com".to_string()),
                phone_number: Some("555-0100".to_string()),
                git_hub: Some("https://github.com/ada".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let header = render(&model).header;

        let email = &header.contacts[0];
        assert_eq!(email.kind, ContactKind::Email);
        assert_eq!(email.href.as_deref(), Some("mailto:ada@example.com"));

        let phone = &header.contacts[1];
        assert_eq!(phone.kind, ContactKind::Phone);
        assert!(phone.href.is_none(), "phone renders as plain text");

        assert_eq!(header.profiles.len(), 1);
        assert_eq!(header.profiles[0].label, "GitHub");
        assert!(header.profiles[0].href.is_some());
    }

    #[test]
    fn test_experience_fallbacks_applied_per_field() {
        let model = ResumeModel {
            experience: vec![ExperienceEntry::default()],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Experience { entries }) = doc.sections.first() else {
            panic!("expected an Experience section");
        };
        assert_eq!(entries[0].job_title, FALLBACK_JOB_TITLE);
        assert_eq!(entries[0].company, FALLBACK_COMPANY);
        assert!(entries[0].duration.is_none());
        assert!(entries[0].responsibility.is_none());
    }

    #[test]
    fn test_education_fallbacks_applied_per_field() {
        let model = ResumeModel {
            education: vec![EducationEntry::default()],
            ..Default::default()
        };
        let doc = render(&model);
        let Some(Section::Education { entries }) = doc.sections.first() else {
            panic!("expected an Education section");
        };
        assert_eq!(entries[0].degree, FALLBACK_DEGREE);
        assert_eq!(entries[0].university, FALLBACK_UNIVERSITY);
    }

    #[test]
    fn test_achievements_never_rendered() {
        let model = ResumeModel {
            achievements: vec!["Medal".to_string()],
            ..Default::default()
        };
        assert!(
            render(&model).sections.is_empty(),
            "achievements is a reserved field with no section"
        );
    }

    #[test]
    fn test_end_to_end_scenario_sections() {
        let model = normalize(Some(json!({
            "personalInformation": {"fullName": "Ada Lovelace"},
            "skills": "Mathematics",
            "experience": null,
        })));
        let doc = render(&model);
        assert_eq!(doc.header.full_name, "Ada Lovelace");
        assert_eq!(doc.sections.len(), 1);
        let Section::Skills { badges } = &doc.sections[0] else {
            panic!("expected only a Skills section");
        };
        assert_eq!(badges[0].display_text(), "Mathematics");
    }
}
