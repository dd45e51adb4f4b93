//! Presentational document types produced by the layout stage.
//!
//! A `LayoutDocument` is what the raster painter (and the preview endpoint)
//! consumes: all fallback text already applied, all string-or-object
//! ambiguity already resolved. The header is always present; every other
//! section appears only when it has content.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutDocument {
    pub header: Header,
    pub sections: Vec<Section>,
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

/// The one unconditional section. `full_name` has its fallback applied;
/// contact and profile items exist only for fields that were present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub full_name: String,
    pub location: Option<String>,
    /// Email / phone row.
    pub contacts: Vec<ContactItem>,
    /// GitHub / LinkedIn row.
    pub profiles: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub label: String,
    /// Present for link-semantic fields only; plain-text items carry `None`.
    pub href: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Email,
    Phone,
    GitHub,
    LinkedIn,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections (canonical order: Summary → Skills → Experience → Education →
// Projects → Certifications → Languages, after the header)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Section {
    Summary { text: String },
    Skills { badges: Vec<SkillBadge> },
    Experience { entries: Vec<ExperienceItem> },
    Education { entries: Vec<EducationItem> },
    Projects { entries: Vec<ProjectItem> },
    Certifications { entries: Vec<CertificationItem> },
    Languages { labels: Vec<String> },
}

impl Section {
    /// Stable name used for section headings and logging.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Summary { .. } => "Summary",
            Section::Skills { .. } => "Skills",
            Section::Experience { .. } => "Experience",
            Section::Education { .. } => "Education",
            Section::Projects { .. } => "Projects",
            Section::Certifications { .. } => "Certifications",
            Section::Languages { .. } => "Languages",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillBadge {
    pub label: String,
    pub level: Option<String>,
}

impl SkillBadge {
    /// `Go` for a bare label, `Go (Expert)` when a level is attached.
    pub fn display_text(&self) -> String {
        match &self.level {
            Some(level) => format!("{} ({})", self.label, level),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub job_title: String,
    pub duration: Option<String>,
    pub company: String,
    pub location: Option<String>,
    /// Embedded newlines are preserved when painted.
    pub responsibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    pub degree: String,
    pub graduation_year: Option<String>,
    pub university: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    pub description: Option<String>,
    pub github_link: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationItem {
    pub title: String,
    pub issuing_organization: Option<String>,
    pub year: Option<String>,
}

impl CertificationItem {
    /// `<title> - <org> (<year>)`, each suffix appended only when present.
    pub fn display_text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(org) = &self.issuing_organization {
            text.push_str(" - ");
            text.push_str(org);
        }
        if let Some(year) = &self.year {
            text.push_str(&format!(" ({year})"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_badge_display_with_and_without_level() {
        let plain = SkillBadge {
            label: "Go".to_string(),
            level: None,
        };
        assert_eq!(plain.display_text(), "Go");

        let leveled = SkillBadge {
            label: "Go".to_string(),
            level: Some("Expert".to_string()),
        };
        assert_eq!(leveled.display_text(), "Go (Expert)");
    }

    #[test]
    fn test_certification_display_suffixes_only_when_present() {
        let bare = CertificationItem {
            title: "CKA".to_string(),
            issuing_organization: None,
            year: None,
        };
        assert_eq!(bare.display_text(), "CKA");

        let full = CertificationItem {
            title: "CKA".to_string(),
            issuing_organization: Some("CNCF".to_string()),
            year: Some("2023".to_string()),
        };
        assert_eq!(full.display_text(), "CKA - CNCF (2023)");
    }
}
