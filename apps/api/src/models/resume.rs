//! Canonical resume model — the normalized form every downstream stage relies on.
//!
//! `RawResumeInput` (an arbitrary `serde_json::Value`) is reconciled into this
//! model exactly once, at the normalization boundary. After that point every
//! sequence field is a concrete `Vec` (possibly empty) and every nested entry
//! is safely field-accessible; nothing downstream re-checks shapes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts any JSON value in a declared-string slot.
///
/// Strings pass through; any other shape (number, bool, object, array, null)
/// collapses to `None`. Combined with `#[serde(default)]` this makes a
/// wrong-typed field indistinguishable from an absent one, without poisoning
/// sibling fields of the same entry.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_owned))
}

// ────────────────────────────────────────────────────────────────────────────
// Top-level model
// ────────────────────────────────────────────────────────────────────────────

/// The normalized, canonical resume. Built fresh per request, immutable
/// afterwards, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeModel {
    pub personal_information: PersonalInformation,
    pub summary: Option<String>,
    pub skills: Vec<SkillEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
    /// Normalized but not rendered by any section — reserved field.
    pub achievements: Vec<String>,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInformation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub git_hub: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub linked_in: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Polymorphic list entries (string-or-object)
// ────────────────────────────────────────────────────────────────────────────

/// A skill as received from the upstream generator: either a bare display
/// label or a detailed object. The ambiguity is preserved here and resolved
/// per element at render time, by exhaustive match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillEntry {
    Detailed(SkillDetail),
    Plain(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: Option<String>,
}

/// A language entry: bare label or `{name}` object, same two-case shape as
/// [`SkillEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageEntry {
    Named(LanguageDetail),
    Plain(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetail {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Object list entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub responsibility: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub graduation_year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub issuing_organization: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
}

/// `technologies_used` is not deserialized leniently here — it gets the full
/// sequence-coercion rule, applied independently per project by the
/// normalizer (a malformed tech list must not affect unrelated projects).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub github_link: Option<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_entry_bare_string_parses_as_plain() {
        let entry: SkillEntry = serde_json::from_value(json!("Go")).unwrap();
        assert_eq!(entry, SkillEntry::Plain("Go".to_string()));
    }

    #[test]
    fn test_skill_entry_object_parses_as_detailed() {
        let entry: SkillEntry =
            serde_json::from_value(json!({"title": "Go", "level": "Expert"})).unwrap();
        assert_eq!(
            entry,
            SkillEntry::Detailed(SkillDetail {
                title: Some("Go".to_string()),
                level: Some("Expert".to_string()),
            })
        );
    }

    #[test]
    fn test_skill_entry_empty_object_is_detailed_with_absent_fields() {
        let entry: SkillEntry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(entry, SkillEntry::Detailed(SkillDetail::default()));
    }

    #[test]
    fn test_wrong_typed_field_does_not_poison_siblings() {
        // jobTitle is a number — only that field collapses to None.
        let entry: ExperienceEntry = serde_json::from_value(json!({
            "jobTitle": 42,
            "company": "Initech",
        }))
        .unwrap();
        assert_eq!(entry.job_title, None);
        assert_eq!(entry.company, Some("Initech".to_string()));
    }

    #[test]
    fn test_personal_information_camel_case_names() {
        let info: PersonalInformation = serde_json::from_value(json!({
            "fullName": "Ada Lovelace",
            "phoneNumber": "555-0100",
            "gitHub": "https://github.com/ada",
            "linkedIn": "https://linkedin.com/in/ada",
        }))
        .unwrap();
        assert_eq!(info.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(info.phone_number.as_deref(), Some("555-0100"));
        assert!(info.git_hub.is_some());
        assert!(info.linked_in.is_some());
    }

    #[test]
    fn test_language_entry_named_object() {
        let entry: LanguageEntry = serde_json::from_value(json!({"name": "French"})).unwrap();
        assert_eq!(
            entry,
            LanguageEntry::Named(LanguageDetail {
                name: Some("French".to_string()),
            })
        );
    }
}
