//! Normalization boundary — reconciles schema-free upstream output into a
//! [`ResumeModel`].
//!
//! The upstream generation service enforces no schema: any field may be
//! absent, null, a bare scalar, an object, or a list, independent of its
//! documented type. All of that tolerance lives here, in one place, so the
//! layout and export stages can rely on the model invariants instead of
//! repeating defensive checks.
//!
//! # Sequence coercion rule
//! Applied independently, field by field (and again to each project's
//! `technologiesUsed`):
//! - absent / null → empty list
//! - list → passed through to element reconciliation
//! - single string → one-element list containing that string
//! - anything else (number, bool, object) → empty list

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::resume::{
    ExperienceEntry, LanguageEntry, ProjectEntry, ResumeModel, SkillEntry,
};

// ────────────────────────────────────────────────────────────────────────────
// Input boundary
// ────────────────────────────────────────────────────────────────────────────

/// Decodes the serialized payload handed over by the upstream channel.
///
/// Distinguishes the two reportable pre-render conditions: an empty hand-off
/// (or a decoded JSON `null`) is [`AppError::MissingInput`]; a payload that
/// fails to parse is [`AppError::UnparsableInput`] with the decode message
/// attached. Both short-circuit the pipeline before any rendering starts.
pub fn decode_payload(payload: &str) -> Result<Value, AppError> {
    if payload.trim().is_empty() {
        return Err(AppError::MissingInput);
    }
    let value: Value =
        serde_json::from_str(payload).map_err(|err| AppError::UnparsableInput(err.to_string()))?;
    if value.is_null() {
        return Err(AppError::MissingInput);
    }
    Ok(value)
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Builds the canonical model from an arbitrary decoded document.
///
/// Total: `normalize(None)` (and any non-object input) yields a model with
/// every scalar field absent and every sequence field empty. Malformed fields
/// are absorbed silently; this function never fails. Pure — no side effects.
pub fn normalize(raw: Option<Value>) -> ResumeModel {
    let mut root = match raw {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let personal_information = root
        .remove("personalInformation")
        .map(entry_or_default)
        .unwrap_or_default();

    let summary = match root.remove("summary") {
        Some(Value::String(text)) => Some(text),
        _ => None,
    };

    let skills = coerce_sequence(root.remove("skills"))
        .into_iter()
        .filter_map(skill_entry)
        .collect();

    let experience: Vec<ExperienceEntry> = coerce_sequence(root.remove("experience"))
        .into_iter()
        .map(entry_or_default)
        .collect();

    let education = coerce_sequence(root.remove("education"))
        .into_iter()
        .map(entry_or_default)
        .collect();

    let certifications = coerce_sequence(root.remove("certifications"))
        .into_iter()
        .map(entry_or_default)
        .collect();

    let projects = coerce_sequence(root.remove("projects"))
        .into_iter()
        .map(normalize_project)
        .collect();

    let achievements = coerce_sequence(root.remove("achievements"))
        .into_iter()
        .filter_map(display_string)
        .collect();

    let languages = coerce_sequence(root.remove("languages"))
        .into_iter()
        .filter_map(language_entry)
        .collect();

    ResumeModel {
        personal_information,
        summary,
        skills,
        experience,
        education,
        certifications,
        projects,
        achievements,
        languages,
    }
}

/// The sequence coercion rule. Well-formed lists pass through unchanged;
/// element shapes are reconciled afterwards, per element.
fn coerce_sequence(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::String(text)) => vec![Value::String(text)],
        Some(_) => Vec::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element reconciliation
// ────────────────────────────────────────────────────────────────────────────

/// Lenient entry conversion for object lists: an object maps field-by-field
/// (wrong-typed fields become absent), any other shape becomes the
/// all-fields-absent entry, which renders with per-field fallback text.
fn entry_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}

fn skill_entry(value: Value) -> Option<SkillEntry> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        Value::String(label) => Some(SkillEntry::Plain(label)),
        other => display_string(other).map(SkillEntry::Plain),
    }
}

fn language_entry(value: Value) -> Option<LanguageEntry> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        Value::String(label) => Some(LanguageEntry::Plain(label)),
        other => display_string(other).map(LanguageEntry::Plain),
    }
}

/// Projects get special treatment: the `technologiesUsed` list inside each
/// project is re-coerced independently, so a malformed tech list (or a
/// malformed sibling field) never prevents unrelated projects — or the rest
/// of this project — from normalizing correctly.
fn normalize_project(value: Value) -> ProjectEntry {
    let Value::Object(mut fields) = value else {
        return ProjectEntry::default();
    };
    let technologies_used = coerce_sequence(fields.remove("technologiesUsed"))
        .into_iter()
        .filter_map(display_string)
        .collect();
    let mut project: ProjectEntry = entry_or_default(Value::Object(fields));
    project.technologies_used = technologies_used;
    project
}

/// Display form of a bare scalar list element. Stray numbers and booleans
/// keep their text form; null and nested lists have no display form and are
/// dropped.
fn display_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::SkillDetail;
    use serde_json::json;

    #[test]
    fn test_coerce_absent_and_null_yield_empty() {
        assert!(coerce_sequence(None).is_empty());
        assert!(coerce_sequence(Some(Value::Null)).is_empty());
    }

    #[test]
    fn test_coerce_non_list_scalars_yield_empty() {
        assert!(coerce_sequence(Some(json!(17))).is_empty());
        assert!(coerce_sequence(Some(json!(true))).is_empty());
        assert!(coerce_sequence(Some(json!({"a": 1}))).is_empty());
    }

    #[test]
    fn test_coerce_bare_string_yields_singleton() {
        let items = coerce_sequence(Some(json!("Mathematics")));
        assert_eq!(items, vec![json!("Mathematics")]);
    }

    #[test]
    fn test_coerce_well_formed_list_is_identity() {
        let items = coerce_sequence(Some(json!(["a", "b", "c"])));
        assert_eq!(items, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn test_normalize_absent_input_is_total() {
        let model = normalize(None);
        assert_eq!(model, ResumeModel::default());
        assert!(model.personal_information.full_name.is_none());
        assert!(model.skills.is_empty());
        assert!(model.experience.is_empty());
        assert!(model.education.is_empty());
        assert!(model.certifications.is_empty());
        assert!(model.projects.is_empty());
        assert!(model.achievements.is_empty());
        assert!(model.languages.is_empty());
    }

    #[test]
    fn test_normalize_non_object_input_is_total() {
        assert_eq!(normalize(Some(json!("just a string"))), ResumeModel::default());
        assert_eq!(normalize(Some(json!(42))), ResumeModel::default());
    }

    #[test]
    fn test_normalize_personal_information_non_object_defaults() {
        let model = normalize(Some(json!({"personalInformation": "Ada"})));
        assert_eq!(model.personal_information, Default::default());
    }

    #[test]
    fn test_normalize_mixed_skill_list() {
        let model = normalize(Some(json!({
            "skills": ["Go", {"title": "Rust", "level": "Expert"}, 42, null],
        })));
        assert_eq!(
            model.skills,
            vec![
                SkillEntry::Plain("Go".to_string()),
                SkillEntry::Detailed(SkillDetail {
                    title: Some("Rust".to_string()),
                    level: Some("Expert".to_string()),
                }),
                SkillEntry::Plain("42".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalize_malformed_experience_element_becomes_fallback_entry() {
        let model = normalize(Some(json!({"experience": [17, {"jobTitle": "Engineer"}]})));
        assert_eq!(model.experience.len(), 2);
        assert_eq!(model.experience[0], ExperienceEntry::default());
        assert_eq!(model.experience[1].job_title.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_normalize_project_tech_list_recoerced_per_project() {
        let model = normalize(Some(json!({
            "projects": [
                {"title": "Parser", "technologiesUsed": "Rust"},
                {"title": "Cache", "technologiesUsed": 5},
                {"title": "CLI", "technologiesUsed": ["Rust", "Tokio"]},
            ],
        })));
        assert_eq!(model.projects[0].technologies_used, vec!["Rust"]);
        assert!(
            model.projects[1].technologies_used.is_empty(),
            "numeric tech list must coerce to empty without affecting siblings"
        );
        assert_eq!(model.projects[2].technologies_used, vec!["Rust", "Tokio"]);
        assert_eq!(model.projects[1].title.as_deref(), Some("Cache"));
    }

    #[test]
    fn test_normalize_summary_only_accepts_strings() {
        let model = normalize(Some(json!({"summary": 123})));
        assert!(model.summary.is_none());
        let model = normalize(Some(json!({"summary": "Seasoned engineer."})));
        assert_eq!(model.summary.as_deref(), Some("Seasoned engineer."));
    }

    #[test]
    fn test_normalize_end_to_end_scenario() {
        // Bare-string skills become a singleton, null experience becomes an
        // empty list.
        let model = normalize(Some(json!({
            "personalInformation": {"fullName": "Ada Lovelace"},
            "skills": "Mathematics",
            "experience": null,
        })));
        assert_eq!(
            model.personal_information.full_name.as_deref(),
            Some("Ada Lovelace")
        );
        assert_eq!(model.skills, vec![SkillEntry::Plain("Mathematics".to_string())]);
        assert!(model.experience.is_empty());
    }

    #[test]
    fn test_decode_payload_empty_is_missing_input() {
        assert!(matches!(decode_payload(""), Err(AppError::MissingInput)));
        assert!(matches!(decode_payload("   "), Err(AppError::MissingInput)));
    }

    #[test]
    fn test_decode_payload_null_is_missing_input() {
        assert!(matches!(decode_payload("null"), Err(AppError::MissingInput)));
    }

    #[test]
    fn test_decode_payload_garbage_is_unparsable() {
        let err = decode_payload("{not json").unwrap_err();
        match err {
            AppError::UnparsableInput(message) => {
                assert!(!message.is_empty(), "decode message must be attached")
            }
            other => panic!("expected UnparsableInput, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_payload_valid_json_passes_through() {
        let value = decode_payload(r#"{"skills": []}"#).unwrap();
        assert_eq!(value, json!({"skills": []}));
    }
}
