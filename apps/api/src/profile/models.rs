//! Upstream profile shapes and their lenient deserializers.
//!
//! The extraction pipeline that produces these objects is loosely typed: list
//! fields can arrive as `null`, as a bare string, or with non-string elements,
//! and relevance annotations can be missing fields. Everything here degrades to
//! empty or neutral values instead of failing the request.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

/// Whether a category holds short single-value attributes or multi-line entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Skill-like values, each paired with an AI-inferred companion list.
    Attribute,
    /// Multi-line résumé entries that are passed through the structurer.
    Entry,
}

/// A named group of résumé facts on the upstream profile object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SoftSkills,
    TechnicalSkills,
    Languages,
    Education,
    Certifications,
    Awards,
    WorkExperience,
    Projects,
    CoCurricularActivities,
}

impl Category {
    /// Display order of categories in a full profile view.
    pub const ALL: [Category; 9] = [
        Category::SoftSkills,
        Category::TechnicalSkills,
        Category::Languages,
        Category::Education,
        Category::Certifications,
        Category::Awards,
        Category::WorkExperience,
        Category::Projects,
        Category::CoCurricularActivities,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SoftSkills => "soft_skills",
            Category::TechnicalSkills => "technical_skills",
            Category::Languages => "languages",
            Category::Education => "education",
            Category::Certifications => "certifications",
            Category::Awards => "awards",
            Category::WorkExperience => "work_experience",
            Category::Projects => "projects",
            Category::CoCurricularActivities => "co_curricular_activities",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::SoftSkills | Category::TechnicalSkills | Category::Languages => {
                CategoryKind::Attribute
            }
            _ => CategoryKind::Entry,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown attribute category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Relevance annotations
// ────────────────────────────────────────────────────────────────────────────

/// Externally computed job-relevance for one item, joined on its natural key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceAnnotation {
    pub item: String,
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub relevant: bool,
}

/// Parses an annotation array, skipping entries without a string `item`.
///
/// `relevance` must be a JSON number and `relevant` must be JSON `true` to count;
/// anything else falls back to `0` / `false`.
pub fn annotations_from_value(value: &Value) -> Vec<RelevanceAnnotation> {
    let Value::Array(entries) = value else {
        return Vec::new();
    };

    let mut annotations = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(item) = entry.get("item").and_then(Value::as_str) else {
            warn!("Skipping relevance annotation without an item key: {entry}");
            continue;
        };
        annotations.push(RelevanceAnnotation {
            item: item.to_string(),
            relevance: entry
                .get("relevance")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            relevant: entry
                .get("relevant")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        });
    }
    annotations
}

/// Keeps only the string elements of a JSON array; any other shape is empty.
pub fn strings_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(strings_from_value(&value))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

pub fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// `null` or a non-array means "no annotations supplied".
pub fn lenient_annotations<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<RelevanceAnnotation>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(_) => Some(annotations_from_value(&value)),
        _ => None,
    })
}

fn lenient_relevance_analysis<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, Vec<RelevanceAnnotation>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(HashMap::new());
    };
    Ok(map
        .into_iter()
        .filter(|(_, v)| v.is_array())
        .map(|(category, v)| {
            let annotations = annotations_from_value(&v);
            (category, annotations)
        })
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// Candidate profile as emitted by the upstream extraction service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub inferred_soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub inferred_technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub inferred_languages: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub awards: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub work_experience: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub projects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub co_curricular_activities: Vec<String>,
    /// Keyed by category wire name (`"technical_skills"`, ...).
    #[serde(default, deserialize_with = "lenient_relevance_analysis")]
    pub relevance_analysis: HashMap<String, Vec<RelevanceAnnotation>>,
}

impl CandidateProfile {
    pub fn raw_items(&self, category: Category) -> &[String] {
        match category {
            Category::SoftSkills => &self.soft_skills,
            Category::TechnicalSkills => &self.technical_skills,
            Category::Languages => &self.languages,
            Category::Education => &self.education,
            Category::Certifications => &self.certifications,
            Category::Awards => &self.awards,
            Category::WorkExperience => &self.work_experience,
            Category::Projects => &self.projects,
            Category::CoCurricularActivities => &self.co_curricular_activities,
        }
    }

    /// AI-inferred companion list. Entry categories have none.
    pub fn inferred_items(&self, category: Category) -> &[String] {
        match category {
            Category::SoftSkills => &self.inferred_soft_skills,
            Category::TechnicalSkills => &self.inferred_technical_skills,
            Category::Languages => &self.inferred_languages,
            _ => &[],
        }
    }

    pub fn annotations(&self, category: Category) -> Option<&[RelevanceAnnotation]> {
        self.relevance_analysis
            .get(category.as_str())
            .map(Vec::as_slice)
    }
}
