//! Profile View — applies ranking and structuring to every category of a candidate profile.

use serde::Serialize;
use tracing::debug;

use crate::profile::models::{CandidateProfile, Category, CategoryKind};
use crate::profile::ranking::{merge_and_rank, RankedItem};
use crate::profile::structurer::{structure_entry, StructuredEntry};

/// A ranked item plus, for entry categories, its structured decomposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewItem {
    #[serde(flatten)]
    pub ranked: RankedItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub items: Vec<ViewItem>,
    pub relevant_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub summary: String,
    pub categories: Vec<CategoryView>,
}

pub fn build_category_view(profile: &CandidateProfile, category: Category) -> CategoryView {
    let ranked = merge_and_rank(
        profile.raw_items(category),
        profile.inferred_items(category),
        profile.annotations(category),
    );

    let items: Vec<ViewItem> = ranked
        .into_iter()
        .map(|ranked| {
            let structured = match category.kind() {
                CategoryKind::Entry => structure_entry(&ranked.content),
                CategoryKind::Attribute => None,
            };
            ViewItem { ranked, structured }
        })
        .collect();

    let relevant_count = items.iter().filter(|i| i.ranked.relevant).count();
    debug!(
        %category,
        items = items.len(),
        relevant = relevant_count,
        "Built category view"
    );

    CategoryView {
        category,
        items,
        relevant_count,
    }
}

/// Builds every category in `Category::ALL` order, empty ones included.
pub fn build_profile_view(profile: &CandidateProfile) -> ProfileView {
    ProfileView {
        summary: profile.summary.clone(),
        categories: Category::ALL
            .into_iter()
            .map(|category| build_category_view(profile, category))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_profile() -> CandidateProfile {
        serde_json::from_value(json!({
            "summary": "Platform engineer with a data background",
            "technical_skills": ["Python", "Go"],
            "inferred_technical_skills": ["Leadership"],
            "education": [
                "BSc Computer Science, State University [2014 - 2018]\nGPA: 3.6\nThesis on compilers",
                "Online Course in Statistics [DNS]"
            ],
            "work_experience": [
                "Data Engineer, Initech [2018 - 2020]\n- Built ETL jobs",
                "Platform Engineer, Globex [2020 - Present]\n- Designed the deploy pipeline\n- Led on-call"
            ],
            "relevance_analysis": {
                "technical_skills": [
                    {"item": "Python", "relevance": 9, "relevant": true},
                    {"item": "Go", "relevance": 2, "relevant": false}
                ],
                "work_experience": [
                    {"item": "Platform Engineer, Globex [2020 - Present]", "relevance": 8, "relevant": true}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_attribute_category_is_ranked_without_structure() {
        let view = build_category_view(&sample_profile(), Category::TechnicalSkills);
        let contents: Vec<_> = view.items.iter().map(|i| i.ranked.content.as_str()).collect();
        assert_eq!(contents, vec!["Python", "Go", "Leadership"]);
        assert!(view.items.iter().all(|i| i.structured.is_none()));
        assert_eq!(view.relevant_count, 1);
    }

    #[test]
    fn test_entry_category_is_ranked_then_structured() {
        let view = build_category_view(&sample_profile(), Category::WorkExperience);
        assert_eq!(view.items.len(), 2);

        let top = view.items[0].structured.as_ref().unwrap();
        assert_eq!(top.title, "Platform Engineer, Globex");
        assert_eq!(top.date.as_deref(), Some("2020 - Present"));
        assert_eq!(
            top.blocks,
            vec!["- Designed the deploy pipeline", "- Led on-call"]
        );
        assert!(view.items[0].ranked.relevant);
        assert_eq!(view.relevant_count, 1);
    }

    #[test]
    fn test_education_entries_without_annotations_keep_order() {
        let view = build_category_view(&sample_profile(), Category::Education);
        let first = view.items[0].structured.as_ref().unwrap();
        assert_eq!(first.title, "BSc Computer Science, State University");
        assert_eq!(first.blocks, vec!["GPA: 3.6", "Thesis on compilers"]);

        let second = view.items[1].structured.as_ref().unwrap();
        assert_eq!(second.title, "Online Course in Statistics");
        assert_eq!(second.date, None);
        assert_eq!(view.relevant_count, 0);
    }

    #[test]
    fn test_profile_view_lists_every_category_in_order() {
        let view = build_profile_view(&sample_profile());
        assert_eq!(view.summary, "Platform engineer with a data background");
        let order: Vec<_> = view.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, Category::ALL.to_vec());

        let awards = view
            .categories
            .iter()
            .find(|c| c.category == Category::Awards)
            .unwrap();
        assert!(awards.items.is_empty());
    }

    #[test]
    fn test_empty_entry_string_has_no_structure() {
        let profile = CandidateProfile {
            projects: vec![String::new()],
            ..Default::default()
        };
        let view = build_category_view(&profile, Category::Projects);
        assert_eq!(view.items.len(), 1);
        assert!(view.items[0].structured.is_none());
    }

    #[test]
    fn test_view_item_serializes_flat() {
        let view = build_category_view(&sample_profile(), Category::WorkExperience);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["category"], "work_experience");
        assert_eq!(json["relevant_count"], 1);
        let item = &json["items"][0];
        assert_eq!(item["relevance"], 8.0);
        assert_eq!(item["inferred"], false);
        assert_eq!(item["structured"]["title"], "Platform Engineer, Globex");

        let skills = serde_json::to_value(build_category_view(
            &sample_profile(),
            Category::TechnicalSkills,
        ))
        .unwrap();
        assert!(skills["items"][0].get("structured").is_none());
    }
}
