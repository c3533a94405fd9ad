//! Metadata sub-form
//!
//! Owns the descriptive metadata (title, abstract, keywords, contributors)
//! that rides along with the intake form but is otherwise opaque to the
//! lifecycle orchestration.

use crate::types::{Contributor, Publication};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Posted metadata fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataInput {
    /// Title keyed by locale
    #[serde(default)]
    pub title: BTreeMap<String, String>,
    /// Abstract keyed by locale
    #[serde(default, rename = "abstract")]
    pub abstract_text: BTreeMap<String, String>,
    /// Keywords in display order
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Contributors in display order
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

impl MetadataInput {
    /// Field names whose values are keyed by locale
    pub const fn locale_field_names() -> &'static [&'static str] {
        &["title", "abstract"]
    }

    /// The title posted for `locale`, if any
    pub fn title_for(&self, locale: &str) -> Option<&str> {
        self.title.get(locale).map(String::as_str).filter(|t| !t.trim().is_empty())
    }

    /// Persist the posted metadata onto the current publication
    pub fn apply(&self, publication: &mut Publication) {
        publication.title = self.title.clone();
        publication.abstract_text = self.abstract_text.clone();
        publication.keywords = self.keywords.clone();
        publication.contributors = self.contributors.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubmissionStatus;

    fn publication() -> Publication {
        Publication {
            id: 1,
            submission_id: 1,
            locale: "en_US".into(),
            language: "en".into(),
            section_id: 1,
            status: SubmissionStatus::Queued,
            title: BTreeMap::new(),
            abstract_text: BTreeMap::new(),
            keywords: vec![],
            contributors: vec![],
        }
    }

    #[test]
    fn apply_overwrites_publication_metadata() {
        let mut input = MetadataInput::default();
        input.title.insert("en_US".into(), "On Sequencing".into());
        input.keywords.push("ordering".into());
        input.contributors.push(Contributor {
            given_name: "Ada".into(),
            family_name: "Lovelace".into(),
            email: None,
            affiliation: None,
        });

        let mut publication = publication();
        input.apply(&mut publication);

        assert_eq!(publication.title.get("en_US").map(String::as_str), Some("On Sequencing"));
        assert_eq!(publication.keywords, vec!["ordering".to_string()]);
        assert_eq!(publication.contributors.len(), 1);
    }

    #[test]
    fn title_for_ignores_blank_titles() {
        let mut input = MetadataInput::default();
        input.title.insert("en_US".into(), "   ".into());
        assert!(input.title_for("en_US").is_none());
        assert!(input.title_for("fr_CA").is_none());

        input.title.insert("fr_CA".into(), "Sur le séquençage".into());
        assert_eq!(input.title_for("fr_CA"), Some("Sur le séquençage"));
    }

    #[test]
    fn metadata_input_deserializes_with_defaults() {
        let input: MetadataInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, MetadataInput::default());

        let input: MetadataInput =
            serde_json::from_str(r#"{"title": {"en_US": "A Title"}, "abstract": {"en_US": "Text"}}"#)
                .unwrap();
        assert_eq!(input.title_for("en_US"), Some("A Title"));
        assert_eq!(input.abstract_text.get("en_US").map(String::as_str), Some("Text"));
    }
}
