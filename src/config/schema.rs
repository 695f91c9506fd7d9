use serde::{Deserialize, Serialize};

use crate::scoring::{QuestionConfig, RatingConfig, SuggestionRules};

/// Questions document (`questions.yaml`)
///
/// ```yaml
/// questions:
///   - id: Q5
///     text: "How reliable is your first serve?"
///     dimension: serve
///     weight: 1.0
///     options:
///       - { id: Q5_A1, text: "I double fault a lot", center_level: 1.5, hard_cap: 3.0 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionsDocument {
    pub questions: Vec<QuestionConfig>,
}

/// Suggestions document (`suggestions.yaml`)
///
/// ```yaml
/// suggestions:
///   serve:
///     - { max: 2.5, text: "Your serve is mostly about getting the ball in." }
///     - { min: 2.5, text: "Your serve starts to create pressure." }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SuggestionsDocument {
    #[serde(default)]
    pub suggestions: SuggestionRules,
}

pub fn into_rating_config(questions: QuestionsDocument, suggestions: SuggestionsDocument) -> RatingConfig {
    RatingConfig::new(questions.questions, suggestions.suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_suggestions_document() {
        let doc: SuggestionsDocument = serde_saphyr::from_str("{}").unwrap();
        assert!(doc.suggestions.is_empty());
    }

    #[test]
    fn test_questions_document_requires_questions() {
        let parsed: Result<QuestionsDocument, _> = serde_saphyr::from_str("{}");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_into_rating_config() {
        let questions: QuestionsDocument = serde_saphyr::from_str(
            r#"
questions:
  - id: Q1
    text: "Rally length?"
    dimension: baseline
    weight: 2
    options:
      - { id: A, text: "short", center_level: 2.0 }
"#,
        )
        .unwrap();
        let suggestions: SuggestionsDocument = serde_saphyr::from_str(
            r#"
suggestions:
  baseline:
    - { text: "Any score" }
"#,
        )
        .unwrap();
        let config = into_rating_config(questions, suggestions);
        assert_eq!(config.questions[0].weight, 2.0);
        assert_eq!(config.rules_for("baseline").len(), 1);
    }
}
