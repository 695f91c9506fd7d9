use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submitted answers: question id -> chosen option id.
pub type Answers = BTreeMap<String, String>;

/// Per-dimension ordered suggestion rules.
pub type SuggestionRules = BTreeMap<String, Vec<SuggestionRule>>;

/// One selectable answer.
///
/// Example YAML:
/// ```yaml
/// id: Q11_A1
/// text: "I lose almost every set 0-6 or 1-6"
/// center_level: 1.5
/// hard_cap: 3.0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OptionConfig {
    pub id: String,
    pub text: String,

    /// Peak of the fuzzy membership; must be a scale level.
    pub center_level: f64,

    /// Upper bound on the overall rating when this option is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_cap: Option<f64>,
}

/// A single questionnaire item belonging to exactly one dimension.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub id: String,
    pub text: String,

    /// Dimension tag, e.g. "baseline" or "serve"
    pub dimension: String,

    /// Relative weight (default: 1.0)
    #[serde(default = "default_weight")]
    pub weight: f64,

    pub options: Vec<OptionConfig>,
}

fn default_weight() -> f64 {
    1.0
}

impl QuestionConfig {
    pub fn option(&self, option_id: &str) -> Option<&OptionConfig> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// Comment text for dimension scores in the half-open range `[min, max)`.
///
/// A missing `min` is unbounded below, a missing `max` unbounded above.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SuggestionRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default)]
    pub text: String,
}

impl SuggestionRule {
    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower() && score < self.upper()
    }
}

/// Outcome of resolving one submitted answer against the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerLookup<'a> {
    Found {
        question: &'a QuestionConfig,
        option: &'a OptionConfig,
    },
    UnknownQuestion,
    UnknownOption {
        question: &'a QuestionConfig,
    },
}

impl AnswerLookup<'_> {
    pub fn is_found(&self) -> bool {
        matches!(self, AnswerLookup::Found { .. })
    }
}

/// Immutable questionnaire configuration the engine is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingConfig {
    pub questions: Vec<QuestionConfig>,
    pub suggestions: SuggestionRules,
}

impl RatingConfig {
    pub fn new(questions: Vec<QuestionConfig>, suggestions: SuggestionRules) -> Self {
        Self {
            questions,
            suggestions,
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionConfig> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Resolve an answer. Unknown ids are reported, never raised.
    pub fn lookup(&self, question_id: &str, option_id: &str) -> AnswerLookup<'_> {
        match self.question(question_id) {
            None => AnswerLookup::UnknownQuestion,
            Some(question) => match question.option(option_id) {
                Some(option) => AnswerLookup::Found { question, option },
                None => AnswerLookup::UnknownOption { question },
            },
        }
    }

    pub fn rules_for(&self, dimension: &str) -> &[SuggestionRule] {
        self.suggestions
            .get(dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
