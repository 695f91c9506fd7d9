use serde::Serialize;
use std::collections::HashSet;

use super::config::{AnswerLookup, Answers, RatingConfig};
use super::levels::is_scale_level;

/// Validate a loaded rating configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &RatingConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.questions.is_empty() {
        errors.push("questions: at least one question is required".to_string());
    }

    let mut seen_questions = HashSet::new();
    for (i, question) in config.questions.iter().enumerate() {
        let path = format!("questions[{}]", i);

        if question.id.trim().is_empty() {
            errors.push(format!("{}.id: must not be empty", path));
        } else if !seen_questions.insert(question.id.as_str()) {
            errors.push(format!("{}.id: duplicate question id '{}'", path, question.id));
        }

        if question.dimension.trim().is_empty() {
            errors.push(format!("{}.dimension: must not be empty", path));
        }

        if !(question.weight.is_finite() && question.weight > 0.0) {
            errors.push(format!(
                "{}.weight: must be a positive number, got {}",
                path, question.weight
            ));
        }

        if question.options.is_empty() {
            errors.push(format!("{}.options: at least one option is required", path));
        }

        let mut seen_options = HashSet::new();
        for (j, option) in question.options.iter().enumerate() {
            let opt_path = format!("{}.options[{}]", path, j);

            if option.id.trim().is_empty() {
                errors.push(format!("{}.id: must not be empty", opt_path));
            } else if !seen_options.insert(option.id.as_str()) {
                errors.push(format!("{}.id: duplicate option id '{}'", opt_path, option.id));
            }

            if !is_scale_level(option.center_level) {
                errors.push(format!(
                    "{}.center_level: {} is not an NTRP scale level",
                    opt_path, option.center_level
                ));
            }

            if let Some(cap) = option.hard_cap {
                if !is_scale_level(cap) {
                    errors.push(format!(
                        "{}.hard_cap: {} is not an NTRP scale level",
                        opt_path, cap
                    ));
                }
            }
        }
    }

    for (dimension, rules) in &config.suggestions {
        for (i, rule) in rules.iter().enumerate() {
            let path = format!("suggestions.{}[{}]", dimension, i);
            if rule.lower().is_nan() || rule.upper().is_nan() {
                errors.push(format!("{}: bounds must be numbers", path));
            } else if rule.lower() >= rule.upper() {
                errors.push(format!(
                    "{}: min ({}) must be below max ({})",
                    path,
                    rule.lower(),
                    rule.upper()
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// How a submitted answer resolved against the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Accepted,
    UnknownQuestion,
    UnknownOption,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerCheck {
    pub question_id: String,
    pub option_id: String,
    pub outcome: AnswerOutcome,
}

impl AnswerCheck {
    pub fn is_skipped(&self) -> bool {
        self.outcome != AnswerOutcome::Accepted
    }
}

/// Report how each submitted answer would be treated by the engine.
///
/// The engine skips anything not `Accepted`; callers that want strict input
/// can reject the submission when any check is skipped.
pub fn check_answers(config: &RatingConfig, answers: &Answers) -> Vec<AnswerCheck> {
    answers
        .iter()
        .map(|(question_id, option_id)| {
            let outcome = match config.lookup(question_id, option_id) {
                AnswerLookup::Found { .. } => AnswerOutcome::Accepted,
                AnswerLookup::UnknownQuestion => AnswerOutcome::UnknownQuestion,
                AnswerLookup::UnknownOption { .. } => AnswerOutcome::UnknownOption,
            };
            AnswerCheck {
                question_id: question_id.clone(),
                option_id: option_id.clone(),
                outcome,
            }
        })
        .collect()
}

/// Configured questions with no submitted answer, in config order.
pub fn missing_questions<'a>(config: &'a RatingConfig, answers: &Answers) -> Vec<&'a str> {
    config
        .questions
        .iter()
        .filter(|q| !answers.contains_key(&q.id))
        .map(|q| q.id.as_str())
        .collect()
}
