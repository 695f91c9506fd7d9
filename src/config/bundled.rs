use super::schema::{into_rating_config, QuestionsDocument, SuggestionsDocument};
use super::ConfigError;
use crate::scoring::{validate_config, RatingConfig};

/// Default questionnaire shipped inside the binary.
pub const BUNDLED_QUESTIONS: &str = include_str!("../../assets/questions.yaml");
pub const BUNDLED_SUGGESTIONS: &str = include_str!("../../assets/suggestions.yaml");

/// Parse and validate the embedded questionnaire.
pub fn bundled_config() -> Result<RatingConfig, ConfigError> {
    let questions: QuestionsDocument =
        serde_saphyr::from_str(BUNDLED_QUESTIONS).map_err(|e| ConfigError::Bundled {
            message: format!("questions: {}", e),
        })?;
    let suggestions: SuggestionsDocument =
        serde_saphyr::from_str(BUNDLED_SUGGESTIONS).map_err(|e| ConfigError::Bundled {
            message: format!("suggestions: {}", e),
        })?;

    let config = into_rating_config(questions, suggestions);
    validate_config(&config).map_err(|errors| ConfigError::Bundled {
        message: errors.join("; "),
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::dimensions::DIMENSIONS;

    #[test]
    fn test_bundled_config_is_valid() {
        let config = bundled_config().unwrap();
        assert_eq!(config.questions.len(), 12);
    }

    #[test]
    fn test_bundled_covers_every_dimension() {
        let config = bundled_config().unwrap();
        for dim in DIMENSIONS.iter() {
            assert!(
                config.questions.iter().any(|q| q.dimension == dim.key),
                "no question for {}",
                dim.key
            );
            assert!(!config.rules_for(dim.key).is_empty(), "no rules for {}", dim.key);
        }
    }

    #[test]
    fn test_bundled_rules_are_contiguous() {
        let config = bundled_config().unwrap();
        for (dim, rules) in &config.suggestions {
            assert_eq!(rules[0].lower(), f64::NEG_INFINITY, "{}", dim);
            assert_eq!(rules[rules.len() - 1].upper(), f64::INFINITY, "{}", dim);
            for pair in rules.windows(2) {
                assert_eq!(pair[0].upper(), pair[1].lower(), "gap in {}", dim);
            }
        }
    }
}
