use serde::Serialize;

use super::config::SuggestionRule;

/// Distance from the overall level at which a dimension counts as off-balance.
pub const RELATIVE_THRESHOLD: f64 = 0.5;

/// Where a dimension sits relative to the overall rounded level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativePosition {
    Strength,
    Balanced,
    Weakness,
}

impl RelativePosition {
    pub fn classify(dimension_score: f64, overall_level: f64) -> Self {
        let diff = dimension_score - overall_level;
        if diff >= RELATIVE_THRESHOLD {
            RelativePosition::Strength
        } else if diff <= -RELATIVE_THRESHOLD {
            RelativePosition::Weakness
        } else {
            RelativePosition::Balanced
        }
    }

    pub fn sentence(&self) -> &'static str {
        match self {
            RelativePosition::Strength => {
                " This area is clearly above your overall level; treat it as one of your main ways to win points."
            }
            RelativePosition::Weakness => {
                " This area is a relative weakness that caps your overall game; make it a priority in your next block of practice."
            }
            RelativePosition::Balanced => {
                " This area is roughly in line with your overall level; keep it steady and raise its quality step by step."
            }
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            RelativePosition::Strength => "strength",
            RelativePosition::Balanced => "balanced",
            RelativePosition::Weakness => "weakness",
        }
    }
}

/// Text of the first rule whose `[min, max)` contains `score`.
///
/// A matching rule with empty text counts as no match.
pub fn pick_base_comment(rules: &[SuggestionRule], score: f64) -> String {
    match rules.iter().find(|rule| rule.contains(score)) {
        Some(rule) if !rule.text.is_empty() => rule.text.clone(),
        _ => fallback_comment(score),
    }
}

pub fn fallback_comment(score: f64) -> String {
    format!(
        "Your level in this area is around NTRP {:.1}; keep training it with your own goals in mind.",
        score
    )
}

/// Base comment followed by the relative-position sentence.
pub fn compose_comment(rules: &[SuggestionRule], score: f64, overall_level: f64) -> String {
    let mut comment = pick_base_comment(rules, score);
    comment.push_str(RelativePosition::classify(score, overall_level).sentence());
    comment
}

/// First sentence of `text`, terminator included.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or end of text, so
/// decimals like "NTRP 3.5" do not split.
pub fn first_sentence(text: &str) -> &str {
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                return &text[..idx + c.len_utf8()];
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(min: Option<f64>, max: Option<f64>, text: &str) -> SuggestionRule {
        SuggestionRule {
            min,
            max,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            rule(None, Some(3.0), "low"),
            rule(Some(2.0), Some(5.0), "overlap"),
            rule(Some(3.0), None, "high"),
        ];
        assert_eq!(pick_base_comment(&rules, 2.5), "low");
        assert_eq!(pick_base_comment(&rules, 3.0), "overlap");
        assert_eq!(pick_base_comment(&rules, 6.0), "high");
    }

    #[test]
    fn test_upper_bound_is_exclusive() {
        let rules = vec![rule(Some(1.0), Some(3.0), "band")];
        assert_eq!(pick_base_comment(&rules, 1.0), "band");
        assert!(pick_base_comment(&rules, 3.0).contains("NTRP 3.0"));
    }

    #[test]
    fn test_no_rules_uses_fallback() {
        let comment = pick_base_comment(&[], 3.4);
        assert!(comment.contains("NTRP 3.4"));
    }

    #[test]
    fn test_empty_text_uses_fallback() {
        let rules = vec![rule(None, None, "")];
        assert_eq!(pick_base_comment(&rules, 4.0), fallback_comment(4.0));
    }

    #[test]
    fn test_relative_position_thresholds() {
        assert_eq!(RelativePosition::classify(4.5, 4.0), RelativePosition::Strength);
        assert_eq!(RelativePosition::classify(4.49, 4.0), RelativePosition::Balanced);
        assert_eq!(RelativePosition::classify(3.51, 4.0), RelativePosition::Balanced);
        assert_eq!(RelativePosition::classify(3.5, 4.0), RelativePosition::Weakness);
    }

    #[test]
    fn test_compose_puts_base_first() {
        let rules = vec![rule(None, None, "Solid serve.")];
        let comment = compose_comment(&rules, 5.0, 3.0);
        assert!(comment.starts_with("Solid serve."));
        assert!(comment.ends_with(RelativePosition::Strength.sentence()));
    }

    #[test]
    fn test_first_sentence_splits_on_terminator() {
        assert_eq!(first_sentence("Good depth. Keep going."), "Good depth.");
        assert_eq!(first_sentence("Great! Really."), "Great!");
        assert_eq!(first_sentence("No terminator"), "No terminator");
        assert_eq!(first_sentence(""), "");
    }

    #[test]
    fn test_first_sentence_skips_decimals() {
        assert_eq!(
            first_sentence("Around NTRP 3.5 today. More later."),
            "Around NTRP 3.5 today."
        );
    }
}
