use crate::scoring::{Answers, RatingConfig};

/// A canned respondent that picks the option at the same rank for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoCase {
    pub name: &'static str,
    pub description: &'static str,
    /// Zero-based option index, clamped to the last option of shorter questions.
    pub option_rank: usize,
}

pub const DEMO_CASES: [DemoCase; 3] = [
    DemoCase {
        name: "Beginner",
        description: "Picks the first option everywhere",
        option_rank: 0,
    },
    DemoCase {
        name: "Intermediate",
        description: "Picks the third option everywhere",
        option_rank: 2,
    },
    DemoCase {
        name: "Advanced",
        description: "Picks the fifth option everywhere",
        option_rank: 4,
    },
];

impl DemoCase {
    /// Answers for every question in `config`.
    pub fn answers(&self, config: &RatingConfig) -> Answers {
        config
            .questions
            .iter()
            .filter_map(|q| {
                let idx = self.option_rank.min(q.options.len().checked_sub(1)?);
                Some((q.id.clone(), q.options[idx].id.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bundled_config;
    use crate::scoring::Evaluator;

    #[test]
    fn test_answers_cover_every_question() {
        let config = bundled_config().unwrap();
        for case in DEMO_CASES.iter() {
            assert_eq!(case.answers(&config).len(), config.questions.len());
        }
    }

    #[test]
    fn test_rank_picks_matching_option() {
        let config = bundled_config().unwrap();
        let answers = DEMO_CASES[1].answers(&config);
        assert_eq!(answers["Q1"], "Q1_A3");
        assert_eq!(answers["Q11"], "Q11_A3");
    }

    #[test]
    fn test_rank_clamps_to_last_option() {
        let config = bundled_config().unwrap();
        let case = DemoCase {
            name: "Overflow",
            description: "",
            option_rank: 10,
        };
        let answers = case.answers(&config);
        assert_eq!(answers["Q1"], "Q1_A5");
        assert_eq!(answers["Q11"], "Q11_A6");
    }

    #[test]
    fn test_demo_levels_increase() {
        let config = bundled_config().unwrap();
        let evaluator = Evaluator::new(&config);
        let levels: Vec<f64> = DEMO_CASES
            .iter()
            .map(|c| evaluator.evaluate(&c.answers(&config)).raw_level)
            .collect();
        assert!(levels[0] < levels[1]);
        assert!(levels[1] < levels[2]);
    }
}
