use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::comments::compose_comment;
use super::config::{AnswerLookup, Answers, RatingConfig};
use super::levels::{
    membership, round_to_half, LevelBand, DEFAULT_SPREAD, FALLBACK_LEVEL, LEVELS, MAX_LEVEL,
};
use super::summary::Summary;

/// Number of advantages and weaknesses reported by default.
pub const DEFAULT_TOP_K: usize = 3;

/// Accumulated support at one scale tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSupport {
    pub level: f64,
    pub support: f64,
}

/// Everything one questionnaire submission produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluateResult {
    /// Expected level after the hard cap, before rounding
    pub raw_level: f64,
    /// `raw_level` rounded to the nearest 0.5
    pub rounded_level: f64,
    pub level_label: String,
    pub level_band: LevelBand,
    /// Effective cap after composing every answered option's cap
    pub hard_cap: f64,
    pub dimension_scores: BTreeMap<String, f64>,
    pub dimension_comments: BTreeMap<String, String>,
    /// Best dimensions, highest score first
    pub advantages: Vec<String>,
    /// Worst dimensions, lowest score first
    pub weaknesses: Vec<String>,
    pub summary: Summary,
    pub summary_text: String,
    pub support_distribution: Vec<LevelSupport>,
}

/// Stateless scorer over an immutable [`RatingConfig`].
///
/// Holds only shared references and plain settings, so one evaluator can be
/// used from many threads at once.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    config: &'a RatingConfig,
    spread: f64,
    top_k: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(config: &'a RatingConfig) -> Self {
        Self {
            config,
            spread: DEFAULT_SPREAD,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Triangular spread; callers are expected to pass a finite value > 0.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn config(&self) -> &'a RatingConfig {
        self.config
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn evaluate(&self, answers: &Answers) -> EvaluateResult {
        let mut support = [0.0_f64; LEVELS.len()];
        let mut hard_cap = MAX_LEVEL;

        // Dimensions in order of first appearance; doubles as the tie-break order.
        let mut dim_order: Vec<&str> = Vec::new();
        let mut dim_sum: BTreeMap<&str, f64> = BTreeMap::new();
        let mut dim_weight: BTreeMap<&str, f64> = BTreeMap::new();

        for question_id in answers.keys() {
            if self.config.question(question_id).is_none() {
                debug!(question = %question_id, "skipping answer: unknown question");
            }
        }

        // Config order keeps floating-point sums reproducible.
        for question in &self.config.questions {
            let Some(option_id) = answers.get(&question.id) else {
                continue;
            };
            let option = match self.config.lookup(&question.id, option_id) {
                AnswerLookup::Found { option, .. } => option,
                AnswerLookup::UnknownOption { .. } | AnswerLookup::UnknownQuestion => {
                    debug!(question = %question.id, option = %option_id, "skipping answer: unknown option");
                    continue;
                }
            };

            for (slot, &level) in support.iter_mut().zip(LEVELS.iter()) {
                *slot += membership(level, option.center_level, self.spread) * question.weight;
            }

            if let Some(cap) = option.hard_cap {
                hard_cap = hard_cap.min(cap);
            }

            let dim = question.dimension.as_str();
            if !dim_sum.contains_key(dim) {
                dim_order.push(dim);
            }
            *dim_sum.entry(dim).or_insert(0.0) += option.center_level * question.weight;
            *dim_weight.entry(dim).or_insert(0.0) += question.weight;
        }

        let raw_level = compute_raw_level(&support, hard_cap);
        let rounded_level = round_to_half(raw_level);
        let level_band = LevelBand::for_level(rounded_level);

        let ranked: Vec<(&str, f64)> = dim_order
            .iter()
            .map(|&dim| {
                let weight = match dim_weight.get(dim).copied().unwrap_or(0.0) {
                    w if w > 0.0 => w,
                    _ => 1.0,
                };
                (dim, dim_sum[dim] / weight)
            })
            .collect();

        let dimension_scores: BTreeMap<String, f64> = ranked
            .iter()
            .map(|&(dim, score)| (dim.to_string(), score))
            .collect();

        let dimension_comments: BTreeMap<String, String> = ranked
            .iter()
            .map(|&(dim, score)| {
                let comment = compose_comment(self.config.rules_for(dim), score, rounded_level);
                (dim.to_string(), comment)
            })
            .collect();

        let (advantages, weaknesses) = pick_advantages_and_weaknesses(&ranked, self.top_k);

        let summary = Summary::build(
            rounded_level,
            level_band.label(),
            &dimension_scores,
            &dimension_comments,
            &advantages,
            &weaknesses,
        );
        let summary_text = summary.render();

        debug!(
            total_support = support.iter().sum::<f64>(),
            hard_cap,
            raw_level,
            rounded_level,
            dimensions = ranked.len(),
            "evaluated answers"
        );

        EvaluateResult {
            raw_level,
            rounded_level,
            level_label: level_band.label().to_string(),
            level_band,
            hard_cap,
            dimension_scores,
            dimension_comments,
            advantages,
            weaknesses,
            summary,
            summary_text,
            support_distribution: LEVELS
                .iter()
                .zip(support.iter())
                .map(|(&level, &support)| LevelSupport { level, support })
                .collect(),
        }
    }
}

/// Support-weighted expected level, clamped by `hard_cap`.
///
/// Falls back to the middle of the scale when nothing carries support.
fn compute_raw_level(support: &[f64; LEVELS.len()], hard_cap: f64) -> f64 {
    let total: f64 = support.iter().sum();
    if total <= 0.0 {
        return FALLBACK_LEVEL.min(hard_cap);
    }

    let weighted: f64 = LEVELS
        .iter()
        .zip(support.iter())
        .map(|(level, s)| level * s)
        .sum();
    (weighted / total).min(hard_cap)
}

/// Top `k` dimensions (best first) and bottom `k` (worst first).
///
/// Equal scores keep their input order. With `2k` or fewer dimensions the
/// two lists may overlap.
fn pick_advantages_and_weaknesses(ranked: &[(&str, f64)], k: usize) -> (Vec<String>, Vec<String>) {
    let mut sorted = ranked.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let advantages = sorted.iter().take(k).map(|(d, _)| d.to_string()).collect();
    let weaknesses = sorted.iter().rev().take(k).map(|(d, _)| d.to_string()).collect();
    (advantages, weaknesses)
}
