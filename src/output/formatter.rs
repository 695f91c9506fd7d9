use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::dimensions::{self, GROUPS};
use crate::scoring::validation::{AnswerCheck, AnswerOutcome};
use crate::scoring::{EvaluateResult, LevelBand, RatingConfig, RelativePosition};

const MAX_RULE_WIDTH: usize = 60;
const MIN_RULE_WIDTH: usize = 20;
const BAR_CELLS: usize = 20;
const OTHER_GROUP: &str = "Other";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Width of `=`/`-` rules: terminal width capped at 60, or 60 for pipes
fn rule_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| (w as usize).clamp(MIN_RULE_WIDTH, MAX_RULE_WIDTH))
        .unwrap_or(MAX_RULE_WIDTH)
}

fn bold(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Colored short tag for a relative position: strength / balanced / weakness
pub fn format_position_tag(position: RelativePosition, use_colors: bool) -> String {
    let tag = position.tag();
    if !use_colors {
        return tag.to_string();
    }
    match position {
        RelativePosition::Strength => tag.green().to_string(),
        RelativePosition::Balanced => tag.blue().to_string(),
        RelativePosition::Weakness => tag.red().to_string(),
    }
}

/// 20-cell bar for a score on the 1.0-7.0 range, e.g. `[#######.............]`.
///
/// The fill glyph encodes the position against the overall level:
/// `#` strength, `=` balanced, `-` weakness.
pub fn format_score_bar(score: f64, overall_level: f64) -> String {
    let filled = (((score - 1.0) / 6.0) * BAR_CELLS as f64).clamp(0.0, BAR_CELLS as f64) as usize;
    let glyph = match RelativePosition::classify(score, overall_level) {
        RelativePosition::Strength => "#",
        RelativePosition::Balanced => "=",
        RelativePosition::Weakness => "-",
    };
    format!("[{}{}]", glyph.repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn names(dims: &[String]) -> Vec<&str> {
    dims.iter().map(|d| dimensions::display_name(d)).collect()
}

/// Group lines like `Groundstrokes: Forehand (3.5) / Backhand (3.0)`
fn format_group_overview(result: &EvaluateResult) -> Vec<String> {
    let mut lines = Vec::new();
    let mut groups: Vec<(&str, Vec<&str>)> = GROUPS.iter().map(|g| (*g, Vec::new())).collect();
    groups.push((OTHER_GROUP, Vec::new()));

    for dim in dimensions::canonical_order(result.dimension_scores.keys().map(String::as_str)) {
        let group = dimensions::meta(dim).map(|m| m.group).unwrap_or(OTHER_GROUP);
        if let Some((_, dims)) = groups.iter_mut().find(|(g, _)| *g == group) {
            dims.push(dim);
        }
    }

    for (group, dims) in groups {
        if dims.is_empty() {
            continue;
        }
        let entries: Vec<String> = dims
            .iter()
            .map(|d| format!("{} ({:.1})", dimensions::display_name(d), result.dimension_scores[*d]))
            .collect();
        lines.push(format!("  {}: {}", group, entries.join(" / ")));
    }
    lines
}

/// Compact overview card: level, grouped dimension scores, top strengths and focus areas
pub fn format_summary_card(title: &str, result: &EvaluateResult, use_colors: bool) -> String {
    let rule = "=".repeat(rule_width());
    let mut lines = vec![
        rule.clone(),
        heading(title, use_colors),
        rule.clone(),
        bold(&format!("NTRP {:.1}", result.rounded_level), use_colors),
        result.level_label.clone(),
        String::new(),
        "Skill overview:".to_string(),
    ];
    lines.extend(format_group_overview(result));
    lines.push(String::new());

    let strengths = if result.advantages.is_empty() {
        "Fairly even across the board".to_string()
    } else {
        names(&result.advantages).join(" / ")
    };
    let focus = if result.weaknesses.is_empty() {
        "Keep developing every area".to_string()
    } else {
        names(&result.weaknesses).join(" / ")
    };
    lines.push(format!("Main strengths: {}", strengths));
    lines.push(format!("Focus areas:    {}", focus));
    lines.push(rule);
    lines.join("\n")
}

/// One-block result: level plus strengths and focus areas
pub fn format_simple_result(title: &str, result: &EvaluateResult, use_colors: bool) -> String {
    let mut lines = vec![
        heading(title, use_colors),
        "-".repeat(rule_width().min(40)),
        format!(
            "NTRP level: {} ({})",
            bold(&format!("{:.1}", result.rounded_level), use_colors),
            result.level_label
        ),
    ];
    if !result.advantages.is_empty() {
        lines.push(format!("Strengths: {}", names(&result.advantages).join(", ")));
    }
    if !result.weaknesses.is_empty() {
        lines.push(format!("Focus areas: {}", names(&result.weaknesses).join(", ")));
    }
    lines.join("\n")
}

/// Split a dimension comment into its rule text and the relative-position sentence
fn split_comment(comment: &str, position: RelativePosition) -> (&str, &str) {
    let sentence = position.sentence();
    match comment.strip_suffix(sentence) {
        Some(base) => (base, sentence.trim_start()),
        None => (comment, ""),
    }
}

fn push_highlights(
    lines: &mut Vec<String>,
    dims: &[String],
    result: &EvaluateResult,
    tip: fn(&str) -> &'static str,
) {
    for dim in dims {
        let score = result.dimension_scores.get(dim).copied().unwrap_or(0.0);
        let comment = result.dimension_comments.get(dim).map(String::as_str).unwrap_or("");
        lines.push(format!("- {} (about {:.1}):", dimensions::display_name(dim), score));
        lines.push(format!("  {}", crate::scoring::comments::first_sentence(comment)));
        lines.push(format!("  {}", tip(dim)));
        lines.push(String::new());
    }
}

/// Full report with practice tips and a bar and comment per dimension
pub fn format_detailed_result(title: &str, result: &EvaluateResult, use_colors: bool) -> String {
    let rule = "=".repeat(rule_width());
    let band: LevelBand = result.level_band;
    let mut lines = vec![
        rule.clone(),
        format!("  {}", heading(title, use_colors)),
        rule.clone(),
        String::new(),
        format!(
            "Overall level: {} ({})",
            bold(&format!("NTRP {:.1}", result.rounded_level), use_colors),
            result.level_label
        ),
        format!("Raw score: {:.2}", result.raw_level),
        band.description().to_string(),
        String::new(),
        format!(
            "Overall, your current level is about NTRP {:.1} ({}).",
            result.rounded_level, result.level_label
        ),
    ];
    if !result.advantages.is_empty() {
        lines.push(format!(
            "Among players at your level you are already competitive, especially in {}.",
            names(&result.advantages).join(", ")
        ));
    }
    if !result.weaknesses.is_empty() {
        lines.push(format!(
            "Closing the gap in {} would lift your overall game noticeably.",
            names(&result.weaknesses).join(", ")
        ));
    }
    lines.push(String::new());

    if !result.advantages.is_empty() {
        lines.push(bold("Your main strengths:", use_colors));
        lines.push(String::new());
        push_highlights(&mut lines, &result.advantages, result, dimensions::advantage_tip);
    }

    if !result.weaknesses.is_empty() {
        lines.push(bold("Where to focus first:", use_colors));
        lines.push(String::new());
        push_highlights(&mut lines, &result.weaknesses, result, dimensions::improvement_tip);
        lines.push(
            "If you only want to focus on a few things, put your practice time into the 2-3 areas above."
                .to_string(),
        );
        lines.push(String::new());
    }

    lines.push(bold("Dimension-by-dimension assessment:", use_colors));
    lines.push(String::new());
    for dim in dimensions::canonical_order(result.dimension_scores.keys().map(String::as_str)) {
        let score = result.dimension_scores[dim];
        let position = RelativePosition::classify(score, result.rounded_level);
        let comment = result.dimension_comments.get(dim).map(String::as_str).unwrap_or("");
        let (base, relative) = split_comment(comment, position);

        lines.push(format!(
            "[{} (about {:.1})] {} {}",
            dimensions::display_name(dim),
            score,
            format_score_bar(score, result.rounded_level),
            format_position_tag(position, use_colors)
        ));
        lines.push(base.to_string());
        if !relative.is_empty() {
            lines.push(relative.to_string());
        }
        lines.push(String::new());
    }

    lines.push(
        "If you play two or three times a week, set aside one session for targeted work on your weakest areas, such as serve plus first ball or baseline depth."
            .to_string(),
    );
    lines.push(
        "Retake the assessment every two to three months to track how each area develops, and share the results with your coach."
            .to_string(),
    );
    lines.push(rule);
    lines.join("\n")
}

/// Tab-separated `dimension score position` rows in canonical order, without headers
pub fn format_dimension_tsv(result: &EvaluateResult) -> String {
    dimensions::canonical_order(result.dimension_scores.keys().map(String::as_str))
        .into_iter()
        .map(|dim| {
            let score = result.dimension_scores[dim];
            let position = RelativePosition::classify(score, result.rounded_level);
            format!("{}\t{:.2}\t{}", dim, score, position.tag())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(result: &EvaluateResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Every question with its options, center levels and caps
pub fn format_question_list(config: &RatingConfig, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for question in &config.questions {
        lines.push(format!(
            "{} [{}, weight {}] {}",
            bold(&question.id, use_colors),
            question.dimension,
            question.weight,
            question.text
        ));
        for option in &question.options {
            let cap = option
                .hard_cap
                .map(|c| format!(", cap {:.1}", c))
                .unwrap_or_default();
            lines.push(format!(
                "  {:<8} {:.1}{}  {}",
                option.id, option.center_level, cap, option.text
            ));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim_end().to_string()
}

/// One line per skipped answer; empty string when every answer was accepted
pub fn format_answer_checks(checks: &[AnswerCheck]) -> String {
    checks
        .iter()
        .filter(|c| c.is_skipped())
        .map(|c| {
            let reason = match c.outcome {
                AnswerOutcome::UnknownQuestion => "unknown question",
                AnswerOutcome::UnknownOption => "unknown option for this question",
                AnswerOutcome::Accepted => "accepted",
            };
            format!("{} = {}: {}", c.question_id, c.option_id, reason)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn ntrp_explanation() -> &'static str {
    "About NTRP ratings:\n\
     - NTRP (National Tennis Rating Program) is a widely used scale for grading tennis ability.\n\
     - Ratings run from 1.0 to 7.0 in steps of 0.5 (with a final step from 6.0 to 7.0).\n\
     - This assessment covers baseline play, serve, return, net play, movement, tactics and match results.\n\
     - Answer honestly for the most accurate result.\n\
     - Use the result to find fair opponents and to choose what to practise next."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bundled_config;
    use crate::scoring::{Answers, Evaluator};

    fn sample_result() -> EvaluateResult {
        let config = bundled_config().unwrap();
        let answers: Answers = [
            ("Q1", "Q1_A3"),
            ("Q2", "Q2_A3"),
            ("Q3", "Q3_A4"),
            ("Q5", "Q5_A5"),
            ("Q6", "Q6_A4"),
            ("Q8", "Q8_A1"),
            ("Q10", "Q10_A3"),
        ]
        .iter()
        .map(|(q, o)| (q.to_string(), o.to_string()))
        .collect();
        Evaluator::new(&config).evaluate(&answers)
    }

    #[test]
    fn test_score_bar_fill() {
        assert_eq!(format_score_bar(1.0, 1.0), format!("[{}]", ".".repeat(20)));
        assert_eq!(format_score_bar(7.0, 7.0), format!("[{}]", "=".repeat(20)));
        assert_eq!(format_score_bar(4.0, 4.0), format!("[{}{}]", "=".repeat(10), ".".repeat(10)));
    }

    #[test]
    fn test_score_bar_glyph_tracks_position() {
        assert!(format_score_bar(5.0, 3.0).contains('#'));
        assert!(format_score_bar(2.0, 4.0).contains('-'));
        assert!(format_score_bar(3.0, 3.0).contains('='));
    }

    #[test]
    fn test_score_bar_clamps_out_of_range() {
        assert_eq!(format_score_bar(0.0, 4.0).len(), 22);
        assert_eq!(format_score_bar(9.0, 4.0).len(), 22);
    }

    #[test]
    fn test_summary_card_contents() {
        let result = sample_result();
        let card = format_summary_card("My rating", &result, false);
        assert!(card.contains("My rating"));
        assert!(card.contains(&format!("NTRP {:.1}", result.rounded_level)));
        assert!(card.contains("Groundstrokes:"));
        assert!(card.contains("Serve & return:"));
        assert!(card.contains("Main strengths: Serve"));
        assert!(!card.contains("Other:"));
    }

    #[test]
    fn test_detailed_result_sections() {
        let result = sample_result();
        let text = format_detailed_result("Report", &result, false);
        assert!(text.contains("Raw score:"));
        assert!(text.contains(result.level_band.description()));
        assert!(text.contains("Your main strengths:"));
        assert!(text.contains("Where to focus first:"));
        assert!(text.contains(dimensions::advantage_tip("serve")));
        assert!(text.contains(dimensions::improvement_tip("net")));
        let baseline = text.find("[Baseline").unwrap();
        let net = text.find("[Net play").unwrap();
        assert!(baseline < net);
    }

    #[test]
    fn test_split_comment_separates_relative_sentence() {
        let comment = format!("Base text.{}", RelativePosition::Weakness.sentence());
        let (base, relative) = split_comment(&comment, RelativePosition::Weakness);
        assert_eq!(base, "Base text.");
        assert!(relative.starts_with("This area is a relative weakness"));
    }

    #[test]
    fn test_simple_result_without_dimensions() {
        let config = bundled_config().unwrap();
        let result = Evaluator::new(&config).evaluate(&Answers::new());
        let text = format_simple_result("Empty", &result, false);
        assert!(text.contains("NTRP level: 4.0 (Advanced club player)"));
        assert!(!text.contains("Strengths:"));
    }

    #[test]
    fn test_dimension_tsv() {
        let result = sample_result();
        let tsv = format_dimension_tsv(&result);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), result.dimension_scores.len());
        assert!(lines[0].starts_with("baseline\t"));
        assert!(lines.iter().all(|l| l.split('\t').count() == 3));
    }

    #[test]
    fn test_json_has_core_fields() {
        let result = sample_result();
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounded_level"], result.rounded_level);
        assert!(value["support_distribution"].as_array().unwrap().len() == 12);
        assert_eq!(value["summary"]["sections"][0]["kind"], "overview");
    }

    #[test]
    fn test_question_list_shows_caps() {
        let config = bundled_config().unwrap();
        let list = format_question_list(&config, false);
        assert!(list.starts_with("Q1 [baseline, weight 1]"));
        assert!(list.contains("Q5_A1    1.5, cap 3.0"));
    }

    #[test]
    fn test_answer_checks_only_lists_skipped() {
        let checks = vec![
            AnswerCheck {
                question_id: "Q1".to_string(),
                option_id: "Q1_A1".to_string(),
                outcome: AnswerOutcome::Accepted,
            },
            AnswerCheck {
                question_id: "Q99".to_string(),
                option_id: "x".to_string(),
                outcome: AnswerOutcome::UnknownQuestion,
            },
        ];
        assert_eq!(format_answer_checks(&checks), "Q99 = x: unknown question");
    }
}
