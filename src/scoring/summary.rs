use serde::Serialize;
use std::collections::BTreeMap;

use super::comments::first_sentence;
use super::dimensions;

/// A dimension called out as an advantage or weakness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightEntry {
    pub dimension: String,
    pub name: String,
    pub score: f64,
    /// First sentence of the dimension comment
    pub headline: String,
}

/// Full comment for one dimension in the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub dimension: String,
    pub name: String,
    pub score: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummarySection {
    Overview { rounded_level: f64, label: String },
    Advantages { entries: Vec<HighlightEntry> },
    Weaknesses { entries: Vec<HighlightEntry> },
    Breakdown { entries: Vec<BreakdownEntry> },
}

/// Ordered summary sections: overview, advantages, weaknesses, breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub sections: Vec<SummarySection>,
}

impl Summary {
    pub fn build(
        rounded_level: f64,
        label: &str,
        scores: &BTreeMap<String, f64>,
        comments: &BTreeMap<String, String>,
        advantages: &[String],
        weaknesses: &[String],
    ) -> Self {
        let mut sections = vec![SummarySection::Overview {
            rounded_level,
            label: label.to_string(),
        }];

        if !advantages.is_empty() {
            sections.push(SummarySection::Advantages {
                entries: highlights(advantages, scores, comments),
            });
        }
        if !weaknesses.is_empty() {
            sections.push(SummarySection::Weaknesses {
                entries: highlights(weaknesses, scores, comments),
            });
        }

        let entries = dimensions::canonical_order(scores.keys().map(String::as_str))
            .into_iter()
            .map(|dim| BreakdownEntry {
                dimension: dim.to_string(),
                name: dimensions::display_name(dim).to_string(),
                score: scores.get(dim).copied().unwrap_or(0.0),
                comment: comments.get(dim).cloned().unwrap_or_default(),
            })
            .collect();
        sections.push(SummarySection::Breakdown { entries });

        Self { sections }
    }

    /// Render to plain text. Blank lines separate sections; no trailing whitespace.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for section in &self.sections {
            match section {
                SummarySection::Overview {
                    rounded_level,
                    label,
                } => {
                    lines.push(format!(
                        "Overall, your current level is about NTRP {:.1} ({}).",
                        rounded_level, label
                    ));
                    lines.push(String::new());
                }
                SummarySection::Advantages { entries } => {
                    lines.push("Your main strengths:".to_string());
                    lines.extend(entries.iter().map(highlight_line));
                    lines.push(String::new());
                }
                SummarySection::Weaknesses { entries } => {
                    lines.push("Where to focus first:".to_string());
                    lines.extend(entries.iter().map(highlight_line));
                    lines.push(
                        "If you only want to focus on a few things, put your practice time into the 2-3 areas above."
                            .to_string(),
                    );
                    lines.push(String::new());
                }
                SummarySection::Breakdown { entries } => {
                    lines.push("Dimension-by-dimension assessment:".to_string());
                    lines.push(String::new());
                    for entry in entries {
                        lines.push(format!("[{} (about {:.1})]", entry.name, entry.score));
                        lines.push(entry.comment.clone());
                        lines.push(String::new());
                    }
                }
            }
        }

        lines.join("\n").trim().to_string()
    }
}

fn highlights(
    dims: &[String],
    scores: &BTreeMap<String, f64>,
    comments: &BTreeMap<String, String>,
) -> Vec<HighlightEntry> {
    dims.iter()
        .map(|dim| HighlightEntry {
            dimension: dim.clone(),
            name: dimensions::display_name(dim).to_string(),
            score: scores.get(dim).copied().unwrap_or(0.0),
            headline: comments
                .get(dim)
                .map(|c| first_sentence(c).to_string())
                .unwrap_or_default(),
        })
        .collect()
}

fn highlight_line(entry: &HighlightEntry) -> String {
    format!("- {} (about {:.1}): {}", entry.name, entry.score, entry.headline)
}
