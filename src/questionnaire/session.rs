use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

use super::demo::DEMO_CASES;
use super::prompt::{prompt_choice, prompt_yes_no, Choice};
use crate::config::ConfigCache;
use crate::output::{format_detailed_result, format_simple_result, format_summary_card, ntrp_explanation};
use crate::scoring::dimensions::display_name;
use crate::scoring::{missing_questions, Answers, Evaluator, RatingConfig, DEFAULT_SPREAD, DEFAULT_TOP_K};

const MENU_ENTRIES: [&str; 4] = [
    "Take the questionnaire",
    "Run the demo cases",
    "About NTRP ratings",
    "Quit",
];

/// Evaluation and display settings for an interactive session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub spread: f64,
    pub top_k: usize,
    pub use_colors: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            spread: DEFAULT_SPREAD,
            top_k: DEFAULT_TOP_K,
            use_colors: false,
        }
    }
}

/// Ask every question in config order and collect the picked option ids.
///
/// An empty line skips a question. End of input stops early and returns
/// what was answered so far.
pub fn run_questionnaire<R: BufRead, W: Write>(
    config: &RatingConfig,
    input: &mut R,
    output: &mut W,
) -> Result<Answers> {
    let mut answers = Answers::new();
    let total = config.questions.len();

    for (i, question) in config.questions.iter().enumerate() {
        writeln!(output).context("Failed to write question")?;
        writeln!(
            output,
            "[{}/{}] {}",
            i + 1,
            total,
            display_name(&question.dimension)
        )
        .context("Failed to write question")?;
        writeln!(output, "{}", question.text).context("Failed to write question")?;
        for (n, option) in question.options.iter().enumerate() {
            writeln!(output, "  {}. {}", n + 1, option.text).context("Failed to write question")?;
        }

        let message = format!("Your choice (1-{}, Enter to skip): ", question.options.len());
        match prompt_choice(input, output, &message, question.options.len(), true)? {
            Choice::Picked(idx) => {
                answers.insert(question.id.clone(), question.options[idx].id.clone());
            }
            Choice::Skipped => debug!(question = %question.id, "question skipped"),
            Choice::EndOfInput => {
                debug!(answered = answers.len(), "input closed mid-questionnaire");
                break;
            }
        }
    }

    Ok(answers)
}

/// Main menu loop. Returns when the user quits or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    cache: &ConfigCache,
    options: SessionOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output).context("Failed to write menu")?;
        writeln!(output, "NTRP self-assessment").context("Failed to write menu")?;
        for (n, entry) in MENU_ENTRIES.iter().enumerate() {
            writeln!(output, "  {}. {}", n + 1, entry).context("Failed to write menu")?;
        }

        let message = format!("Choose [1-{}]: ", MENU_ENTRIES.len());
        match prompt_choice(input, output, &message, MENU_ENTRIES.len(), false)? {
            Choice::Picked(0) => take_questionnaire(cache, options, input, output)?,
            Choice::Picked(1) => show_demo_cases(cache, options, output)?,
            Choice::Picked(2) => {
                writeln!(output, "{}", ntrp_explanation()).context("Failed to write explanation")?
            }
            Choice::Picked(_) | Choice::EndOfInput => break,
            Choice::Skipped => continue,
        }
    }
    writeln!(output, "Goodbye!").context("Failed to write menu")?;
    Ok(())
}

fn take_questionnaire<R: BufRead, W: Write>(
    cache: &ConfigCache,
    options: SessionOptions,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let config = cache.get()?;
    let answers = run_questionnaire(&config, input, output)?;

    let missing = missing_questions(&config, &answers);
    if !missing.is_empty() {
        writeln!(
            output,
            "\n{} of {} questions skipped; the estimate uses the rest.",
            missing.len(),
            config.questions.len()
        )
        .context("Failed to write result")?;
    }

    let result = Evaluator::new(&config)
        .with_spread(options.spread)
        .with_top_k(options.top_k)
        .evaluate(&answers);

    writeln!(output).context("Failed to write result")?;
    writeln!(
        output,
        "{}",
        format_summary_card("Your NTRP estimate", &result, options.use_colors)
    )
    .context("Failed to write result")?;

    if prompt_yes_no(input, output, "Show the detailed report?", true)? {
        writeln!(
            output,
            "{}",
            format_detailed_result("Detailed NTRP report", &result, options.use_colors)
        )
        .context("Failed to write result")?;
    }
    Ok(())
}

fn show_demo_cases<W: Write>(cache: &ConfigCache, options: SessionOptions, output: &mut W) -> Result<()> {
    let config = cache.get()?;
    let evaluator = Evaluator::new(&config)
        .with_spread(options.spread)
        .with_top_k(options.top_k);

    for case in DEMO_CASES.iter() {
        let result = evaluator.evaluate(&case.answers(&config));
        let title = format!("Demo: {} ({})", case.name, case.description);
        writeln!(output).context("Failed to write demo")?;
        writeln!(output, "{}", format_simple_result(&title, &result, options.use_colors))
            .context("Failed to write demo")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bundled_config;
    use std::io::Cursor;

    fn bundled_cache() -> ConfigCache {
        ConfigCache::with_loader(bundled_config)
    }

    #[test]
    fn test_questionnaire_records_picks_and_skips() {
        let config = bundled_config().unwrap();
        // Q1 picks option 2, Q2 is skipped, Q3 gets an invalid entry first
        let mut input = Cursor::new("2\n\nabc\n4\n");
        let mut output = Vec::new();

        let answers = run_questionnaire(&config, &mut input, &mut output).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers["Q1"], "Q1_A2");
        assert!(!answers.contains_key("Q2"));
        assert_eq!(answers["Q3"], "Q3_A4");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("[1/12] Baseline (consistency + depth)"));
        assert!(text.contains("Please enter a number between 1 and 5."));
    }

    #[test]
    fn test_full_questionnaire_answers_everything() {
        let config = bundled_config().unwrap();
        let mut input = Cursor::new("1\n".repeat(config.questions.len()));
        let mut output = Vec::new();

        let answers = run_questionnaire(&config, &mut input, &mut output).unwrap();
        assert!(missing_questions(&config, &answers).is_empty());
    }

    #[test]
    fn test_menu_quits_on_eof() {
        let cache = bundled_cache();
        let mut output = Vec::new();
        run_menu(&cache, SessionOptions::default(), &mut Cursor::new(""), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1. Take the questionnaire"));
        assert!(text.ends_with("Goodbye!\n"));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn test_menu_explanation_then_quit() {
        let cache = bundled_cache();
        let mut output = Vec::new();
        run_menu(&cache, SessionOptions::default(), &mut Cursor::new("3\n4\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("About NTRP ratings:"));
    }

    #[test]
    fn test_menu_demo_cases() {
        let cache = bundled_cache();
        let mut output = Vec::new();
        run_menu(&cache, SessionOptions::default(), &mut Cursor::new("2\n4\n"), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        for case in DEMO_CASES.iter() {
            assert!(text.contains(&format!("Demo: {}", case.name)));
        }
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_menu_questionnaire_with_detailed_report() {
        let cache = bundled_cache();
        let mut script = "1\n".to_string();
        script.push_str(&"3\n".repeat(12));
        script.push_str("y\n4\n");
        let mut output = Vec::new();

        run_menu(&cache, SessionOptions::default(), &mut Cursor::new(script), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Your NTRP estimate"));
        assert!(text.contains("Detailed NTRP report"));
        assert!(!text.contains("questions skipped"));
    }
}
