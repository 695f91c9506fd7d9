use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ntrp_rater::config::{ConfigCache, ConfigError, InitOutcome};
use ntrp_rater::output;
use ntrp_rater::questionnaire::{self, SessionOptions, DEMO_CASES};
use ntrp_rater::scoring::{
    check_answers, Answers, EvaluateResult, Evaluator, RatingConfig, DEFAULT_SPREAD, DEFAULT_TOP_K,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    /// Compact card with grouped dimension scores
    #[default]
    Card,
    /// Full report with per-dimension comments and tips
    Detail,
    /// Level, strengths and focus areas only
    Simple,
    /// The complete evaluation result as JSON
    Json,
    /// dimension, score, position rows
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive menu (default if no subcommand)
    Ask,
    /// Evaluate an answers file mapping question ids to option ids
    Evaluate {
        /// YAML or JSON answers file
        #[arg(short, long)]
        answers: PathBuf,
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
        /// Reject answers with unknown question or option ids
        #[arg(long)]
        strict: bool,
    },
    /// Evaluate the built-in beginner, intermediate and advanced answer sets
    Demo {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Validate the questionnaire and suggestion documents
    Validate,
    /// List configured questions and their options
    Questions,
    /// Write the bundled questionnaire into the config directory
    Init {
        /// Overwrite existing documents
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "ntrp-rater")]
#[command(about = "Estimate your tennis NTRP level from a skill questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding questions.yaml and suggestions.yaml (defaults to ~/.config/ntrp-rater/)
    #[arg(short, long = "config-dir", global = true)]
    config_dir: Option<PathBuf>,

    /// Width of each answer's triangular support around its center level
    #[arg(long, global = true, default_value_t = DEFAULT_SPREAD)]
    spread: f64,

    /// How many strengths and focus areas to report
    #[arg(long = "top-k", global = true, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = ntrp_rater::telemetry::init(cli.verbose) {
        eprintln!("Logging setup failed: {}", e);
    }

    if !cli.spread.is_finite() || cli.spread <= 0.0 {
        eprintln!("--spread must be a positive number, got {}", cli.spread);
        std::process::exit(EXIT_INPUT);
    }

    let command = cli.command.unwrap_or(Commands::Ask);
    let cache = ConfigCache::new(cli.config_dir.clone());
    let use_colors = output::should_use_colors();

    match command {
        Commands::Ask => {
            let options = SessionOptions {
                spread: cli.spread,
                top_k: cli.top_k,
                use_colors,
            };
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            if let Err(e) = questionnaire::run_menu(&cache, options, &mut input, &mut out) {
                match e.downcast_ref::<ConfigError>() {
                    Some(config_err) => exit_config_error(config_err),
                    None => {
                        eprintln!("Error: {:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            }
        }
        Commands::Evaluate {
            answers,
            format,
            strict,
        } => {
            let config = load_or_exit(&cache);
            let answers = match load_answers(&answers) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Answers error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let checks = check_answers(&config, &answers);
            if checks.iter().any(|c| c.is_skipped()) {
                let report = output::format_answer_checks(&checks);
                if strict {
                    eprintln!("Rejected answers:");
                    eprintln!("{}", report);
                    std::process::exit(EXIT_INPUT);
                }
                tracing::warn!("ignoring answers:\n{}", report);
            }

            let result = evaluator(&config, cli.spread, cli.top_k).evaluate(&answers);
            print_result("Your NTRP estimate", &result, format, use_colors);
        }
        Commands::Demo { format } => {
            let config = load_or_exit(&cache);
            let evaluator = evaluator(&config, cli.spread, cli.top_k);
            let results: Vec<(String, EvaluateResult)> = DEMO_CASES
                .iter()
                .map(|case| {
                    let title = format!("Demo: {} ({})", case.name, case.description);
                    (title, evaluator.evaluate(&case.answers(&config)))
                })
                .collect();

            match format {
                OutputFormat::Json => {
                    let cases: Vec<serde_json::Value> = DEMO_CASES
                        .iter()
                        .zip(&results)
                        .map(|(case, (_, result))| {
                            serde_json::json!({ "name": case.name, "result": result })
                        })
                        .collect();
                    match serde_json::to_string_pretty(&cases) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Failed to encode results: {}", e);
                            std::process::exit(EXIT_IO);
                        }
                    }
                }
                OutputFormat::Tsv => {
                    for (case, (_, result)) in DEMO_CASES.iter().zip(&results) {
                        for row in output::format_dimension_tsv(result).lines() {
                            println!("{}\t{}", case.name.to_lowercase(), row);
                        }
                    }
                }
                _ => {
                    for (title, result) in &results {
                        print_result(title, result, format, use_colors);
                        println!();
                    }
                }
            }
        }
        Commands::Validate => {
            let config = load_or_exit(&cache);
            println!(
                "Config OK: {} questions, suggestion rules for {} dimensions",
                config.questions.len(),
                config.suggestions.len()
            );
        }
        Commands::Questions => {
            let config = load_or_exit(&cache);
            println!("{}", output::format_question_list(&config, use_colors));
        }
        Commands::Init { force } => {
            let dir = match cli.config_dir.clone() {
                Some(dir) => dir,
                None => match ntrp_rater::config::get_config_dir() {
                    Ok(dir) => dir,
                    Err(e) => exit_config_error(&e),
                },
            };
            match ntrp_rater::config::write_bundled_config(&dir, force) {
                Ok(InitOutcome::Written {
                    questions,
                    suggestions,
                }) => {
                    println!("Wrote {}", questions.display());
                    println!("Wrote {}", suggestions.display());
                }
                Ok(InitOutcome::AlreadyExists { path }) => {
                    eprintln!("{} already exists. Use --force to overwrite.", path.display());
                    std::process::exit(EXIT_CONFIG);
                }
                Err(e) => {
                    eprintln!("Init failed: {:#}", e);
                    std::process::exit(EXIT_IO);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn exit_config_error(e: &ConfigError) -> ! {
    eprintln!("Config error: {}", e);
    let code = match e {
        ConfigError::Read { .. } => EXIT_IO,
        _ => EXIT_CONFIG,
    };
    std::process::exit(code);
}

fn load_or_exit(cache: &ConfigCache) -> Arc<RatingConfig> {
    match cache.get() {
        Ok(config) => config,
        Err(e) => exit_config_error(&e),
    }
}

fn evaluator(config: &RatingConfig, spread: f64, top_k: usize) -> Evaluator<'_> {
    Evaluator::new(config).with_spread(spread).with_top_k(top_k)
}

/// Answers file: a YAML or JSON map of question id to option id.
fn load_answers(path: &Path) -> Result<Answers, ConfigError> {
    ntrp_rater::config::load_document(path)
}

fn print_result(title: &str, result: &EvaluateResult, format: OutputFormat, use_colors: bool) {
    match format {
        OutputFormat::Card => println!("{}", output::format_summary_card(title, result, use_colors)),
        OutputFormat::Detail => {
            println!("{}", output::format_detailed_result(title, result, use_colors))
        }
        OutputFormat::Simple => println!("{}", output::format_simple_result(title, result, use_colors)),
        OutputFormat::Json => match output::format_json(result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode result: {}", e);
                std::process::exit(EXIT_IO);
            }
        },
        OutputFormat::Tsv => println!("{}", output::format_dimension_tsv(result)),
    }
}
