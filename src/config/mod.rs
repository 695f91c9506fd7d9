mod bundled;
mod cache;
mod init;
mod schema;

pub use bundled::{bundled_config, BUNDLED_QUESTIONS, BUNDLED_SUGGESTIONS};
pub use cache::ConfigCache;
pub use init::{write_bundled_config, InitOutcome};
pub use schema::{into_rating_config, QuestionsDocument, SuggestionsDocument};

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::scoring::{validate_config, RatingConfig};

/// Base names of the two config documents.
pub const QUESTIONS_STEM: &str = "questions";
pub const SUGGESTIONS_STEM: &str = "suggestions";

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration:\n  - {}", errors.join("\n  - "))]
    Invalid { errors: Vec<String> },

    #[error("bundled questionnaire is broken: {message}")]
    Bundled { message: String },

    #[error("could not determine home directory")]
    NoHomeDir,
}

/// Get the config directory path (~/.config/ntrp-rater/)
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("ntrp-rater"))
}

/// Find `<stem>.yaml`, `<stem>.yml` or `<stem>.json` in `dir`, in that order.
pub fn find_document(dir: &Path, stem: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", stem, ext)))
        .find(|p| p.is_file())
}

/// Parse a document, choosing JSON or YAML by file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_saphyr::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Load and validate both documents from `dir`.
///
/// The questions document is required; a missing suggestions document means
/// every dimension uses the generic comment.
pub fn load_from_dir(dir: &Path) -> Result<RatingConfig, ConfigError> {
    let questions_path =
        find_document(dir, QUESTIONS_STEM).ok_or_else(|| ConfigError::NotFound {
            path: dir.join(format!("{}.yaml", QUESTIONS_STEM)),
        })?;
    let questions: QuestionsDocument = load_document(&questions_path)?;

    let suggestions = match find_document(dir, SUGGESTIONS_STEM) {
        Some(path) => load_document(&path)?,
        None => {
            debug!(dir = %dir.display(), "no suggestions document, using generic comments");
            SuggestionsDocument::default()
        }
    };

    let config = into_rating_config(questions, suggestions);
    validate_config(&config).map_err(|errors| ConfigError::Invalid { errors })?;

    debug!(
        path = %questions_path.display(),
        questions = config.questions.len(),
        dimensions = config.suggestions.len(),
        "loaded rating config"
    );
    Ok(config)
}

/// Load the rating configuration.
///
/// # Arguments
///
/// * `dir` - Optional config directory. If None, uses ~/.config/ntrp-rater/
///   and falls back to the bundled questionnaire when it holds no questions.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit directory has no questions document
/// - A document cannot be read or parsed
/// - The loaded config fails validation
pub fn load_config(dir: Option<PathBuf>) -> Result<RatingConfig, ConfigError> {
    match dir {
        Some(dir) => load_from_dir(&dir),
        None => {
            let default_dir = get_config_dir()?;
            if find_document(&default_dir, QUESTIONS_STEM).is_some() {
                load_from_dir(&default_dir)
            } else {
                info!("no questionnaire in {}, using the bundled one", default_dir.display());
                bundled_config()
            }
        }
    }
}
