pub mod comments;
pub mod config;
pub mod dimensions;
pub mod engine;
pub mod levels;
pub mod summary;
pub mod validation;

pub use comments::RelativePosition;
pub use config::*;
pub use engine::{EvaluateResult, Evaluator, LevelSupport, DEFAULT_TOP_K};
pub use levels::{LevelBand, DEFAULT_SPREAD, LEVELS};
pub use summary::{Summary, SummarySection};
pub use validation::{check_answers, missing_questions, validate_config, AnswerCheck, AnswerOutcome};
