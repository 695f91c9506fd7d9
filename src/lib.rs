pub mod config;
pub mod output;
pub mod questionnaire;
pub mod scoring;
pub mod telemetry;
