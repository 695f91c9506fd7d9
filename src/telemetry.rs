use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Env var checked before `RUST_LOG`.
pub const LOG_ENV: &str = "NTRP_LOG";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Filter directive used when neither env var is set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Resolve the filter string: `NTRP_LOG`, then `RUST_LOG`, then the verbosity default.
pub fn filter_directive(ntrp_log: Option<String>, rust_log: Option<String>, verbose: bool) -> String {
    ntrp_log
        .or(rust_log)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default_directive(verbose).to_string())
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean.
pub fn init(verbose: bool) -> Result<(), TelemetryError> {
    let directive = filter_directive(
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
        verbose,
    );
    let env_filter = EnvFilter::try_new(&directive).map_err(|source| TelemetryError::EnvFilter {
        value: directive.clone(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(
            filter_directive(Some("trace".into()), Some("info".into()), false),
            "trace"
        );
        assert_eq!(filter_directive(None, Some("info".into()), true), "info");
        assert_eq!(filter_directive(None, None, true), "debug");
        assert_eq!(filter_directive(None, None, false), "warn");
    }

    #[test]
    fn test_blank_env_uses_default() {
        assert_eq!(filter_directive(Some("  ".into()), None, false), "warn");
    }
}
