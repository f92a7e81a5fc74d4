//! Structured logging and secret redaction utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper to keep the
//! upstream API key out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

const SECRET_PATTERNS: &[(&str, &str)] = &[
    ("Bearer ", "[REDACTED_BEARER_TOKEN]"),
    ("sk-", "[REDACTED_API_KEY]"),
];

/// Sanitizes API credentials from log messages.
///
/// Every OpenAI-style key (`sk-...`) and every bearer token value is replaced
/// with a placeholder. Provider error bodies sometimes echo a truncated key
/// back, so they pass through here before being logged.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    for (prefix, placeholder) in SECRET_PATTERNS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(prefix) {
            let start = search_from + found;
            // Only match at a word boundary ("task-id" is not a key)
            if result[..start].chars().last().is_some_and(|c| c.is_alphanumeric()) {
                search_from = start + prefix.len();
                continue;
            }
            let value_start = if *prefix == "Bearer " { start + prefix.len() } else { start };
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
                .map(|i| value_start + i)
                .unwrap_or(result.len());

            if end == value_start {
                search_from = value_start;
                continue;
            }

            result.replace_range(value_start..end, placeholder);
            search_from = value_start + placeholder.len();
        }
    }

    result
}
