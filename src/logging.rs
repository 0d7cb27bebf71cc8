//! # Logging
//!
//! Structured logging via `tracing` and `tracing-subscriber`.
//!
//! ## Environment Variables
//!
//! - `GOODAY_LOG_LEVEL`: `trace` / `debug` / `info` / `warn` / `error` (default `info`)
//! - `GOODAY_LOG_FORMAT`: `json` (default) or `pretty`
//! - `GOODAY_LOG_TARGETS`: extra comma-separated filter directives, e.g. `gooday::router=debug`
//! - `RUST_LOG`: when set, replaces the level above entirely

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Comma-separated filter directives
    pub target_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            target_filter: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("GOODAY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("GOODAY_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("GOODAY_LOG_TARGETS").ok().filter(|s| !s.is_empty()),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',').map(str::trim) {
                if filter.is_empty() {
                    continue;
                }
                match filter.parse::<Directive>() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Json);
    }

    #[test]
    fn test_level_falls_back_to_info() {
        let config = LogConfig {
            log_level: "loud".into(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::INFO);
        let config = LogConfig {
            log_level: "DEBUG".into(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::DEBUG);
    }
}
