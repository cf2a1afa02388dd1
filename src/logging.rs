/// Structured logging setup using tracing
///
/// Writes to stderr ONLY (never stdout): the CLI prints ranked documents as JSON on stdout.
/// The line format follows `log_format`; `auto` picks ANSI text on a terminal and
/// JSON when stderr is piped into another process.

use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use crate::config::Config;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Text on a terminal, JSON otherwise
    #[default]
    Auto,
    Text,
    Json,
}

impl LogFormat {
    pub fn emits_json(self, stderr_is_terminal: bool) -> bool {
        match self {
            LogFormat::Auto => !stderr_is_terminal,
            LogFormat::Text => false,
            LogFormat::Json => true,
        }
    }
}

/// Initialize tracing subscriber with stderr-only output
///
/// Log level from config.log_level (default: info)
/// RUST_LOG env var can override at runtime
pub fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stderr_is_terminal = std::io::stderr().is_terminal();

    if config.log_format.emits_json(stderr_is_terminal) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(stderr_is_terminal)
            )
            .init();
    }
}
