//! Process-wide `tracing` setup for the binary.
//!
//! The format comes from `--log-format` or `QUIZ_LOG_FORMAT`; filter directives
//! come from `QUIZ_LOG`, then `RUST_LOG`, then default to `info`.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain text, no ANSI colors.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
    /// Multi-line, colored output for development.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(format!(
                "invalid log format: {s:?} (expected text, json or pretty)"
            )),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

/// Resolve filter directives from `QUIZ_LOG` / `RUST_LOG`.
fn directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["QUIZ_LOG", "RUST_LOG"]
        .into_iter()
        .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Logs go to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = env_filter(&directives(|key| std::env::var(key).ok()));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .flatten_event(true)
            .with_target(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_line_number(true)
            .with_file(true)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .try_init(),
    }
}
