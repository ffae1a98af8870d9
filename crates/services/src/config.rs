use std::path::PathBuf;

use quiz_core::PassPolicy;

use crate::error::ConfigError;
use crate::publish_service::PublishConfig;

pub const DEFAULT_QUIZ_DIR: &str = "storage-quiz";

/// Where the quiz collection is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizSource {
    JsonDir(PathBuf),
    Sqlite(String),
}

impl Default for QuizSource {
    fn default() -> Self {
        Self::JsonDir(PathBuf::from(DEFAULT_QUIZ_DIR))
    }
}

/// Runtime settings gathered from the environment.
///
/// The binary layers its command-line flags on top of this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizConfig {
    pub source: QuizSource,
    pub pass_policy: PassPolicy,
    pub publish: Option<PublishConfig>,
}

impl QuizConfig {
    /// Read `QUIZ_DIR`, `QUIZ_DB_URL`, `QUIZ_PASS_THRESHOLD` and `QUIZ_PUBLISH_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the pass threshold is not a number in `0..=100`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`QuizConfig::from_env`] with an injectable variable lookup.
    ///
    /// A database URL wins over a directory when both are set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the pass threshold is not a number in `0..=100`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let source = match (non_blank("QUIZ_DB_URL"), non_blank("QUIZ_DIR")) {
            (Some(url), _) => QuizSource::Sqlite(url),
            (None, Some(dir)) => QuizSource::JsonDir(PathBuf::from(dir)),
            (None, None) => QuizSource::default(),
        };

        let pass_policy = match non_blank("QUIZ_PASS_THRESHOLD") {
            Some(raw) => parse_threshold(&raw)?,
            None => PassPolicy::default(),
        };

        let publish = non_blank("QUIZ_PUBLISH_URL")
            .as_deref()
            .and_then(PublishConfig::from_base_url);

        Ok(Self {
            source,
            pass_policy,
            publish,
        })
    }
}

/// Parse a pass threshold such as `65`.
///
/// # Errors
///
/// Returns `ConfigError` for non-numeric input or values above 100.
pub fn parse_threshold(raw: &str) -> Result<PassPolicy, ConfigError> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidValue {
            key: "QUIZ_PASS_THRESHOLD",
            raw: raw.to_string(),
        })?;
    Ok(PassPolicy::new(value)?)
}
