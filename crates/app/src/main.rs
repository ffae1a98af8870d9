mod logging;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::PassPolicy;
use quiz_core::model::Question;
use services::config::parse_threshold;
use services::{AppServices, QuizCatalogService, QuizConfig, QuizSource, SessionFlowService};
use tracing::info;
use ui::{App, UiApp, build_app_context};

use crate::logging::LogFormat;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidThreshold { raw: String },
    InvalidLogFormat(String),
    MissingPublishFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidThreshold { raw } => {
                write!(f, "invalid --threshold value (expected 0..=100): {raw}")
            }
            ArgsError::InvalidLogFormat(message) => write!(f, "{message}"),
            ArgsError::MissingPublishFile => write!(f, "publish requires a quiz JSON file"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<QuizCatalogService> {
        self.services.catalog()
    }

    fn session_flow(&self) -> Arc<SessionFlowService> {
        self.services.session_flow()
    }

    fn pass_policy(&self) -> PassPolicy {
        self.services.pass_policy()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui      [options]");
    eprintln!("  cargo run -p app -- list    [options]");
    eprintln!("  cargo run -p app -- publish <quiz.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dir <path>              Read quiz files from this directory (default: storage-quiz)");
    eprintln!("  --db <sqlite_url>         Read quizzes from SQLite instead of a directory");
    eprintln!("  --threshold <0..=100>     Pass mark in percent (default: 65)");
    eprintln!("  --log-format <format>     text, json or pretty (default: text)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DIR, QUIZ_DB_URL, QUIZ_PASS_THRESHOLD, QUIZ_PUBLISH_URL,");
    eprintln!("  QUIZ_LOG_FORMAT, QUIZ_LOG / RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    List,
    Publish,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "list" => Some(Self::List),
            "publish" => Some(Self::Publish),
            _ => None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    dir: Option<PathBuf>,
    db_url: Option<String>,
    pass_policy: Option<PassPolicy>,
    log_format: Option<LogFormat>,
    publish_file: Option<PathBuf>,
}

impl Args {
    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dir" => {
                    let value = require_value(args, "--dir")?;
                    parsed.dir = Some(PathBuf::from(value));
                }
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = Some(value);
                }
                "--threshold" => {
                    let value = require_value(args, "--threshold")?;
                    let policy = parse_threshold(&value)
                        .map_err(|_| ArgsError::InvalidThreshold { raw: value.clone() })?;
                    parsed.pass_policy = Some(policy);
                }
                "--log-format" => {
                    let value = require_value(args, "--log-format")?;
                    let format = value.parse().map_err(ArgsError::InvalidLogFormat)?;
                    parsed.log_format = Some(format);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other
                    if cmd == Command::Publish
                        && parsed.publish_file.is_none()
                        && !other.starts_with("--") =>
                {
                    parsed.publish_file = Some(PathBuf::from(other));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Publish && parsed.publish_file.is_none() {
            return Err(ArgsError::MissingPublishFile);
        }

        Ok(parsed)
    }

    /// Layer command-line flags over the environment configuration.
    fn apply(&self, mut config: QuizConfig) -> QuizConfig {
        match (&self.db_url, &self.dir) {
            (Some(url), _) => config.source = QuizSource::Sqlite(url.clone()),
            (None, Some(dir)) => config.source = QuizSource::JsonDir(dir.clone()),
            (None, None) => {}
        }
        if let Some(policy) = self.pass_policy {
            config.pass_policy = policy;
        }
        if let QuizSource::Sqlite(url) = &config.source {
            config.source = QuizSource::Sqlite(normalize_sqlite_url(url.clone()));
        }
        config
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Accept either a bare question array or an object with a `questions` field.
fn parse_publish_input(raw: &str) -> Result<Vec<Question>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Object(mut object) => {
            let questions = object
                .remove("questions")
                .unwrap_or(serde_json::Value::Array(Vec::new()));
            serde_json::from_value(questions)
        }
        other => serde_json::from_value(other),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let log_format = match parsed.log_format {
        Some(format) => format,
        None => std::env::var("QUIZ_LOG_FORMAT")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.parse::<LogFormat>())
            .transpose()
            .map_err(ArgsError::InvalidLogFormat)?
            .unwrap_or_default(),
    };
    logging::init(log_format).map_err(|e| e.to_string())?;

    let config = parsed.apply(QuizConfig::from_env()?);
    if let QuizSource::Sqlite(url) = &config.source {
        // Open + migrate SQLite at startup. Keep this in the binary glue so services stay pure.
        prepare_sqlite_file(url)?;
    }
    info!(source = ?config.source, threshold = config.pass_policy.threshold(), "starting");

    let services = AppServices::from_config(&config).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Master")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::List => {
            let headers = services.catalog().list_headers().await;
            if headers.is_empty() {
                println!("No saved quizzes.");
            }
            for header in headers {
                println!(
                    "{}\t{}\t{} question(s)",
                    header.id,
                    header.timestamp.to_rfc3339(),
                    header.question_count
                );
            }
            Ok(())
        }
        Command::Publish => {
            let path = parsed.publish_file.ok_or(ArgsError::MissingPublishFile)?;
            let raw = tokio::fs::read_to_string(&path).await?;
            let questions = parse_publish_input(&raw)?;
            let id = services.publisher().publish(&questions).await?;
            println!("Published {} question(s) as {id}", questions.len());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
