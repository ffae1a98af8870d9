use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{Question, QuestionError, QuestionId, QuizFile, QuizId};
use storage::json_dir::JsonDirStore;
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    dir: Option<PathBuf>,
    quiz_id: QuizId,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidQuizId { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidQuizId { raw } => write!(f, "invalid --quiz-id value: {raw:?}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .unwrap_or_else(|_| "sqlite:quizzes.sqlite3?mode=rwc".into());
        let mut dir = std::env::var("QUIZ_DIR").ok().map(PathBuf::from);
        let mut quiz_id = QuizId::new("sample-java-core");
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--dir" => {
                    let value = require_value(&mut args, "--dir")?;
                    dir = Some(PathBuf::from(value));
                }
                "--sample" => {
                    dir = None;
                }
                "--quiz-id" => {
                    let value = require_value(&mut args, "--quiz-id")?;
                    quiz_id = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidQuizId { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            dir,
            quiz_id,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:quizzes.sqlite3?mode=rwc)");
    eprintln!("  --dir <path>              Import every *.json quiz file from this directory");
    eprintln!("  --sample                  Seed the built-in sample quiz (default without --dir)");
    eprintln!("  --quiz-id <id>            Id for the sample quiz (default: sample-java-core)");
    eprintln!("  --now <rfc3339>           Fixed timestamp for the sample quiz");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_DB_URL, QUIZ_DIR");
}

fn sample_questions() -> Vec<Question> {
    let samples: [(&str, Option<&str>, [&str; 4], usize, &str); 4] = [
        (
            "Which keyword prevents a class from being subclassed?",
            None,
            ["static", "final", "abstract", "private"],
            1,
            "A `final` class cannot be extended.",
        ),
        (
            "What does this print?",
            Some("String s = \"a\";\ns += 1 + 2;\nSystem.out.println(s);"),
            ["a3", "a12", "3a", "Compilation error"],
            0,
            "`1 + 2` is evaluated first, then appended: `a3`.",
        ),
        (
            "Which collection keeps insertion order and rejects duplicates?",
            None,
            ["HashSet", "TreeSet", "LinkedHashSet", "ArrayList"],
            2,
            "`LinkedHashSet` is a `Set` backed by a linked hash table.",
        ),
        (
            "What is the default value of an uninitialized `int` field?",
            None,
            ["null", "0", "undefined", "-1"],
            1,
            "Numeric fields default to zero.",
        ),
    ];

    samples
        .into_iter()
        .zip(1_u64..)
        .map(|((prompt, code, options, correct_answer, explanation), id)| Question {
            id: QuestionId::new(id),
            prompt: prompt.to_string(),
            code: code.map(str::to_string),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct_answer,
            explanation: explanation.to_string(),
        })
        .collect()
}

/// Check every question of every quiz before anything is written, so a bad
/// file never leaves a partial import behind.
fn validate_all(quizzes: &[QuizFile]) -> Result<(), QuestionError> {
    quizzes
        .iter()
        .flat_map(|quiz| quiz.questions.iter())
        .try_for_each(Question::validate)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let clock = args.now.map_or_else(Clock::default_clock, Clock::fixed);

    let quizzes = match &args.dir {
        Some(dir) => JsonDirStore::new(dir).load_all().await?,
        None => vec![QuizFile::new(
            args.quiz_id.clone(),
            clock.now(),
            sample_questions(),
        )],
    };

    validate_all(&quizzes)?;
    for quiz in &quizzes {
        storage.writer.save_quiz(quiz).await?;
    }

    println!("Seeded {} quiz file(s) into {}", quizzes.len(), args.db_url);

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
