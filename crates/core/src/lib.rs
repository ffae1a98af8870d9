#![forbid(unsafe_code)]

pub mod model;
pub mod scoring;
pub mod session;
pub mod time;

pub use scoring::{PassPolicy, ReviewItem, ScoreReport};
pub use session::{Advance, AnswerOutcome, AnswerRecord, Mode, Session, SessionError};
pub use time::Clock;
