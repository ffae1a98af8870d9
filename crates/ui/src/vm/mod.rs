mod header_vm;
mod markdown_vm;
mod question_vm;
mod results_vm;
mod time_fmt;

pub use header_vm::{QuizHeaderVm, map_quiz_headers};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use question_vm::{OptionState, OptionVm, QuestionVm, map_question, option_label};
pub use results_vm::{ResultsVm, map_results};
pub use time_fmt::format_datetime;
