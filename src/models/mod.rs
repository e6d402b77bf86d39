pub mod loaders;
pub mod question;
pub mod submission;

pub use loaders::{load_answer_sheet, load_answer_sheet_or_default, AnswerSheet};
pub use question::{AnswerOption, Question, RecordId};
pub use submission::{ResponseEntry, SubmissionPayload};
