pub mod toml_loader;

pub use toml_loader::{
    load_answer_sheet, load_answer_sheet_or_default, parse_answer_sheet, AnswerSheet,
};
