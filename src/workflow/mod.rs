pub mod exam_ctx;
pub mod exam_form;
pub mod form_state;

pub use exam_ctx::ExamCtx;
pub use exam_form::{Collaborators, ExamForm, LoadReport, LoadTasks, SubmitReceipt};
pub use form_state::{FormSnapshot, Phase};
