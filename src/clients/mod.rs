pub mod exam_client;

pub use exam_client::{ExamApiClient, ExamGateway};
