//! 考试上下文
//!
//! 封装"我正在作答哪一场考试"这一信息

use std::fmt::Display;

use crate::models::RecordId;

/// 考试上下文
#[derive(Debug, Clone)]
pub struct ExamCtx {
    /// 考试ID（由上一个页面传入）
    pub exam_id: RecordId,
}

impl ExamCtx {
    pub fn new(exam_id: impl Into<RecordId>) -> Self {
        Self {
            exam_id: exam_id.into(),
        }
    }
}

impl Display for ExamCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[考试 ID#{}]", self.exam_id)
    }
}
