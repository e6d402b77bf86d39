//! 答题表单状态

use std::collections::HashMap;

use crate::models::{AnswerOption, Question, RecordId, ResponseEntry};

/// 表单阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 正在加载题目（题目加载失败或缺少令牌时停留在此）
    Loading,
    /// 题目已加载，可以作答
    Ready,
    /// 正在提交
    Submitting,
}

/// 表单的可变状态
#[derive(Debug, Default)]
pub(crate) struct FormState {
    pub questions: Vec<Question>,
    pub options: Vec<AnswerOption>,
    /// 题目ID → 答案ID，没有条目表示未作答
    pub selections: HashMap<RecordId, RecordId>,
    /// 本次激活的题目是否已加载成功
    pub questions_loaded: bool,
    /// 激活编号，每次激活或关闭页面加一
    pub generation: u64,
}

impl FormState {
    /// 清空状态并进入下一次激活，返回新的编号
    pub fn reset(&mut self) -> u64 {
        let generation = self.generation + 1;
        *self = FormState {
            generation,
            ..Default::default()
        };
        generation
    }

    pub fn has_question(&self, question_id: &RecordId) -> bool {
        self.questions.iter().any(|q| &q.id == question_id)
    }

    /// 按题目展示顺序生成作答列表，未作答的题目不出现
    pub fn responses(&self) -> Vec<ResponseEntry> {
        self.questions
            .iter()
            .filter_map(|q| {
                self.selections.get(&q.id).map(|answer_id| ResponseEntry {
                    question_id: q.id.clone(),
                    answer_id: answer_id.clone(),
                })
            })
            .collect()
    }

    pub fn snapshot(&self, phase: Phase) -> FormSnapshot {
        FormSnapshot {
            phase,
            questions: self.questions.clone(),
            options: self.options.clone(),
            selections: self.selections.clone(),
        }
    }
}

/// 表单快照（用于展示）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub phase: Phase,
    pub questions: Vec<Question>,
    pub options: Vec<AnswerOption>,
    pub selections: HashMap<RecordId, RecordId>,
}

impl FormSnapshot {
    /// 某道题当前选中的答案
    pub fn selected_option(&self, question_id: &RecordId) -> Option<&AnswerOption> {
        let answer_id = self.selections.get(question_id)?;
        self.options.iter().find(|o| &o.id == answer_id)
    }

    /// 根据答题卡中的键找到对应题目
    pub fn find_question(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id.matches_key(key))
    }

    pub fn unanswered(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| !self.selections.contains_key(&q.id))
            .count()
    }
}
