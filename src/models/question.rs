use serde::{Deserialize, Serialize};
use std::fmt;

/// 记录ID
///
/// 服务端的 ID 可能是字符串也可能是整数，原样保存，提交时原样回传
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// 解析页面参数：纯数字按整数处理，其他按字符串处理
    pub fn parse_param(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(trimmed.to_string()),
        }
    }

    /// 判断是否与 TOML 表中的键对应（TOML 的键总是字符串）
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            RecordId::Number(n) => key.trim().parse::<i64>().map_or(false, |k| k == *n),
            RecordId::Text(s) => s == key,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

/// 题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: RecordId,
    pub question_text: String,
}

/// 答案选项
///
/// 选项不按题目划分，每道题都展示全部选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub id: RecordId,
    pub answer_text: String,
}
