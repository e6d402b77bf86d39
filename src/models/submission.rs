use serde::{Deserialize, Serialize};

use super::question::RecordId;

/// 单道题的作答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub question_id: RecordId,
    pub answer_id: RecordId,
}

/// 提交到 `/user-answers` 的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub exam_id: RecordId,
    pub responses: Vec<ResponseEntry>,
}

impl SubmissionPayload {
    pub fn new(exam_id: RecordId, responses: Vec<ResponseEntry>) -> Self {
        Self { exam_id, responses }
    }

    /// 已作答题目数量
    pub fn answered(&self) -> usize {
        self.responses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_wire_format() {
        let payload = SubmissionPayload::new(
            RecordId::Number(12),
            vec![ResponseEntry {
                question_id: "q1".into(),
                answer_id: "a1".into(),
            }],
        );

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "examId": 12,
                "responses": [{ "questionId": "q1", "answerId": "a1" }]
            })
        );
    }

    #[test]
    fn test_empty_payload_keeps_responses_field() {
        let payload = SubmissionPayload::new("final".into(), Vec::new());

        assert_eq!(payload.answered(), 0);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "examId": "final", "responses": [] })
        );
    }
}
