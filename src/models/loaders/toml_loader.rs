use crate::models::question::RecordId;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// 答题卡
///
/// ```toml
/// exam_id = 3
///
/// [answers]
/// q1 = "a1"
/// "7" = 12
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSheet {
    /// 覆盖配置中的考试ID（可选）
    #[serde(default)]
    pub exam_id: Option<RecordId>,
    /// 题目ID → 答案ID
    #[serde(default)]
    pub answers: BTreeMap<String, RecordId>,
}

/// 从 TOML 文件加载答题卡
pub async fn load_answer_sheet(toml_file_path: &Path) -> Result<AnswerSheet> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取答题卡: {}", toml_file_path.display()))?;

    parse_answer_sheet(&content)
        .with_context(|| format!("无法解析答题卡: {}", toml_file_path.display()))
}

/// 加载答题卡，文件不存在时返回空答题卡
///
/// 只有"文件不存在"会被放过，读取失败或格式错误仍然返回错误
pub async fn load_answer_sheet_or_default(toml_file_path: &Path) -> Result<AnswerSheet> {
    match fs::try_exists(toml_file_path).await {
        Ok(false) => {
            tracing::warn!(
                "⚠️ 未找到答题卡 {}，将以空答卷提交",
                toml_file_path.display()
            );
            Ok(AnswerSheet::default())
        }
        _ => load_answer_sheet(toml_file_path).await,
    }
}

/// 解析答题卡内容
pub fn parse_answer_sheet(content: &str) -> Result<AnswerSheet> {
    let sheet: AnswerSheet = toml::from_str(content)?;
    tracing::debug!("答题卡共 {} 条作答", sheet.answers.len());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer_sheet_mixed_ids() {
        let sheet = parse_answer_sheet(
            r#"
            exam_id = 3

            [answers]
            q1 = "a1"
            "7" = 12
            "#,
        )
        .unwrap();

        assert_eq!(sheet.exam_id, Some(RecordId::Number(3)));
        assert_eq!(sheet.answers["q1"], RecordId::from("a1"));
        assert_eq!(sheet.answers["7"], RecordId::Number(12));
    }

    #[test]
    fn test_parse_empty_answer_sheet() {
        let sheet = parse_answer_sheet("").unwrap();
        assert!(sheet.exam_id.is_none());
        assert!(sheet.answers.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_answer_sheet_fails_with_path() {
        let err = load_answer_sheet(Path::new("definitely/not/here.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }

    #[tokio::test]
    async fn test_missing_answer_sheet_falls_back_to_empty() {
        let sheet = load_answer_sheet_or_default(Path::new("definitely/not/here.toml"))
            .await
            .unwrap();
        assert!(sheet.exam_id.is_none());
        assert!(sheet.answers.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_answer_sheet_is_still_an_error() {
        let path = std::env::temp_dir().join(format!(
            "exam_submit_bad_sheet_{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[answers\nq1 = ").await.unwrap();

        let result = load_answer_sheet_or_default(&path).await;
        let _ = fs::remove_file(&path).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("无法解析答题卡"));
    }
}
