//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::workflow::LoadReport;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `exam_id`: 考试ID
/// - `api_base_url`: 考试 API 根地址
pub fn log_startup(exam_id: &str, api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📝 考试ID: {}", exam_id);
    info!("🌐 API: {}", api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录加载结果
pub fn log_load_report(report: &LoadReport) {
    let describe = |r: &Result<usize, crate::error::FormError>| match r {
        Ok(count) => format!("✓ {} 条", count),
        Err(e) => format!("❌ {}", e),
    };
    info!("📋 题目: {}", describe(&report.questions));
    info!("📋 答案选项: {}", describe(&report.options));
}

/// 打印最终统计信息
///
/// # 参数
/// - `answered`: 已作答数量
/// - `total`: 题目总数
/// - `submitted`: 是否提交成功
pub fn print_final_stats(answered: usize, total: usize, submitted: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📊 答题完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已作答: {}/{}", answered, total);
    info!("📤 提交: {}", if submitted { "成功" } else { "失败" });
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("一二三四五六", 3), "一二三...");
    }
}
