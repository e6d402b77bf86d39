//! 页面导航 - 基础设施层

use std::sync::Mutex;
use tracing::info;

/// 页面导航能力
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, screen: &str);
}

/// 记录导航历史的导航器
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 导航历史（按时间顺序）
    pub fn history(&self) -> Vec<String> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    /// 最近一次导航的目标页面
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate_to(&self, screen: &str) {
        info!("↩️ 返回页面: {}", screen);
        if let Ok(mut history) = self.history.lock() {
            history.push(screen.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_recorded_in_order() {
        let navigator = HistoryNavigator::new();
        assert!(navigator.current().is_none());

        navigator.navigate_to("Exams");
        navigator.navigate_to("Home");

        assert_eq!(navigator.history(), vec!["Exams", "Home"]);
        assert_eq!(navigator.current().as_deref(), Some("Home"));
    }
}
