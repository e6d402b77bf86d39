//! 用户提示 - 基础设施层
//!
//! 所有错误和成功信息都通过 `Notifier` 告知用户

use tracing::{info, warn};

/// 用户提示能力
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// 答题流程会发出的提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MissingToken,
    QuestionsUnavailable,
    AnswersUnavailable,
    SubmitFailed,
    SubmitSucceeded,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        if self.is_error() {
            "错误"
        } else {
            "成功"
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::MissingToken => "未找到身份验证令牌",
            Notice::QuestionsUnavailable => "无法获取题目",
            Notice::AnswersUnavailable => "无法获取答案选项",
            Notice::SubmitFailed => "无法提交答案",
            Notice::SubmitSucceeded => "答案提交成功",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::SubmitSucceeded)
    }

    pub fn send(self, notifier: &dyn Notifier) {
        notifier.notify(self.title(), self.message());
    }
}

/// 终端提示，直接写入日志
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) {
        if title == Notice::SubmitSucceeded.title() {
            info!("🔔 [{}] {}", title, message);
        } else {
            warn!("🔔 [{}] {}", title, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, String)>>);

    impl Notifier for Recorder {
        fn notify(&self, title: &str, message: &str) {
            self.0
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
        }
    }

    #[test]
    fn test_only_submit_success_is_not_an_error() {
        let failures = [
            Notice::MissingToken,
            Notice::QuestionsUnavailable,
            Notice::AnswersUnavailable,
            Notice::SubmitFailed,
        ];
        for notice in failures {
            assert!(notice.is_error(), "{:?}", notice);
            assert_eq!(notice.title(), "错误");
        }
        assert!(!Notice::SubmitSucceeded.is_error());
        assert_eq!(Notice::SubmitSucceeded.title(), "成功");
    }

    #[test]
    fn test_send_passes_title_and_message() {
        let recorder = Recorder::default();

        Notice::AnswersUnavailable.send(&recorder);

        assert_eq!(
            *recorder.0.lock().unwrap(),
            vec![("错误".to_string(), "无法获取答案选项".to_string())]
        );
    }
}
