//! # Exam Submit
//!
//! 从考试 API 获取题目和答案选项、逐题作答并提交的客户端
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部协作者，只暴露能力
//! - `TokenProvider` - 取会话令牌（TOML 文件或固定值）
//! - `Notifier` - 提示用户
//! - `Navigator` - 页面导航
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - `ExamGateway` 三个接口：题目、答案选项、提交
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一场考试"的作答流程
//! - `ExamCtx` - 上下文封装（exam_id）
//! - `ExamForm` - 状态机（Loading → Ready ⇄ Submitting）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/exam_session` - 命令行答题会话
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ExamApiClient, ExamGateway};
pub use config::Config;
pub use error::{AppError, AppResult, FormError};
pub use models::{AnswerOption, Question, RecordId, SubmissionPayload};
pub use orchestrator::{App, SessionSummary};
pub use workflow::{Collaborators, ExamCtx, ExamForm, Phase};
