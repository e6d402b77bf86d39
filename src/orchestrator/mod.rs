//! 编排层（Orchestration Layer）
//!
//! 把配置、基础设施和答题流程组装成一次完整的命令行答题会话：
//!
//! ```text
//! exam_session (加载 → 答题卡作答 → 提交)
//!     ↓
//! workflow::ExamForm (状态机)
//!     ↓
//! clients (考试 API) / infrastructure (令牌、提示、导航)
//! ```

pub mod exam_session;

pub use exam_session::{App, SessionSummary};
