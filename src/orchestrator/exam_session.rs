use crate::clients::ExamApiClient;
use crate::config::Config;
use crate::infrastructure::{
    ConsoleNotifier, FileTokenStore, HistoryNavigator, StaticTokenProvider, TokenProvider,
};
use crate::models::{load_answer_sheet_or_default, AnswerSheet, RecordId};
use crate::utils::logging;
use crate::workflow::{Collaborators, ExamCtx, ExamForm, FormSnapshot, Phase};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    form: ExamForm,
    navigator: Arc<HistoryNavigator>,
}

/// 一次答题会话的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub answered: usize,
    pub total: usize,
    pub submitted: bool,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let gateway = ExamApiClient::new(&config).context("无法创建考试 API 客户端")?;

        let token_provider: Arc<dyn TokenProvider> = match &config.session_token {
            Some(token) => Arc::new(StaticTokenProvider::new(Some(token.clone()))),
            None => Arc::new(FileTokenStore::new(&config.token_file, &config.token_key)),
        };

        let navigator = Arc::new(HistoryNavigator::new());
        let form = ExamForm::new(
            ExamCtx::new(RecordId::parse_param(&config.exam_id)),
            config.home_screen.clone(),
            Collaborators {
                token_provider,
                gateway: Arc::new(gateway),
                notifier: Arc::new(ConsoleNotifier),
                navigator: navigator.clone(),
            },
        );

        Ok(Self {
            config,
            form,
            navigator,
        })
    }

    /// 运行应用主逻辑：加载 → 按答题卡作答 → 提交
    pub async fn run(&self) -> Result<SessionSummary> {
        logging::log_startup(&self.config.exam_id, &self.config.api_base_url);

        let tasks = self.form.initialize().await.context("加载试题失败")?;
        let report = tasks.settled().await;
        logging::log_load_report(&report);

        if self.form.phase() != Phase::Ready {
            anyhow::bail!("{} 题目未能加载，无法继续作答", self.form.ctx());
        }

        let sheet = load_answer_sheet_or_default(Path::new(&self.config.answer_sheet)).await?;
        self.apply_answer_sheet(&sheet)?;

        let snapshot = self.form.snapshot();
        preview_form(&snapshot);

        let total = snapshot.questions.len();
        let summary = match self.form.submit().await {
            Ok(receipt) => SessionSummary {
                answered: receipt.payload.answered(),
                total,
                submitted: true,
            },
            Err(e) => {
                error!("{} ❌ {}", self.form.ctx(), e);
                SessionSummary {
                    answered: total - snapshot.unanswered(),
                    total,
                    submitted: false,
                }
            }
        };

        logging::print_final_stats(summary.answered, summary.total, summary.submitted);
        if let Some(screen) = self.navigator.current() {
            info!("当前页面: {}", screen);
        }

        Ok(summary)
    }

    /// 把答题卡中的作答应用到表单
    fn apply_answer_sheet(&self, sheet: &AnswerSheet) -> Result<()> {
        let ctx = self.form.ctx();
        if let Some(exam_id) = &sheet.exam_id {
            if exam_id != &ctx.exam_id {
                anyhow::bail!("答题卡属于考试 {}，与当前考试 {} 不符", exam_id, ctx.exam_id);
            }
        }

        let snapshot = self.form.snapshot();
        for (key, answer_id) in &sheet.answers {
            let Some(question) = snapshot.find_question(key) else {
                warn!("{} ⚠️ 答题卡中的题目 {} 不存在，跳过", ctx, key);
                continue;
            };

            if !snapshot.options.is_empty() && !snapshot.options.iter().any(|o| &o.id == answer_id) {
                warn!("{} ⚠️ 题目 {} 的答案 {} 不在选项中", ctx, key, answer_id);
            }

            self.form.select_answer(&question.id, answer_id);
        }

        Ok(())
    }
}

/// 显示表单预览：每道题及其当前选择
fn preview_form(snapshot: &FormSnapshot) {
    info!("\n{}", "─".repeat(60));
    for (i, question) in snapshot.questions.iter().enumerate() {
        let choice = snapshot
            .selected_option(&question.id)
            .map(|o| o.answer_text.clone())
            .or_else(|| snapshot.selections.get(&question.id).map(|id| format!("#{}", id)))
            .unwrap_or_else(|| "未作答".to_string());
        info!(
            "{}. {} → {}",
            i + 1,
            logging::truncate_text(&question.question_text, 40),
            choice
        );
    }

    if snapshot.options.is_empty() {
        warn!("⚠️ 没有可选的答案选项");
    } else {
        let labels: Vec<&str> = snapshot.options.iter().map(|o| o.answer_text.as_str()).collect();
        info!("可选答案: {}", labels.join(" / "));
    }
    info!("{}", "─".repeat(60));
}
