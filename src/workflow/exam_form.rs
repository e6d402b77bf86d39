//! 答题表单流程 - 流程层
//!
//! 核心职责：编排"一场考试"的作答流程
//!
//! 流程顺序：
//! 1. 取令牌 → 并行读取题目和答案选项（两个独立任务，互不等待）
//! 2. 用户逐题选择答案
//! 3. 取令牌 → 提交 → 提示 → 返回首页
//!
//! 所有失败都在调用处转换为用户提示，同时把结果返回给调用方

use std::sync::{Arc, Mutex, MutexGuard};

use secrecy::SecretString;
use serde_json::Value as JsonValue;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::clients::ExamGateway;
use crate::error::{FormError, Resource};
use crate::infrastructure::{Navigator, Notice, Notifier, TokenProvider};
use crate::models::{RecordId, SubmissionPayload};
use crate::workflow::exam_ctx::ExamCtx;
use crate::workflow::form_state::{FormSnapshot, FormState, Phase};

/// 答题流程依赖的外部能力
#[derive(Clone)]
pub struct Collaborators {
    pub token_provider: Arc<dyn TokenProvider>,
    pub gateway: Arc<dyn ExamGateway>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

/// 提交成功的回执
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    pub payload: SubmissionPayload,
    /// 服务端返回的确认内容
    pub acknowledgement: JsonValue,
}

/// 答题表单控制器
///
/// - 持有题目、答案选项和作答记录
/// - 不关心界面如何渲染
/// - 可以克隆，克隆体共享同一份状态
#[derive(Clone)]
pub struct ExamForm {
    inner: Arc<Inner>,
}

struct Inner {
    ctx: ExamCtx,
    home_screen: String,
    deps: Collaborators,
    state: Mutex<FormState>,
    phase: watch::Sender<Phase>,
}

impl ExamForm {
    pub fn new(ctx: ExamCtx, home_screen: impl Into<String>, deps: Collaborators) -> Self {
        let (phase, _) = watch::channel(Phase::Loading);
        Self {
            inner: Arc::new(Inner {
                ctx,
                home_screen: home_screen.into(),
                deps,
                state: Mutex::new(FormState::default()),
                phase,
            }),
        }
    }

    pub fn ctx(&self) -> &ExamCtx {
        &self.inner.ctx
    }

    pub fn phase(&self) -> Phase {
        *self.inner.phase.borrow()
    }

    /// 订阅阶段变化
    pub fn phase_changes(&self) -> watch::Receiver<Phase> {
        self.inner.phase.subscribe()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.inner.state().snapshot(self.phase())
    }

    /// 激活页面：清空旧状态，取令牌，启动两个读取任务
    ///
    /// 缺少令牌时提示一次并返回错误，不发出任何请求，阶段停留在 `Loading`
    pub async fn initialize(&self) -> Result<LoadTasks, FormError> {
        let inner = &self.inner;
        let generation = inner.activate();

        info!("{} 📥 正在加载题目和答案选项...", inner.ctx);

        let Some(token) = inner.acquire_token().await else {
            warn!("{} ⚠️ 未找到令牌，停止加载", inner.ctx);
            inner.notify(Notice::MissingToken);
            return Err(FormError::MissingCredential);
        };
        let token = Arc::new(token);

        let questions = tokio::spawn(load_questions(inner.clone(), token.clone(), generation));
        let options = tokio::spawn(load_options(inner.clone(), token, generation));

        Ok(LoadTasks { questions, options })
    }

    /// 关闭页面：之后到达的加载结果全部丢弃
    pub fn deactivate(&self) {
        let mut state = self.inner.state();
        state.reset();
        self.inner.phase.send_replace(Phase::Loading);
        drop(state);
        debug!("{} 页面已关闭", self.inner.ctx);
    }

    /// 选择答案，覆盖之前的选择
    ///
    /// 题目ID不在已加载的题目中时忽略，返回 `false`
    pub fn select_answer(&self, question_id: &RecordId, answer_id: &RecordId) -> bool {
        let mut state = self.inner.state();
        if !state.has_question(question_id) {
            warn!(
                "{} ⚠️ 忽略未知题目 {} 的作答",
                self.inner.ctx, question_id
            );
            return false;
        }

        state
            .selections
            .insert(question_id.clone(), answer_id.clone());
        debug!("{} 题目 {} → 答案 {}", self.inner.ctx, question_id, answer_id);
        true
    }

    /// 清除某道题的选择（回到"请选择"状态）
    pub fn clear_answer(&self, question_id: &RecordId) -> bool {
        self.inner.state().selections.remove(question_id).is_some()
    }

    /// 提交当前作答
    ///
    /// 提交进行中再次调用会直接返回 `SubmitInProgress`，不发出请求
    pub async fn submit(&self) -> Result<SubmitReceipt, FormError> {
        let inner = &self.inner;

        let Some(previous) = inner.begin_submit() else {
            warn!("{} ⚠️ 上一次提交尚未结束，忽略本次提交", inner.ctx);
            return Err(FormError::SubmitInProgress);
        };

        let result = self.run_submit().await;
        inner.end_submit(previous);

        if result.is_ok() {
            inner.deps.navigator.navigate_to(&inner.home_screen);
        }

        result
    }

    async fn run_submit(&self) -> Result<SubmitReceipt, FormError> {
        let inner = &self.inner;

        let Some(token) = inner.acquire_token().await else {
            warn!("{} ⚠️ 未找到令牌，取消提交", inner.ctx);
            inner.notify(Notice::MissingToken);
            return Err(FormError::MissingCredential);
        };

        let payload = {
            let state = inner.state();
            SubmissionPayload::new(inner.ctx.exam_id.clone(), state.responses())
        };

        info!(
            "{} 📤 正在提交答案 ({} 道已作答)...",
            inner.ctx,
            payload.answered()
        );

        match inner.deps.gateway.submit_responses(&token, &payload).await {
            Ok(acknowledgement) => {
                info!("{} ✓ 答案提交成功", inner.ctx);
                debug!("{} 服务端确认: {}", inner.ctx, acknowledgement);
                inner.state().selections.clear();
                inner.notify(Notice::SubmitSucceeded);
                Ok(SubmitReceipt {
                    payload,
                    acknowledgement,
                })
            }
            Err(e) => {
                error!("{} ❌ 答案提交失败: {}", inner.ctx, e);
                inner.notify(Notice::SubmitFailed);
                Err(FormError::SubmitFailed(e))
            }
        }
    }
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, notice: Notice) {
        notice.send(self.deps.notifier.as_ref());
    }

    /// 开始新的激活，返回本次激活的编号
    ///
    /// 激活编号保存在状态锁内，加载结果在同一把锁下核对编号后写入
    fn activate(&self) -> u64 {
        let mut state = self.state();
        let generation = state.reset();
        self.phase.send_replace(Phase::Loading);
        generation
    }

    /// 读取令牌，读取失败按没有令牌处理
    async fn acquire_token(&self) -> Option<SecretString> {
        match self.deps.token_provider.get_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("{} ⚠️ 读取令牌失败: {}", self.ctx, e);
                None
            }
        }
    }

    /// 进入 `Submitting`，返回之前的阶段；已在提交中则返回 `None`
    fn begin_submit(&self) -> Option<Phase> {
        let mut previous = None;
        self.phase.send_if_modified(|phase| {
            if *phase == Phase::Submitting {
                return false;
            }
            previous = Some(*phase);
            *phase = Phase::Submitting;
            true
        });
        previous
    }

    /// 结束提交，回到之前的阶段
    ///
    /// 提交期间题目已加载完成时回到 `Ready` 而不是 `Loading`
    fn end_submit(&self, previous: Phase) {
        let state = self.state();
        let next = if previous == Phase::Loading && state.questions_loaded {
            Phase::Ready
        } else {
            previous
        };
        self.phase.send_if_modified(|phase| {
            if *phase != Phase::Submitting {
                return false;
            }
            *phase = next;
            true
        });
    }

    /// 必须在持有状态锁时调用，与 `end_submit` 互斥
    fn mark_ready(&self) {
        self.phase.send_if_modified(|phase| {
            if *phase != Phase::Loading {
                return false;
            }
            *phase = Phase::Ready;
            true
        });
    }
}

async fn load_questions(
    inner: Arc<Inner>,
    token: Arc<SecretString>,
    generation: u64,
) -> Result<usize, FormError> {
    let result = inner.deps.gateway.list_questions(&token).await;

    let mut state = inner.state();
    if state.generation != generation {
        debug!("{} 丢弃过期的题目结果", inner.ctx);
        return Err(FormError::Discarded(Resource::Questions));
    }

    match result {
        Ok(questions) => {
            let count = questions.len();
            state.questions = questions;
            state.questions_loaded = true;
            inner.mark_ready();
            drop(state);
            info!("{} ✓ 题目加载完成，共 {} 道", inner.ctx, count);
            Ok(count)
        }
        Err(e) => {
            error!("{} ❌ 获取题目失败: {}", inner.ctx, e);
            inner.notify(Notice::QuestionsUnavailable);
            Err(FormError::FetchFailed {
                resource: Resource::Questions,
                source: e,
            })
        }
    }
}

async fn load_options(
    inner: Arc<Inner>,
    token: Arc<SecretString>,
    generation: u64,
) -> Result<usize, FormError> {
    let result = inner.deps.gateway.list_answer_options(&token).await;

    let mut state = inner.state();
    if state.generation != generation {
        debug!("{} 丢弃过期的答案选项结果", inner.ctx);
        return Err(FormError::Discarded(Resource::AnswerOptions));
    }

    match result {
        Ok(options) => {
            let count = options.len();
            state.options = options;
            drop(state);
            info!("{} ✓ 答案选项加载完成，共 {} 个", inner.ctx, count);
            Ok(count)
        }
        Err(e) => {
            error!("{} ❌ 获取答案选项失败: {}", inner.ctx, e);
            inner.notify(Notice::AnswersUnavailable);
            Err(FormError::FetchFailed {
                resource: Resource::AnswerOptions,
                source: e,
            })
        }
    }
}

/// 一次激活启动的两个读取任务
///
/// 两个任务独立运行；不等待也不会影响状态更新
#[derive(Debug)]
pub struct LoadTasks {
    questions: JoinHandle<Result<usize, FormError>>,
    options: JoinHandle<Result<usize, FormError>>,
}

/// 两个读取任务的结果（成功时为条目数量）
#[derive(Debug)]
pub struct LoadReport {
    pub questions: Result<usize, FormError>,
    pub options: Result<usize, FormError>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.questions.is_ok() && self.options.is_ok()
    }
}

impl LoadTasks {
    /// 等待两个任务都结束
    pub async fn settled(self) -> LoadReport {
        let (questions, options) = futures::join!(self.questions, self.options);
        LoadReport {
            questions: flatten(Resource::Questions, questions),
            options: flatten(Resource::AnswerOptions, options),
        }
    }

    /// 只等待题目任务（答案选项任务继续在后台运行）
    pub async fn questions(self) -> Result<usize, FormError> {
        flatten(Resource::Questions, self.questions.await)
    }
}

fn flatten(
    resource: Resource,
    joined: Result<Result<usize, FormError>, tokio::task::JoinError>,
) -> Result<usize, FormError> {
    joined.unwrap_or_else(|e| {
        Err(FormError::LoadAborted {
            resource,
            reason: e.to_string(),
        })
    })
}
