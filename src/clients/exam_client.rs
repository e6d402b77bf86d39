//! 考试 API 客户端
//!
//! 封装所有与考试 API 相关的调用逻辑，所有请求都带 Bearer 令牌

use crate::config::Config;
use crate::error::{ApiError, AppResult, ConfigError};
use crate::models::{AnswerOption, Question, SubmissionPayload};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

const QUESTIONS_ENDPOINT: &str = "questions";
const ANSWERS_ENDPOINT: &str = "answers";
const USER_ANSWERS_ENDPOINT: &str = "user-answers";

/// 考试数据网关
///
/// 答题流程只依赖这三个能力，测试时可替换为假实现
#[async_trait]
pub trait ExamGateway: Send + Sync {
    /// `GET /questions`
    async fn list_questions(&self, token: &SecretString) -> Result<Vec<Question>, ApiError>;

    /// `GET /answers`
    async fn list_answer_options(&self, token: &SecretString)
        -> Result<Vec<AnswerOption>, ApiError>;

    /// `POST /user-answers`，返回服务端的确认内容（格式由服务端决定）
    async fn submit_responses(
        &self,
        token: &SecretString,
        payload: &SubmissionPayload,
    ) -> Result<Value, ApiError>;
}

/// 考试 API 客户端
pub struct ExamApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExamApiClient {
    /// 创建新的考试 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Self::with_client(http, &config.api_base_url)
    }

    /// 使用已有的 HTTP 客户端创建
    pub fn with_client(http: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { url: base_url }.into());
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// 带令牌的 GET 请求，并把响应体解析为指定类型
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: &SecretString,
    ) -> Result<T, ApiError> {
        debug!("GET {}", self.url(endpoint));

        let response = self
            .http
            .get(self.url(endpoint))
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let body = read_success_body(endpoint, response).await?;

        serde_json::from_str(&body).map_err(|e| ApiError::json_parse_failed(endpoint, e))
    }
}

#[async_trait]
impl ExamGateway for ExamApiClient {
    async fn list_questions(&self, token: &SecretString) -> Result<Vec<Question>, ApiError> {
        let questions: Vec<Question> = self.get_json(QUESTIONS_ENDPOINT, token).await?;
        debug!("获取到 {} 道题目", questions.len());
        Ok(questions)
    }

    async fn list_answer_options(
        &self,
        token: &SecretString,
    ) -> Result<Vec<AnswerOption>, ApiError> {
        let options: Vec<AnswerOption> = self.get_json(ANSWERS_ENDPOINT, token).await?;
        debug!("获取到 {} 个答案选项", options.len());
        Ok(options)
    }

    async fn submit_responses(
        &self,
        token: &SecretString,
        payload: &SubmissionPayload,
    ) -> Result<Value, ApiError> {
        debug!(
            "POST {} Payload: {}",
            self.url(USER_ANSWERS_ENDPOINT),
            serde_json::to_string(payload).unwrap_or_default()
        );

        let response = self
            .http
            .post(self.url(USER_ANSWERS_ENDPOINT))
            .bearer_auth(token.expose_secret())
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(USER_ANSWERS_ENDPOINT, e))?;

        let body = read_success_body(USER_ANSWERS_ENDPOINT, response).await?;
        let ack = parse_acknowledgement(&body);

        debug!("提交结果: {}", ack);

        Ok(ack)
    }
}

/// 读取响应体，非 2xx 状态码视为失败
async fn read_success_body(endpoint: &str, response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::request_failed(endpoint, e))?;

    if !status.is_success() {
        return Err(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

/// 解析提交确认：空响应为 null，非 JSON 响应按原文保存
fn parse_acknowledgement(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
