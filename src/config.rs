/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 考试 API 根地址
    pub api_base_url: String,
    /// 考试ID（由上一个页面传入）
    pub exam_id: String,
    /// 会话令牌存储文件
    pub token_file: String,
    /// 令牌在存储文件中的键名
    pub token_key: String,
    /// 直接指定的令牌（优先于令牌文件）
    pub session_token: Option<String>,
    /// 提交成功后返回的页面
    pub home_screen: String,
    /// 答题卡 TOML 文件
    pub answer_sheet: String,
    /// 是否接受无效的 TLS 证书（自签名的内网服务）
    pub accept_invalid_certs: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8080".to_string(),
            exam_id: "1".to_string(),
            token_file: "session.toml".to_string(),
            token_key: "token".to_string(),
            session_token: None,
            home_screen: "Home".to_string(),
            answer_sheet: "answers.toml".to_string(),
            accept_invalid_certs: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("EXAM_API_BASE_URL").unwrap_or(default.api_base_url),
            exam_id: std::env::var("EXAM_ID").unwrap_or(default.exam_id),
            token_file: std::env::var("TOKEN_FILE").unwrap_or(default.token_file),
            token_key: std::env::var("TOKEN_KEY").unwrap_or(default.token_key),
            session_token: std::env::var("EXAM_TOKEN").ok().or(default.session_token),
            home_screen: std::env::var("HOME_SCREEN").unwrap_or(default.home_screen),
            answer_sheet: std::env::var("ANSWER_SHEET").unwrap_or(default.answer_sheet),
            accept_invalid_certs: std::env::var("ACCEPT_INVALID_CERTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.accept_invalid_certs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
