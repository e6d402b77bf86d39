use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// API 调用错误
    Api(ApiError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 答题流程错误
    Form(FormError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Form(e) => write!(f, "答题错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Form(e) => Some(e),
        }
    }
}

/// API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非 2xx 状态码
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// JSON 解析失败
    JsonParseFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadResponse {
                endpoint,
                status,
                body,
            } => {
                write!(
                    f,
                    "API返回错误响应 ({}): status={}, body={:?}",
                    endpoint, status, body
                )
            }
            ApiError::JsonParseFailed { endpoint, source } => {
                write!(f, "JSON解析失败 ({}): {}", endpoint, source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ApiError::BadResponse { .. } => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// HTTP 客户端构建失败
    HttpClientBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 根地址不合法
    InvalidBaseUrl { url: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HttpClientBuildFailed { source } => {
                write!(f, "HTTP 客户端构建失败: {}", source)
            }
            ConfigError::InvalidBaseUrl { url } => {
                write!(f, "API 根地址不合法: '{}'", url)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::HttpClientBuildFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            ConfigError::InvalidBaseUrl { .. } => None,
        }
    }
}

/// 远程资源类型（用于区分是哪一次读取失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Questions,
    AnswerOptions,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Questions => write!(f, "题目"),
            Resource::AnswerOptions => write!(f, "答案选项"),
        }
    }
}

/// 答题流程错误
///
/// 控制器在通知用户之后，把同样的结果返回给调用方
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// 令牌缺失
    #[error("未找到身份验证令牌")]
    MissingCredential,
    /// 读取题目或答案选项失败
    #[error("无法获取{resource}: {source}")]
    FetchFailed {
        resource: Resource,
        #[source]
        source: ApiError,
    },
    /// 提交失败
    #[error("无法提交答案: {0}")]
    SubmitFailed(#[source] ApiError),
    /// 上一次提交尚未结束
    #[error("答案正在提交中")]
    SubmitInProgress,
    /// 页面已关闭或重新加载，结果被丢弃
    #[error("页面已重新加载，丢弃过期的{0}")]
    Discarded(Resource),
    /// 加载任务异常结束
    #[error("加载{resource}的任务异常结束: {reason}")]
    LoadAborted { resource: Resource, reason: String },
}

// ========== 从常见错误类型转换 ==========

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::Form(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Config(ConfigError::HttpClientBuildFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(path: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建 JSON 解析失败错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_form_error_keeps_api_error_as_source() {
        let err = FormError::FetchFailed {
            resource: Resource::AnswerOptions,
            source: ApiError::BadResponse {
                endpoint: "answers".to_string(),
                status: 500,
                body: String::new(),
            },
        };

        assert!(err.to_string().starts_with("无法获取答案选项"));
        let source = err.source().expect("应该带有底层错误");
        assert!(source.to_string().contains("status=500"));
    }

    #[test]
    fn test_config_error_converts_into_app_error() {
        let err: AppError = ConfigError::InvalidBaseUrl {
            url: "10.0.0.2".to_string(),
        }
        .into();

        assert!(matches!(err, AppError::Config(ConfigError::InvalidBaseUrl { .. })));
        assert_eq!(err.to_string(), "配置错误: API 根地址不合法: '10.0.0.2'");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_file_errors_keep_path_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::file_read_failed("token.toml", io);

        assert!(matches!(err, AppError::File(FileError::ReadFailed { .. })));
        assert!(err.to_string().contains("token.toml"));
        let source = err.source().and_then(|e| e.source());
        assert_eq!(source.map(|e| e.to_string()), Some("missing".to_string()));
    }

    #[test]
    fn test_app_error_wraps_form_error() {
        let err: AppError = FormError::MissingCredential.into();
        assert_eq!(err.to_string(), "答题错误: 未找到身份验证令牌");
    }
}
