//! 会话令牌存储 - 基础设施层
//!
//! 只负责"取出令牌"能力，令牌保存在本地 TOML 键值文件中

use async_trait::async_trait;
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 会话令牌提供者
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// 获取令牌，`None` 表示未登录
    async fn get_token(&self) -> AppResult<Option<SecretString>>;
}

/// 基于 TOML 文件的令牌存储
///
/// 文件不存在、键不存在或值为空字符串都视为没有令牌
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
}

impl FileTokenStore {
    /// 创建新的令牌存储
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存令牌（保留文件中的其他键）
    pub async fn save_token(&self, token: &str) -> AppResult<()> {
        let mut table = self.read_table().await?.unwrap_or_default();
        table.insert(self.key.clone(), toml::Value::String(token.to_string()));
        self.write_table(&table).await
    }

    /// 删除令牌
    pub async fn clear_token(&self) -> AppResult<()> {
        if let Some(mut table) = self.read_table().await? {
            table.remove(&self.key);
            self.write_table(&table).await?;
        }
        Ok(())
    }

    async fn read_table(&self) -> AppResult<Option<toml::Table>> {
        let path_str = self.path.display().to_string();

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("令牌文件不存在: {}", path_str);
                return Ok(None);
            }
            Err(e) => return Err(AppError::file_read_failed(path_str, e)),
        };

        let table: toml::Table =
            toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;
        Ok(Some(table))
    }

    async fn write_table(&self, table: &toml::Table) -> AppResult<()> {
        let path_str = self.path.display().to_string();
        let content =
            toml::to_string(table).map_err(|e| AppError::file_write_failed(&path_str, e))?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path_str, e))
    }
}

#[async_trait]
impl TokenProvider for FileTokenStore {
    async fn get_token(&self) -> AppResult<Option<SecretString>> {
        let Some(table) = self.read_table().await? else {
            return Ok(None);
        };

        let token = table
            .get(&self.key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::new(s.to_string()));

        Ok(token)
    }
}

/// 固定令牌（来自配置或环境变量）
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|s| !s.is_empty()),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> AppResult<Option<SecretString>> {
        Ok(self.token.clone().map(SecretString::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn temp_token_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("exam_submit_{}_{}.toml", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_missing_file_means_no_token() {
        let store = FileTokenStore::new(temp_token_file("missing"), "token");
        assert!(store.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_read_keeps_other_keys() {
        let path = temp_token_file("save");
        tokio::fs::write(&path, "user = \"ana\"\n").await.unwrap();

        let store = FileTokenStore::new(&path, "token");
        store.save_token("abc123").await.unwrap();

        let token = store.get_token().await.unwrap().expect("应该能读到令牌");
        assert_eq!(token.expose_secret(), "abc123");

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("user = \"ana\""));

        store.clear_token().await.unwrap();
        assert!(store.get_token().await.unwrap().is_none());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_empty_token_is_absent() {
        let path = temp_token_file("empty");
        tokio::fs::write(&path, "token = \"\"\n").await.unwrap();

        let store = FileTokenStore::new(&path, "token");
        assert!(store.get_token().await.unwrap().is_none());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = temp_token_file("corrupt");
        tokio::fs::write(&path, "token = ").await.unwrap();

        let store = FileTokenStore::new(&path, "token");
        let err = store.get_token().await.unwrap_err();
        assert!(err.to_string().contains("TOML解析失败"));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_static_provider() {
        let provider = StaticTokenProvider::new(Some("t".to_string()));
        assert_eq!(provider.get_token().await.unwrap().unwrap().expose_secret(), "t");

        let empty = StaticTokenProvider::new(Some(String::new()));
        assert!(empty.get_token().await.unwrap().is_none());
    }
}
