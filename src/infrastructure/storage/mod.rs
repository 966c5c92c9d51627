//! 凭据存储模块
//!
//! 保存 client id / client secret 以及 OAuth 令牌。
//! 单用户、单进程：不加文件锁，并发写入时以最后一次写入为准。

pub mod file_store;
pub mod memory_store;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::shared::AppResult;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;

/// 本地保存的凭据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client_secret: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, with = "expiry_format")]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credentials {
    /// client id 与 client secret 均非空
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// 覆盖令牌字段
    pub fn apply_tokens(&mut self, tokens: &TokenSet) {
        self.access_token = Some(tokens.access_token.clone());
        self.refresh_token = tokens.refresh_token.clone();
        self.expiry = tokens.expiry;
    }
}

/// 授权码交换或刷新得到的令牌
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
}

/// 凭据存储接口
///
/// 同时作为令牌刷新的回调接收方
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 读取凭据；尚无任何记录时返回空凭据
    async fn load(&self) -> AppResult<Credentials>;

    /// 整体覆盖保存
    async fn save(&self, credentials: &Credentials) -> AppResult<()>;

    /// 是否已配置 client id 与 client secret
    async fn is_configured(&self) -> AppResult<bool> {
        Ok(self.load().await?.is_configured())
    }

    /// 保存 client 信息；client id 变化时清除旧令牌
    ///
    /// 已有凭据无法读取时直接以新的 client 信息覆盖
    async fn set_client_details(&self, client_id: &str, client_secret: &str) -> AppResult<Credentials> {
        let mut credentials = match self.load().await {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!("⚠️ 现有凭据无法读取，将被覆盖: {}", e);
                Credentials::default()
            }
        };
        if credentials.client_id != client_id {
            credentials.access_token = None;
            credentials.refresh_token = None;
            credentials.expiry = None;
        }
        credentials.client_id = client_id.to_string();
        credentials.client_secret = client_secret.to_string();
        self.save(&credentials).await?;
        info!("🔑 客户端凭据已保存");
        Ok(credentials)
    }

    /// 令牌刷新回调
    async fn store_tokens(&self, tokens: &TokenSet) -> AppResult<()> {
        let mut credentials = self.load().await?;
        credentials.apply_tokens(tokens);
        self.save(&credentials).await?;
        info!("🔄 访问令牌已更新并保存");
        Ok(())
    }
}

/// 共享凭据存储
pub type SharedCredentialStore = Arc<dyn CredentialStore>;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 过期时间读取兼容 Unix 秒数与 RFC 3339 字符串，写回统一为 Unix 秒数
mod expiry_format {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawExpiry {
        Seconds(i64),
        Fractional(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(expiry) => serializer.serialize_i64(expiry.timestamp()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<RawExpiry>::deserialize(deserializer)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let from_seconds = |seconds: i64| {
            DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| D::Error::custom(format!("过期时间超出范围: {}", seconds)))
        };

        match raw {
            RawExpiry::Seconds(seconds) => from_seconds(seconds).map(Some),
            RawExpiry::Fractional(seconds) => from_seconds(seconds.trunc() as i64).map(Some),
            RawExpiry::Text(text) if text.trim().is_empty() => Ok(None),
            RawExpiry::Text(text) => {
                if let Ok(seconds) = text.trim().parse::<i64>() {
                    return from_seconds(seconds).map(Some);
                }
                DateTime::parse_from_rfc3339(text.trim())
                    .map(|dt| Some(dt.with_timezone(&Utc)))
                    .map_err(|e| D::Error::custom(format!("无法解析过期时间 {}: {}", text, e)))
            }
        }
    }
}
