//! Monzo 认证上下文
//!
//! 由本地凭据构建，负责授权 URL、授权码交换、令牌刷新以及带认证的 API 调用。
//! 刷新得到的新令牌会通过凭据存储持久化。

use reqwest::{header, Client};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use super::types::*;
use crate::infrastructure::config::MonzoConfig;
use crate::infrastructure::{SharedCredentialStore, TokenSet};
use crate::shared::constants::oauth::TOKEN_PATH;
use crate::shared::utils::time;
use crate::shared::{AppError, AppResult, ProviderError, ProviderResult};

/// Monzo 认证上下文
pub struct MonzoAuth {
    client: Client,
    config: MonzoConfig,
    client_id: String,
    client_secret: String,
    tokens: Mutex<Option<TokenSet>>,
    store: SharedCredentialStore,
}

impl MonzoAuth {
    /// 从凭据存储构建认证上下文
    ///
    /// 未提供（或为空）的 client id / secret 使用存储中的值
    pub async fn build(
        client: Client,
        config: &MonzoConfig,
        store: SharedCredentialStore,
        client_id: Option<&str>,
        client_secret: Option<&str>,
    ) -> AppResult<Self> {
        let credentials = store.load().await?;

        let client_id = client_id
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or(credentials.client_id);
        let client_secret = client_secret
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or(credentials.client_secret);

        let tokens = credentials.access_token.map(|access_token| TokenSet {
            access_token,
            refresh_token: credentials.refresh_token,
            expiry: credentials.expiry,
        });

        Ok(Self {
            client,
            config: config.clone(),
            client_id,
            client_secret,
            tokens: Mutex::new(tokens),
            store,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// 生成 Monzo 授权页面 URL
    pub fn authorization_url(&self, state: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| AppError::Configuration(format!("无效的授权地址: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("state", state);

        Ok(url)
    }

    /// 使用授权码交换令牌并持久化
    ///
    /// `expected_state` 为发起授权时记录的 state，不一致视为认证失败
    pub async fn exchange(&self, code: &str, state: &str, expected_state: Option<&str>) -> AppResult<()> {
        if expected_state != Some(state) {
            warn!("⚠️ OAuth state 校验失败");
            return Err(ProviderError::Authentication("state 不匹配".to_string()).into());
        }
        if !self.is_configured() {
            return Err(ProviderError::NotConfigured.into());
        }

        info!("🔄 正在交换授权码...");
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("code", code),
        ];

        let tokens = self.request_tokens(&form).await.map_err(|e| match e {
            // 授权码无效时 Monzo 返回 4xx
            ProviderError::Http { message, .. } | ProviderError::Permissions(message) => {
                ProviderError::Authentication(message)
            }
            other => other,
        })?;

        self.store.store_tokens(&tokens).await?;
        *self.tokens.lock().await = Some(tokens);
        info!("✅ 授权码交换成功");
        Ok(())
    }

    /// 使用 refresh token 刷新访问令牌
    async fn refresh(&self, refresh_token: &str) -> ProviderResult<TokenSet> {
        info!("🔄 访问令牌已过期，正在刷新");
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", refresh_token),
        ];

        let mut tokens = self.request_tokens(&form).await?;
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh_token.to_string());
        }

        if let Err(e) = self.store.store_tokens(&tokens).await {
            error!("❌ 刷新后的令牌保存失败: {}", e);
        }
        Ok(tokens)
    }

    async fn request_tokens(&self, form: &[(&str, &str)]) -> ProviderResult<TokenSet> {
        let response = self
            .client
            .post(self.endpoint(TOKEN_PATH))
            .form(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), error_message(&body)));
        }

        let token_response: TokenResponse = serde_json::from_str(&body)?;
        Ok(token_response.into_token_set())
    }

    /// 获取可用的访问令牌，必要时刷新
    async fn access_token(&self) -> ProviderResult<String> {
        let mut tokens = self.tokens.lock().await;
        let current = tokens
            .clone()
            .ok_or_else(|| ProviderError::Authentication("尚未完成授权".to_string()))?;

        let expired = current.expiry.map(time::is_expired).unwrap_or(false);
        match (expired, current.refresh_token.as_deref()) {
            (true, Some(refresh_token)) => {
                let refreshed = self.refresh(refresh_token).await?;
                let access_token = refreshed.access_token.clone();
                *tokens = Some(refreshed);
                Ok(access_token)
            }
            _ => Ok(current.access_token),
        }
    }

    /// 发起 Monzo API 请求
    pub async fn make_request(&self, request: ApiRequest) -> ProviderResult<ApiResponse> {
        let url = self.endpoint(&request.path);
        debug!("➡️ {} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &url)
            .headers(request.headers);

        if request.authenticated {
            if !self.is_configured() {
                return Err(ProviderError::NotConfigured);
            }
            let access_token = self.access_token().await?;
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", access_token));
        }

        if request.method.sends_body() {
            builder = builder.form(&request.params);
        } else if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("⚠️ Monzo API 返回错误: {} {}", status, url);
            return Err(ProviderError::from_status(status.as_u16(), error_message(&body)));
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            data: decode_body(&body),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.config.api_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

/// 响应体解析：空 ⇒ null，非 JSON ⇒ 原始字符串
fn decode_body(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

/// 从 Monzo 错误响应中提取提示信息
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.chars().take(200).collect())
}
