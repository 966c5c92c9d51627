//! OAuth 及 API 调用相关类型定义

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::infrastructure::TokenSet;
use crate::shared::utils::time;

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// 参数是否放在请求体中（否则作为查询字符串）
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Default for HttpMethod {
    fn default() -> Self {
        Self::Get
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unsupported request method: {}", s.trim())),
        }
    }
}

/// 发往 Monzo API 的请求
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub authenticated: bool,
    pub headers: HeaderMap,
    /// GET/DELETE 作为查询参数，其余作为表单字段
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            authenticated: true,
            headers: HeaderMap::new(),
            params: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Monzo API 响应
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

/// Monzo 令牌端点响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 有效期（秒）
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl TokenResponse {
    pub fn into_token_set(self) -> TokenSet {
        TokenSet {
            expiry: self.expires_in.map(time::seconds_from_now),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// 授权页面返回的授权码与 state
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationCallback {
    pub code: String,
    pub state: String,
}
