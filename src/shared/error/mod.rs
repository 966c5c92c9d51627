//! 统一错误处理模块
//!
//! 定义系统中所有错误类型：上游 Monzo 调用的错误分类，以及应用自身的错误

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::shared::utils::escape_html;

/// 上游 Monzo API 调用错误
///
/// 每次调用都以该类型返回，由各个路由按页面与错误类型选择提示信息显式处理
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 权限不足或令牌过期 (403)
    #[error("权限错误: {0}")]
    Permissions(String),

    /// 请求格式错误或被拒绝 (其余 4xx)
    #[error("HTTP错误 {status}: {message}")]
    Http { status: u16, message: String },

    /// 认证失败：授权码/state 无效或未登录 (401)
    #[error("认证失败: {0}")]
    Authentication(String),

    /// 上游服务故障 (5xx)
    #[error("服务端错误: {0}")]
    Server(String),

    /// 网络层错误
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),

    /// 响应解析失败
    #[error("响应解析失败: {0}")]
    Decode(#[from] serde_json::Error),

    /// 尚未配置 client id / client secret
    #[error("客户端凭据未配置")]
    NotConfigured,
}

impl ProviderError {
    /// 根据 HTTP 状态码对上游错误进行分类
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ProviderError::Authentication(message),
            403 => ProviderError::Permissions(message),
            500..=599 => ProviderError::Server(message),
            _ => ProviderError::Http { status, message },
        }
    }

    /// 错误类型名称（用于日志）
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Permissions(_) => "permissions",
            ProviderError::Http { .. } => "http",
            ProviderError::Authentication(_) => "authentication",
            ProviderError::Server(_) => "server",
            ProviderError::Network(_) => "network",
            ProviderError::Decode(_) => "decode",
            ProviderError::NotConfigured => "not_configured",
        }
    }
}

/// 应用程序统一错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 验证错误
    #[error("验证错误: {0}")]
    Validation(String),

    /// 上游服务错误
    #[error("上游服务错误: {0}")]
    Provider(#[from] ProviderError),

    /// 凭据文件读写错误
    #[error("存储错误: {0}")]
    Storage(#[from] std::io::Error),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 模板渲染错误
    #[error("模板错误: {0}")]
    Template(#[from] tera::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Configuration(String),
}

impl AppError {
    /// 获取HTTP状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Configuration(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error_code = self.error_code();

        tracing::error!(
            status = ?status_code,
            error_code = error_code,
            error = %self,
            "处理请求时发生错误"
        );

        // 模板引擎本身可能出错，这里只输出最小的静态页面
        let body = Html(format!(
            "<!DOCTYPE html><html><head><title>Error</title></head><body>\
             <h1>{}</h1><p>{}</p></body></html>",
            error_code,
            escape_html(&self.to_string()),
        ));

        (status_code, body).into_response()
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 上游调用结果类型
pub type ProviderResult<T> = Result<T, ProviderError>;

/// 验证错误构造宏
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::shared::error::AppError::Validation($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::shared::error::AppError::Validation(format!($fmt, $($arg)*))
    };
}
