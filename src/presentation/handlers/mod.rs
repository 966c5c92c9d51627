//! HTTP请求处理器模块
//!
//! 每个处理器读取表单/查询参数，调用 Monzo 服务并选择视图。
//! 上游错误在这里被显式转换为错误页，不会传播为 500。

pub mod accounts;
pub mod feed_item;
pub mod index;
pub mod raw_request;
pub mod setup;
pub mod transactions;

use axum::response::{IntoResponse, Redirect, Response};
use tracing::{info, warn};

use crate::presentation::routes::AppState;
use crate::shared::constants::routes;
use crate::shared::AppResult;

/// 未配置 client 信息时返回跳转到设置页的响应
///
/// 凭据无法读取时同样跳转，由设置页重新写入
pub(crate) async fn require_setup(app_state: &AppState) -> AppResult<Option<Response>> {
    match app_state.credentials.is_configured().await {
        Ok(true) => return Ok(None),
        Ok(false) => info!("🔧 尚未配置客户端凭据，跳转到设置页"),
        Err(e) => warn!("⚠️ 凭据读取失败，跳转到设置页: {}", e),
    }
    Ok(Some(Redirect::to(routes::SETUP).into_response()))
}
