//! 原始请求处理器

use axum::{
    extract::{Form, State},
    response::Response,
};
use std::collections::HashMap;
use tracing::{info, instrument};

use super::require_setup;
use crate::business::domain::RawRequest;
use crate::business::services::{format_records, get_raw_request};
use crate::presentation::routes::AppState;
use crate::presentation::views::View;
use crate::shared::{AppError, AppResult};

#[instrument(skip(app_state))]
pub async fn raw_request_form(State(app_state): State<AppState>) -> AppResult<Response> {
    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }
    app_state.render(View::RawRequestForm)
}

/// 执行原始请求并显示格式化后的结果
///
/// 表单解析错误在发出请求之前返回
#[instrument(skip(app_state, form))]
pub async fn post_raw_request(
    State(app_state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let request = match RawRequest::from_form(&form).and_then(|raw| raw.to_api_request()) {
        Ok(request) => request,
        Err(AppError::Validation(message)) => return app_state.render(View::error(message)),
        Err(e) => return Err(e),
    };

    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }

    info!("📨 原始请求: {} {} (authenticated: {})", request.method, request.path, request.authenticated);
    let auth = app_state.auth(None, None).await?;
    let records = get_raw_request(&auth, request).await;

    app_state.render(View::RawRequestResult { records: format_records(&records) })
}
