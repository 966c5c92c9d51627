//! 首页处理器

use axum::{extract::State, response::Response};
use tracing::instrument;

use super::require_setup;
use crate::presentation::routes::AppState;
use crate::presentation::views::View;
use crate::shared::AppResult;

/// 首页：未配置时跳转到设置页，否则显示功能链接
#[instrument(skip(app_state))]
pub async fn index(State(app_state): State<AppState>) -> AppResult<Response> {
    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }
    app_state.render(View::Index)
}
