//! 账号列表处理器

use axum::{extract::State, response::Response};
use tracing::{instrument, warn};

use super::require_setup;
use crate::business::services::fetch_accounts;
use crate::presentation::routes::AppState;
use crate::presentation::views::{Page, View};
use crate::shared::AppResult;

/// 显示全部账号
#[instrument(skip(app_state))]
pub async fn list_accounts(State(app_state): State<AppState>) -> AppResult<Response> {
    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }

    let auth = app_state.auth(None, None).await?;
    let view = match fetch_accounts(&auth, true).await {
        Ok(accounts) => View::accounts(&accounts),
        Err(e) => {
            warn!("⚠️ 获取账号列表失败 ({}): {}", e.kind(), e);
            View::provider_error(Page::Accounts, &e)
        }
    };
    app_state.render(view)
}
