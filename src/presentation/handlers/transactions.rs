//! 交易记录处理器

use axum::{
    extract::{Form, State},
    response::Response,
};
use std::collections::HashMap;
use tracing::{instrument, warn};

use super::require_setup;
use crate::business::services::fetch_transactions;
use crate::presentation::routes::AppState;
use crate::presentation::views::{messages, Page, View};
use crate::shared::constants::{accounts::PLACEHOLDER, transactions};
use crate::shared::utils::{escape_html, time};
use crate::shared::AppResult;

/// 显示账号最近 30 天的交易记录
#[instrument(skip(app_state, form))]
pub async fn transactions_for_account(
    State(app_state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let account = form
        .get("account")
        .map(|a| escape_html(a.trim()))
        .filter(|a| !a.is_empty() && a != PLACEHOLDER);

    let account = match account {
        Some(account) => account,
        None => return app_state.render(View::error(messages::NO_ACCOUNT)),
    };

    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }

    let auth = app_state.auth(None, None).await?;
    let since = time::days_ago(transactions::WINDOW_DAYS);
    let view = match fetch_transactions(&auth, &account, since, &transactions::EXPAND).await {
        Ok(list) => View::transactions(&account, &list),
        Err(e) => {
            warn!("⚠️ 获取交易记录失败 ({}): {}", e.kind(), e);
            View::provider_error(Page::Transactions, &e)
        }
    };
    app_state.render(view)
}
