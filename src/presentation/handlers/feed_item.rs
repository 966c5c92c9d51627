//! Feed item 处理器

use axum::{
    extract::{Form, State},
    response::Response,
};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use super::require_setup;
use crate::business::domain::FeedItem;
use crate::business::services::{create_feed_item, fetch_accounts};
use crate::presentation::routes::AppState;
use crate::presentation::views::{messages, Page, View};
use crate::shared::{AppError, AppResult};

/// 显示表单（只列出可用账号）
#[instrument(skip(app_state))]
pub async fn feed_item_form(State(app_state): State<AppState>) -> AppResult<Response> {
    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }

    let auth = app_state.auth(None, None).await?;
    let view = match fetch_accounts(&auth, false).await {
        Ok(accounts) => View::feed_item_form(&accounts),
        Err(e) => {
            warn!("⚠️ 获取账号列表失败 ({}): {}", e.kind(), e);
            View::provider_error(Page::FeedItem, &e)
        }
    };
    app_state.render(view)
}

/// 提交 feed item
#[instrument(skip(app_state, form))]
pub async fn post_feed_item(
    State(app_state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let item = match FeedItem::from_form(&form) {
        Ok(item) => item,
        Err(AppError::Validation(message)) => return app_state.render(View::error(message)),
        Err(e) => return Err(e),
    };

    if let Some(redirect) = require_setup(&app_state).await? {
        return Ok(redirect);
    }

    let auth = app_state.auth(None, None).await?;
    let view = match create_feed_item(&auth, &item).await {
        Ok(()) => {
            info!("✅ Feed item 提交成功: {}", item.account_id);
            View::Message { message: messages::FEED_ITEM_POSTED.to_string() }
        }
        Err(e) => {
            warn!("⚠️ Feed item 提交失败 ({}): {}", e.kind(), e);
            View::provider_error(Page::FeedItem, &e)
        }
    };
    app_state.render(view)
}
