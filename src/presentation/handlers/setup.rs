//! 初始设置与 OAuth 回调处理器

use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

use crate::auth::oauth::AuthorizationCallback;
use crate::presentation::routes::AppState;
use crate::presentation::views::{messages, Page, View};
use crate::shared::utils::escape_html;
use crate::shared::{AppError, AppResult};

/// 回调查询参数
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

impl CallbackParams {
    /// code 与 state 均存在且非空
    pub fn into_callback(self) -> Option<AuthorizationCallback> {
        match (self.code, self.state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Some(AuthorizationCallback { code, state })
            }
            _ => None,
        }
    }
}

fn setup_view(app_state: &AppState, client_id: String, client_secret: String, message: Option<&str>) -> View {
    View::Setup {
        redirect_url: app_state.config.monzo.redirect_url.clone(),
        client_id_value: client_id,
        client_secret_value: client_secret,
        message: message.map(str::to_string),
    }
}

/// 显示设置表单
#[instrument(skip(app_state))]
pub async fn setup_form(State(app_state): State<AppState>) -> AppResult<Response> {
    let view = setup_view(&app_state, String::new(), String::new(), None);
    app_state.render(view)
}

/// 保存 client 信息并跳转到 Monzo 授权页
#[instrument(skip(app_state, form))]
pub async fn post_setup(
    State(app_state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> AppResult<Response> {
    let field = |name: &str| escape_html(form.get(name).map(|v| v.trim()).unwrap_or_default());
    let client_id = field("client_id");
    let client_secret = field("client_secret");

    if client_id.is_empty() || client_secret.is_empty() {
        info!("⚠️ 设置表单缺少 client id 或 client secret");
        let view = setup_view(&app_state, client_id, client_secret, Some(messages::SETUP_MISSING_FIELDS));
        return app_state.render(view);
    }

    let credentials = app_state
        .credentials
        .set_client_details(&client_id, &client_secret)
        .await?;
    let auth = app_state
        .auth(Some(&credentials.client_id), Some(&credentials.client_secret))
        .await?;

    let state = app_state.oauth_states.issue().await;
    let url = auth.authorization_url(&state)?;
    info!("🔗 跳转到 Monzo 授权页 (client: {})", auth.client_id());
    Ok(Redirect::to(url.as_str()).into_response())
}

/// Monzo 授权回调：交换授权码
#[instrument(skip(app_state, params))]
pub async fn setup_callback(
    State(app_state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Response> {
    let callback = match params.into_callback() {
        Some(callback) => callback,
        None => {
            warn!("⚠️ 回调缺少 code 或 state");
            return app_state.render(View::error(messages::MISSING_PARAMETERS));
        }
    };

    let expected_state = app_state.oauth_states.take().await;
    let auth = app_state.auth(None, None).await?;
    match auth.exchange(&callback.code, &callback.state, expected_state.as_deref()).await {
        Ok(()) => app_state.render(View::Success),
        Err(AppError::Provider(e)) => {
            warn!("⚠️ 授权码交换失败 ({}): {}", e.kind(), e);
            app_state.render(View::provider_error(Page::SetupCallback, &e))
        }
        Err(e) => Err(e),
    }
}
