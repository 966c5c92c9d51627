//! 路由配置模块
//!
//! 组织和配置所有HTTP路由

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::auth::{MonzoAuth, PendingStates};
use crate::infrastructure::{Config, SharedCredentialStore};
use crate::presentation::handlers;
use crate::presentation::views::{View, Views};
use crate::shared::constants::routes;
use crate::shared::{AppError, AppResult};

/// 应用上下文，由 main 显式构建后传入每个处理器
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: SharedCredentialStore,
    pub views: Arc<Views>,
    pub http_client: reqwest::Client,
    pub oauth_states: Arc<PendingStates>,
}

impl AppState {
    pub fn new(config: Config, credentials: SharedCredentialStore) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.monzo.timeout_seconds))
            .user_agent(concat!("monzo-viewer-rust/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            credentials,
            views: Arc::new(Views::new()?),
            http_client,
            oauth_states: Arc::new(PendingStates::new()),
        })
    }

    /// 构建认证上下文；参数为空时使用已保存的凭据
    pub async fn auth(&self, client_id: Option<&str>, client_secret: Option<&str>) -> AppResult<MonzoAuth> {
        MonzoAuth::build(
            self.http_client.clone(),
            &self.config.monzo,
            self.credentials.clone(),
            client_id,
            client_secret,
        )
        .await
    }

    /// 渲染页面
    pub fn render(&self, view: View) -> AppResult<Response> {
        Ok(self.views.render(&view)?.into_response())
    }
}

/// 创建应用路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route(routes::INDEX, get(handlers::index::index))
        .route(routes::ACCOUNTS, get(handlers::accounts::list_accounts))
        .route(
            routes::FEED_ITEM,
            get(handlers::feed_item::feed_item_form).post(handlers::feed_item::post_feed_item),
        )
        .route(routes::TRANSACTIONS, post(handlers::transactions::transactions_for_account))
        .route(
            routes::RAW_REQUEST,
            get(handlers::raw_request::raw_request_form).post(handlers::raw_request::post_raw_request),
        )
        // 回调地址登记时不带结尾斜杠，两种形式都接受
        .route(
            routes::SETUP,
            get(handlers::setup::setup_form).post(handlers::setup::post_setup),
        )
        .route(
            routes::SETUP.trim_end_matches('/'),
            get(handlers::setup::setup_form).post(handlers::setup::post_setup),
        )
        .route(routes::SETUP_CALLBACK, get(handlers::setup::setup_callback))
        .route(
            routes::SETUP_CALLBACK.trim_end_matches('/'),
            get(handlers::setup::setup_callback),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
