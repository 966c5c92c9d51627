//! 集成测试公共工具

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

use monzo_viewer_rust::infrastructure::{Credentials, MemoryCredentialStore};
use monzo_viewer_rust::{create_routes, AppState, Config};

pub const CLIENT_ID: &str = "oauth2client_00009abc";
pub const CLIENT_SECRET: &str = "mnzconf.secret";
pub const ACCESS_TOKEN: &str = "access-token";
pub const REFRESH_TOKEN: &str = "refresh-token";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCredentialStore>,
    pub server: MockServer,
}

/// 已授权、令牌未过期的凭据
pub fn authorised_credentials() -> Credentials {
    Credentials {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        access_token: Some(ACCESS_TOKEN.to_string()),
        refresh_token: Some(REFRESH_TOKEN.to_string()),
        expiry: Some(Utc::now() + Duration::hours(6)),
    }
}

pub async fn spawn_app(credentials: Credentials) -> TestApp {
    let server = MockServer::start().await;

    let mut config = Config::default();
    config.monzo.api_url = server.uri();
    config.monzo.auth_url = "https://auth.monzo.test".to_string();
    config.monzo.timeout_seconds = 5;

    let store = Arc::new(MemoryCredentialStore::new(credentials));
    let state = AppState::new(config, store.clone()).expect("构建应用上下文失败");

    TestApp {
        router: create_routes(state),
        store,
        server,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// 上游收到的请求数
    pub async fn upstream_calls(&self) -> usize {
        self.server.received_requests().await.map(|r| r.len()).unwrap_or(0)
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// 断言为 200 页面并返回内容
pub async fn page(response: Response) -> String {
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("缺少 Location 头")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn accounts_body() -> serde_json::Value {
    serde_json::json!({
        "accounts": [
            {"id": "acc_current", "type": "uk_retail", "description": "user_1", "closed": false,
             "owners": [{"user_id": "user_1", "preferred_name": "Jane Doe"}]},
            {"id": "acc_flex", "type": "uk_monzo_flex", "description": "Flex", "closed": false},
            {"id": "acc_flexloan", "type": "uk_monzo_flex_backing_loan", "description": "Flex loan", "closed": false},
            {"id": "acc_loan", "type": "uk_loan", "description": "Loan", "closed": false}
        ]
    })
}
