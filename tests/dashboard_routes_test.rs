//! 账号 / feed item / 交易记录 / 原始请求 路由集成测试

mod common;

use chrono::{Duration, Utc};
use std::collections::HashMap;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::*;
use monzo_viewer_rust::infrastructure::{CredentialStore, Credentials};

async fn mount_accounts(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn test_accounts_lists_every_account() {
    let app = spawn_app(authorised_credentials()).await;
    mount_accounts(&app).await;

    let html = page(app.get("/accounts").await).await;
    assert!(html.contains("Current Account"));
    assert!(html.contains("Jane Doe"));
    assert!(html.contains("acc_flex"));
    assert!(html.contains("Loan (Flex)"));
    assert!(html.contains("acc_loan"));
}

#[tokio::test]
async fn test_accounts_permissions_error() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "code": "forbidden.insufficient_permissions",
            "message": "Access forbidden due to insufficient permissions"
        })))
        .mount(&app.server)
        .await;

    let html = page(app.get("/accounts").await).await;
    assert!(html.contains("The request resulted in a permissions error."));
}

#[tokio::test]
async fn test_feed_item_form_excludes_loans() {
    let app = spawn_app(authorised_credentials()).await;
    mount_accounts(&app).await;

    let html = page(app.get("/feed_item").await).await;
    assert!(html.contains("Please Select"));
    assert!(html.contains("acc_current"));
    assert!(html.contains("acc_flex\""));
    assert!(!html.contains("acc_flexloan"));
    assert!(!html.contains("acc_loan"));
}

#[tokio::test]
async fn test_feed_item_posts_escaped_fields() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("POST"))
        .and(path("/feed"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(
        app.post_form(
            "/feed_item",
            &[
                ("account", "acc_current"),
                ("title", "<b>Hello</b>"),
                ("body", "Tom & Jerry"),
                ("image_url", ""),
                ("feed_item_url", "https://monzo.com"),
            ],
        )
        .await,
    )
    .await;
    assert!(html.contains("Feed item posted successfully."));

    let requests = app.server.received_requests().await.unwrap();
    let sent: HashMap<String, String> = url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect();
    assert_eq!(sent["account_id"], "acc_current");
    assert_eq!(sent["type"], "basic");
    assert_eq!(sent["params[title]"], "&lt;b&gt;Hello&lt;/b&gt;");
    assert_eq!(sent["params[body]"], "Tom &amp; Jerry");
    assert_eq!(sent["url"], "https://monzo.com");
    assert!(!sent.contains_key("params[image_url]"));
    app.server.verify().await;
}

#[tokio::test]
async fn test_feed_item_requires_title_and_account() {
    let app = spawn_app(authorised_credentials()).await;

    for fields in [
        vec![("account", "acc_current"), ("title", "")],
        vec![("account", "Please Select"), ("title", "Hello")],
        vec![("title", "Hello")],
    ] {
        let html = page(app.post_form("/feed_item", &fields).await).await;
        assert!(html.contains("A title and an account are required."));
    }
    assert_eq!(app.upstream_calls().await, 0);
}

#[tokio::test]
async fn test_feed_item_rejected_request() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("POST"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": "bad_request.bad_param.url",
            "message": "Invalid url"
        })))
        .mount(&app.server)
        .await;

    let html = page(
        app.post_form("/feed_item", &[("account", "acc_current"), ("title", "Hi")])
            .await,
    )
    .await;
    assert!(html.contains("The Monzo API did not understand the request."));
}

#[tokio::test]
async fn test_transactions_without_account() {
    let app = spawn_app(authorised_credentials()).await;

    for fields in [vec![("account", "Please Select")], vec![("account", "  ")], vec![]] {
        let html = page(app.post_form("/transactions", &fields).await).await;
        assert!(html.contains("No account specified."));
    }
    assert_eq!(app.upstream_calls().await, 0);
}

#[tokio::test]
async fn test_transactions_for_account() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("account_id", "acc_current"))
        .and(query_param("expand[]", "merchant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": [
                {
                    "id": "tx_1",
                    "account_id": "acc_current",
                    "amount": -1234,
                    "currency": "GBP",
                    "created": "2026-10-01T12:30:00.000Z",
                    "description": "TESCO STORES",
                    "category": "groceries",
                    "merchant": {"id": "merch_1", "name": "Tesco"}
                },
                {
                    "id": "tx_2",
                    "amount": 5000,
                    "currency": "GBP",
                    "created": "2026-10-02T08:00:00Z",
                    "description": "Salary",
                    "merchant": null
                }
            ]
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(app.post_form("/transactions", &[("account", "acc_current")]).await).await;
    assert!(html.contains("Transactions for acc_current"));
    assert!(html.contains("Tesco"));
    assert!(html.contains("-12.34 GBP"));
    assert!(html.contains("50.00 GBP"));

    let requests = app.server.received_requests().await.unwrap();
    let query: HashMap<String, String> = requests[0].url.query_pairs().into_owned().collect();
    let since = chrono::DateTime::parse_from_rfc3339(&query["since"])
        .unwrap()
        .with_timezone(&Utc);
    let window = Utc::now().signed_duration_since(since);
    assert!(window >= Duration::days(30) && window < Duration::days(31));
    app.server.verify().await;
}

#[tokio::test]
async fn test_transactions_permissions_error() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&app.server)
        .await;

    let html = page(app.post_form("/transactions", &[("account", "acc_loan")]).await).await;
    assert!(html.contains("The API returned a permissions issue."));
}

#[tokio::test]
async fn test_transactions_reflects_escaped_account() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": []
        })))
        .mount(&app.server)
        .await;

    let html = page(
        app.post_form("/transactions", &[("account", "<script>alert(1)</script>")])
            .await,
    )
    .await;
    assert!(html.contains("Transactions for &lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));

    let requests = app.server.received_requests().await.unwrap();
    let query: HashMap<String, String> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(query["account_id"], "&lt;script&gt;alert(1)&lt;/script&gt;");
}

#[tokio::test]
async fn test_raw_request_form() {
    let app = spawn_app(authorised_credentials()).await;
    let html = page(app.get("/raw_request").await).await;
    assert!(html.contains("name=\"request_type\""));
    assert!(html.contains("name=\"authenticated\""));
}

#[tokio::test]
async fn test_raw_request_defaults_to_authenticated_get() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/ping/whoami"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": "user_1",
            "authenticated": true
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(app.post_form("/raw_request", &[("path", "/ping/whoami")]).await).await;
    let authenticated = html.find("authenticated").unwrap();
    let user_id = html.find("user_1").unwrap();
    assert!(authenticated < user_id);
    assert!(html.contains("{\n    &quot;authenticated&quot;: true,\n    &quot;user_id&quot;"));
    app.server.verify().await;
}

#[tokio::test]
async fn test_raw_request_unauthenticated_post() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("POST"))
        .and(path("/webhooks"))
        .and(body_string_contains("account_id=acc_current"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(
        app.post_form(
            "/raw_request",
            &[
                ("path", "/webhooks"),
                ("request_type", "post"),
                ("authenticated", "false"),
                ("headers", "{\"X-Trace\": \"abc\"}"),
                ("parameters", "{\"account_id\": \"acc_current\"}"),
            ],
        )
        .await,
    )
    .await;
    assert!(html.contains("&quot;ok&quot;: true"));

    let requests = app.server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(requests[0].headers.get("x-trace").unwrap(), "abc");
    app.server.verify().await;
}

#[tokio::test]
async fn test_raw_request_invalid_json() {
    let app = spawn_app(authorised_credentials()).await;

    for (field, value) in [("headers", "{not json"), ("parameters", "[1, 2]")] {
        let response = app
            .post_form("/raw_request", &[("path", "/ping/whoami"), (field, value)])
            .await;
        let html = page(response).await;
        assert!(html.contains("class=\"error\""), "{}", field);
    }
    assert_eq!(app.upstream_calls().await, 0);
}

#[tokio::test]
async fn test_raw_request_substitutes_errors() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/pots"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&app.server)
        .await;

    let html = page(app.post_form("/raw_request", &[("path", "/pots")]).await).await;
    assert!(html.contains("The request resulted in a permissions error."));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_stored() {
    let credentials = Credentials {
        expiry: Some(Utc::now() - Duration::minutes(5)),
        ..authorised_credentials()
    };
    let app = spawn_app(credentials).await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains(format!("refresh_token={}", REFRESH_TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh-access",
            "refresh_token": "fresh-refresh",
            "expires_in": 21600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(accounts_body()))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(app.get("/accounts").await).await;
    assert!(html.contains("acc_current"));

    let stored = app.store.load().await.unwrap();
    assert_eq!(stored.access_token.as_deref(), Some("fresh-access"));
    assert_eq!(stored.refresh_token.as_deref(), Some("fresh-refresh"));
    assert!(stored.expiry.unwrap() > Utc::now());
    app.server.verify().await;
}

#[tokio::test]
async fn test_raw_request_path_keeps_query_string() {
    let app = spawn_app(authorised_credentials()).await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .and(query_param("account_id", "acc_1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactions": []
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let html = page(
        app.post_form("/raw_request", &[("path", "/transactions?account_id=acc_1&limit=5")])
            .await,
    )
    .await;
    assert!(html.contains("&quot;transactions&quot;: []"));

    let requests = app.server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("account_id=acc_1&limit=5"));
    app.server.verify().await;
}

#[tokio::test]
async fn test_raw_request_validation_message() {
    let app = spawn_app(authorised_credentials()).await;
    let html = page(
        app.post_form("/raw_request", &[("path", "/ping/whoami"), ("parameters", "[1]")])
            .await,
    )
    .await;
    assert!(html.contains("The parameters field must be a JSON object."));
    assert_eq!(app.upstream_calls().await, 0);
}
