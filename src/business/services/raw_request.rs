//! 原始请求服务

use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::auth::oauth::{ApiRequest, MonzoAuth};
use crate::shared::ProviderError;

/// 执行原始请求，返回响应中的数据
///
/// 上游错误不会向上抛出，而是替换为带 `message` 的对象
#[instrument(skip(auth, request), fields(method = %request.method, path = %request.path))]
pub async fn get_raw_request(auth: &MonzoAuth, request: ApiRequest) -> Value {
    match auth.make_request(request).await {
        Ok(response) => response.data,
        Err(e) => {
            warn!("⚠️ 原始请求失败 ({}): {}", e.kind(), e);
            json!({ "message": substitute_message(&e) })
        }
    }
}

/// 上游错误对应的替换信息
pub fn substitute_message(error: &ProviderError) -> &'static str {
    match error {
        ProviderError::Permissions(_) => "The request resulted in a permissions error.",
        ProviderError::Http { .. } => "The request appears invalid.",
        ProviderError::Authentication(_) => "The request could not be authenticated.",
        ProviderError::NotConfigured => "The client ID and secret have not been configured.",
        ProviderError::Server(_) | ProviderError::Network(_) => "The Monzo API could not be reached.",
        ProviderError::Decode(_) => "The Monzo API returned an unexpected response.",
    }
}

/// 格式化结果：缩进 4 个空格、键名排序
pub fn format_records(records: &Value) -> String {
    let records = sort_keys(records.clone());
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    match serde::Serialize::serialize(&records, &mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        Err(_) => records.to_string(),
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
