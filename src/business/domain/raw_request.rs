//! 原始请求：由用户在表单中自行构造的 Monzo API 调用
//!
//! path / headers / parameters 原样转发，headers 与 parameters 是任意 JSON 对象，不做结构校验

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::auth::oauth::{ApiRequest, HttpMethod};
use crate::shared::utils::parse_flag;
use crate::shared::AppResult;
use crate::validation_error;

/// 原始请求
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    pub path: String,
    pub method: HttpMethod,
    pub headers: Map<String, Value>,
    pub parameters: Map<String, Value>,
    pub authenticated: bool,
}

impl RawRequest {
    /// 从表单构建
    ///
    /// 请求方法读取 `request_type`，与 `authenticated` 相互独立；
    /// path 原样转发（不回显到页面），可携带查询字符串
    pub fn from_form(form: &HashMap<String, String>) -> AppResult<Self> {
        let path = form
            .get("path")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "/".to_string());

        let method = match form.get("request_type").map(|m| m.trim()).filter(|m| !m.is_empty()) {
            Some(method) => method
                .parse::<HttpMethod>()
                .map_err(|e| validation_error!(e))?,
            None => HttpMethod::Get,
        };

        let authenticated = parse_flag(form.get("authenticated").map(String::as_str), true);

        Ok(Self {
            path,
            method,
            headers: json_object_field(form, "headers")?,
            parameters: json_object_field(form, "parameters")?,
            authenticated,
        })
    }

    /// 转换为 API 请求
    pub fn to_api_request(&self) -> AppResult<ApiRequest> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| validation_error!("Invalid header name: {}", name))?;
            let header_value = HeaderValue::from_str(&scalar_to_string(value))
                .map_err(|_| validation_error!("Invalid value for header {}", name))?;
            headers.insert(header_name, header_value);
        }

        let mut params = Vec::new();
        for (key, value) in &self.parameters {
            match value {
                Value::Array(items) => {
                    for item in items {
                        params.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => params.push((key.clone(), scalar_to_string(other))),
            }
        }

        Ok(ApiRequest {
            method: self.method,
            path: self.path.clone(),
            authenticated: self.authenticated,
            headers,
            params,
        })
    }
}

/// 字段缺失或为空时返回空对象；非法 JSON 或非对象直接报错
fn json_object_field(form: &HashMap<String, String>, name: &str) -> AppResult<Map<String, Value>> {
    let raw = match form.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw,
        None => return Ok(Map::new()),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(validation_error!("The {} field must be a JSON object.", name)),
        Err(e) => Err(validation_error!("The {} field is not valid JSON: {}", name, e)),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
