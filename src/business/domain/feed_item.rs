//! Feed item（只写：提交到用户的 Monzo 时间线）

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::constants::{
    accounts::PLACEHOLDER,
    feed_item::{FEED_TYPE_BASIC, OPTIONAL_PARAMETERS},
};
use crate::shared::utils::escape_html;
use crate::shared::{AppError, AppResult};

/// Feed item 类型，目前 Monzo 只支持 basic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    Basic,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::Basic => FEED_TYPE_BASIC,
        }
    }
}

/// 待提交的 feed item，所有文本字段均已转义
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub account_id: String,
    pub feed_type: FeedType,
    pub title: String,
    /// body / 颜色 / image_url 等可选参数
    pub params: Vec<(String, String)>,
    /// 点击后打开的地址
    pub url: Option<String>,
}

impl FeedItem {
    /// 从表单构建；title 与 account 为必填项
    pub fn from_form(form: &HashMap<String, String>) -> AppResult<Self> {
        let title = escaped_field(form, "title");
        let account_id = escaped_field(form, "account").filter(|a| a != PLACEHOLDER);

        let (title, account_id) = match (title, account_id) {
            (Some(title), Some(account_id)) => (title, account_id),
            _ => {
                return Err(AppError::Validation(
                    "A title and an account are required.".to_string(),
                ))
            }
        };

        let params = OPTIONAL_PARAMETERS
            .iter()
            .filter_map(|name| escaped_field(form, name).map(|v| (name.to_string(), v)))
            .collect();

        Ok(Self {
            account_id,
            feed_type: FeedType::Basic,
            title,
            params,
            url: escaped_field(form, "feed_item_url"),
        })
    }

    /// `POST /feed` 表单字段
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("account_id".to_string(), self.account_id.clone()),
            ("type".to_string(), self.feed_type.as_str().to_string()),
            ("params[title]".to_string(), self.title.clone()),
        ];
        for (name, value) in &self.params {
            form.push((format!("params[{}]", name), value.clone()));
        }
        if let Some(url) = &self.url {
            form.push(("url".to_string(), url.clone()));
        }
        form
    }
}

/// 取出非空字段并转义
fn escaped_field(form: &HashMap<String, String>, name: &str) -> Option<String> {
    form.get(name)
        .map(|v| escape_html(v.trim()))
        .filter(|v| !v.is_empty())
}
