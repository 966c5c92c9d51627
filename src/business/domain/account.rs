//! Monzo 账号

use serde::{Deserialize, Serialize};

use crate::shared::constants::accounts::EXCLUDED_ACCOUNT_TYPES;

/// 账号所有者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountOwner {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default)]
    pub preferred_first_name: Option<String>,
}

/// Monzo 账号（只读，每次请求时获取）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub sort_code: Option<String>,
    #[serde(default)]
    pub owners: Vec<AccountOwner>,
}

impl Account {
    /// 账号类型显示名称
    pub fn account_type_name(&self) -> &str {
        match self.account_type.as_str() {
            "uk_retail" => "Current Account",
            "uk_retail_joint" => "Joint Current Account",
            "uk_prepaid" => "Prepaid",
            "uk_monzo_flex" => "Flex",
            "uk_monzo_flex_backing_loan" => "Loan (Flex)",
            "uk_loan" => "Loan",
            "uk_rewards" => "Rewards",
            other => other,
        }
    }

    /// 该类型账号能否返回交易记录
    pub fn supports_transactions(&self) -> bool {
        !EXCLUDED_ACCOUNT_TYPES.contains(&self.account_type_name())
    }

    /// 所有者名称，多个以逗号分隔
    pub fn owner_names(&self) -> String {
        self.owners
            .iter()
            .filter_map(|o| o.preferred_name.as_deref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// `GET /accounts` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct AccountList {
    #[serde(default)]
    pub accounts: Vec<Account>,
}
