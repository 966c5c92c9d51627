//! Monzo 交易记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::utils::format_amount;

/// 商户信息（expand[]=merchant 时返回）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// 商户字段：未展开时只有 id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MerchantRef {
    Expanded(Merchant),
    Id(String),
}

impl MerchantRef {
    pub fn display_name(&self) -> &str {
        match self {
            MerchantRef::Expanded(m) => m.name.as_deref().unwrap_or(&m.id),
            MerchantRef::Id(id) => id,
        }
    }
}

/// 交易记录（只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    /// 最小货币单位
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub settled: Option<String>,
    #[serde(default)]
    pub decline_reason: Option<String>,
    #[serde(default)]
    pub merchant: Option<MerchantRef>,
}

impl Transaction {
    pub fn amount_display(&self) -> String {
        format_amount(self.amount, self.currency.as_deref().unwrap_or(""))
            .trim_end()
            .to_string()
    }

    pub fn merchant_name(&self) -> Option<&str> {
        self.merchant.as_ref().map(MerchantRef::display_name)
    }

    pub fn is_declined(&self) -> bool {
        self.decline_reason.is_some()
    }
}

/// `GET /transactions` 响应
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchant_expanded_or_id() {
        let list: TransactionList = serde_json::from_value(serde_json::json!({
            "transactions": [
                {
                    "id": "tx_1",
                    "account_id": "acc_1",
                    "amount": -510,
                    "currency": "GBP",
                    "created": "2024-02-01T10:00:00.000Z",
                    "merchant": {"id": "merch_1", "name": "The De Beauvoir Deli Co.", "emoji": "🍞"}
                },
                {
                    "id": "tx_2",
                    "amount": 2000,
                    "currency": "GBP",
                    "created": "2024-02-02T10:00:00Z",
                    "merchant": "merch_2",
                    "decline_reason": "INSUFFICIENT_FUNDS"
                },
                {
                    "id": "tx_3",
                    "amount": 1,
                    "created": "2024-02-03T10:00:00Z",
                    "merchant": null
                }
            ]
        }))
        .unwrap();

        assert_eq!(list.transactions[0].merchant_name(), Some("The De Beauvoir Deli Co."));
        assert_eq!(list.transactions[0].amount_display(), "-5.10 GBP");
        assert_eq!(list.transactions[1].merchant_name(), Some("merch_2"));
        assert!(list.transactions[1].is_declined());
        assert_eq!(list.transactions[2].merchant_name(), None);
        assert_eq!(list.transactions[2].amount_display(), "0.01");
    }
}
