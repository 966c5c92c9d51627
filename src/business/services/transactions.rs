//! 交易记录服务

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument};

use crate::auth::oauth::{ApiRequest, MonzoAuth};
use crate::business::domain::{Transaction, TransactionList};
use crate::shared::ProviderResult;

/// 获取账号在 `since` 之后的交易记录
#[instrument(skip(auth))]
pub async fn fetch_transactions(
    auth: &MonzoAuth,
    account_id: &str,
    since: DateTime<Utc>,
    expand: &[&str],
) -> ProviderResult<Vec<Transaction>> {
    let mut request = ApiRequest::get("/transactions")
        .param("account_id", account_id)
        .param("since", since.to_rfc3339_opts(SecondsFormat::Secs, true));
    for field in expand {
        request = request.param("expand[]", *field);
    }

    let response = auth.make_request(request).await?;
    let list: TransactionList = serde_json::from_value(response.data)?;

    info!("✅ 获取交易记录成功: {} 条", list.transactions.len());
    Ok(list.transactions)
}
