//! 账号服务

use tracing::{info, instrument};

use crate::auth::oauth::{ApiRequest, MonzoAuth};
use crate::business::domain::{Account, AccountList};
use crate::shared::ProviderResult;

/// 获取账号列表
///
/// `all_accounts` 为 false 时排除无法返回交易记录的贷款类账号
#[instrument(skip(auth))]
pub async fn fetch_accounts(auth: &MonzoAuth, all_accounts: bool) -> ProviderResult<Vec<Account>> {
    let response = auth.make_request(ApiRequest::get("/accounts")).await?;
    let list: AccountList = serde_json::from_value(response.data)?;

    let accounts = filter_accounts(list.accounts, all_accounts);
    info!("✅ 获取账号列表成功: {} 个账号", accounts.len());
    Ok(accounts)
}

/// 账号过滤规则（按类型显示名称匹配）
pub fn filter_accounts(accounts: Vec<Account>, all_accounts: bool) -> Vec<Account> {
    if all_accounts {
        return accounts;
    }
    accounts
        .into_iter()
        .filter(Account::supports_transactions)
        .collect()
}
