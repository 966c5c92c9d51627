//! 页面提示信息
//!
//! 每个路由上游错误类型对应的提示文本

use crate::shared::ProviderError;

pub const PERMISSIONS_ERROR: &str = "The request resulted in a permissions error.";
pub const NOT_UNDERSTOOD: &str = "The Monzo API did not understand the request.";
pub const NO_ACCOUNT: &str = "No account specified.";
pub const TRANSACTIONS_PERMISSIONS: &str = "The API returned a permissions issue. Either the token has expired or the account cannot return transactions.";
pub const SETUP_MISSING_FIELDS: &str = "Ensure you enter both a Client ID and a Client Secret.";
pub const MISSING_PARAMETERS: &str = "Missing parameters.";
pub const AUTHENTICATION_ERROR: &str = "Monzo authentication error.";
pub const SERVER_ERROR: &str = "Monzo server error.";
pub const FEED_ITEM_POSTED: &str = "Feed item posted successfully.";
pub const NOT_CONFIGURED: &str = "The client ID and secret have not been configured.";
pub const UNEXPECTED_RESPONSE: &str = "The Monzo API returned an unexpected response.";

/// 产生上游调用的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Accounts,
    FeedItem,
    Transactions,
    SetupCallback,
}

/// 根据页面与错误类型选择提示信息
pub fn provider_error_message(page: Page, error: &ProviderError) -> &'static str {
    match (page, error) {
        (Page::Transactions, ProviderError::Permissions(_)) => TRANSACTIONS_PERMISSIONS,
        (_, ProviderError::Permissions(_)) => PERMISSIONS_ERROR,
        (_, ProviderError::Http { .. }) => NOT_UNDERSTOOD,
        (_, ProviderError::Authentication(_)) => AUTHENTICATION_ERROR,
        (_, ProviderError::Server(_)) | (_, ProviderError::Network(_)) => SERVER_ERROR,
        (_, ProviderError::NotConfigured) => NOT_CONFIGURED,
        (_, ProviderError::Decode(_)) => UNEXPECTED_RESPONSE,
    }
}
