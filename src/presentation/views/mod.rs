//! 视图选择模块
//!
//! 将路由处理结果映射为 (模板名称, 上下文)，并使用 tera 渲染。
//! 模板在编译期嵌入，`.html` 模板默认开启自动转义；
//! 已经在表单边界转义过的回显字段在模板中以 `safe` 输出。

pub mod messages;

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

use crate::business::domain::{Account, Transaction};
use crate::shared::constants::{routes, transactions::WINDOW_DAYS};
use crate::shared::{AppResult, ProviderError};

pub use messages::{provider_error_message, Page};

const TEMPLATES: [(&str, &str); 11] = [
    ("base.html", include_str!("../../../templates/base.html")),
    ("index.html", include_str!("../../../templates/index.html")),
    ("accounts.html", include_str!("../../../templates/accounts.html")),
    ("feed_item_form.html", include_str!("../../../templates/feed_item_form.html")),
    ("message.html", include_str!("../../../templates/message.html")),
    ("error.html", include_str!("../../../templates/error.html")),
    ("transactions.html", include_str!("../../../templates/transactions.html")),
    ("raw_request.html", include_str!("../../../templates/raw_request.html")),
    ("raw_request_result.html", include_str!("../../../templates/raw_request_result.html")),
    ("setup.html", include_str!("../../../templates/setup.html")),
    ("success.html", include_str!("../../../templates/success.html")),
];

/// 首页链接
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub name: &'static str,
    pub url: &'static str,
}

pub fn index_links() -> Vec<Link> {
    vec![
        Link { name: "Accounts", url: routes::ACCOUNTS },
        Link { name: "Feed Item", url: routes::FEED_ITEM },
        Link { name: "Raw Request", url: routes::RAW_REQUEST },
    ]
}

/// 账号表格行
#[derive(Debug, Clone, Serialize)]
pub struct AccountRow {
    pub id: String,
    pub type_name: String,
    pub description: String,
    pub owners: String,
    pub sort_code: String,
    pub account_number: String,
    pub closed: bool,
    pub supports_transactions: bool,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            type_name: account.account_type_name().to_string(),
            description: account.description.clone().unwrap_or_default(),
            owners: account.owner_names(),
            sort_code: account.sort_code.clone().unwrap_or_default(),
            account_number: account.account_number.clone().unwrap_or_default(),
            closed: account.closed,
            supports_transactions: account.supports_transactions(),
        }
    }
}

/// 交易表格行
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub created: String,
    pub description: String,
    pub merchant: String,
    pub category: String,
    pub amount: String,
    pub notes: String,
    pub declined: bool,
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id.clone(),
            created: transaction.created.format("%Y-%m-%d %H:%M").to_string(),
            description: transaction.description.clone().unwrap_or_default(),
            merchant: transaction.merchant_name().unwrap_or_default().to_string(),
            category: transaction.category.clone().unwrap_or_default(),
            amount: transaction.amount_display(),
            notes: transaction.notes.clone().unwrap_or_default(),
            declined: transaction.is_declined(),
        }
    }
}

/// 可渲染的页面
#[derive(Debug, Clone)]
pub enum View {
    Index,
    Accounts { accounts: Vec<AccountRow> },
    FeedItemForm { accounts: Vec<AccountRow> },
    Message { message: String },
    Error { message: String },
    /// `account_id` 已转义
    Transactions { account_id: String, transactions: Vec<TransactionRow> },
    RawRequestForm,
    RawRequestResult { records: String },
    /// `client_id_value` / `client_secret_value` 已转义
    Setup {
        redirect_url: String,
        client_id_value: String,
        client_secret_value: String,
        message: Option<String>,
    },
    Success,
}

impl View {
    pub fn error(message: impl Into<String>) -> Self {
        View::Error { message: message.into() }
    }

    /// 上游错误对应的错误页
    pub fn provider_error(page: Page, error: &ProviderError) -> Self {
        View::error(provider_error_message(page, error))
    }

    pub fn accounts(accounts: &[Account]) -> Self {
        View::Accounts { accounts: accounts.iter().map(AccountRow::from).collect() }
    }

    pub fn feed_item_form(accounts: &[Account]) -> Self {
        View::FeedItemForm { accounts: accounts.iter().map(AccountRow::from).collect() }
    }

    pub fn transactions(account_id: &str, transactions: &[Transaction]) -> Self {
        View::Transactions {
            account_id: account_id.to_string(),
            transactions: transactions.iter().map(TransactionRow::from).collect(),
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            View::Index => "index.html",
            View::Accounts { .. } => "accounts.html",
            View::FeedItemForm { .. } => "feed_item_form.html",
            View::Message { .. } => "message.html",
            View::Error { .. } => "error.html",
            View::Transactions { .. } => "transactions.html",
            View::RawRequestForm => "raw_request.html",
            View::RawRequestResult { .. } => "raw_request_result.html",
            View::Setup { .. } => "setup.html",
            View::Success => "success.html",
        }
    }

    pub fn context(&self) -> Context {
        let mut context = Context::new();
        match self {
            View::Index => context.insert("links", &index_links()),
            View::Accounts { accounts } | View::FeedItemForm { accounts } => {
                context.insert("accounts", accounts)
            }
            View::Message { message } | View::Error { message } => context.insert("message", message),
            View::Transactions { account_id, transactions } => {
                context.insert("account_id", account_id);
                context.insert("transactions", transactions);
                context.insert("window_days", &WINDOW_DAYS);
            }
            View::RawRequestForm | View::Success => {}
            View::RawRequestResult { records } => context.insert("records", records),
            View::Setup { redirect_url, client_id_value, client_secret_value, message } => {
                context.insert("redirect_url", redirect_url);
                context.insert("client_id_value", client_id_value);
                context.insert("client_secret_value", client_secret_value);
                context.insert("message", message.as_deref().unwrap_or_default());
            }
        }
        context
    }
}

/// 模板渲染器
#[derive(Debug)]
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn render(&self, view: &View) -> AppResult<Html<String>> {
        let rendered = self.tera.render(view.template_name(), &view.context())?;
        Ok(Html(rendered))
    }
}
