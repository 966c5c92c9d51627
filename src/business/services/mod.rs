//! 业务服务模块
//!
//! 对 Monzo API 的类型化封装

pub mod accounts;
pub mod feed_items;
pub mod raw_request;
pub mod transactions;

pub use accounts::{fetch_accounts, filter_accounts};
pub use feed_items::create_feed_item;
pub use raw_request::{format_records, get_raw_request};
pub use transactions::fetch_transactions;
