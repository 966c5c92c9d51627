//! 领域模型模块
//!
//! Monzo API 返回或接收的数据结构

pub mod account;
pub mod feed_item;
pub mod raw_request;
pub mod transaction;

pub use account::{Account, AccountList, AccountOwner};
pub use feed_item::{FeedItem, FeedType};
pub use raw_request::RawRequest;
pub use transaction::{Merchant, MerchantRef, Transaction, TransactionList};
