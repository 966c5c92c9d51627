//! 认证模块
//!
//! 提供 Monzo 认证适配层

pub mod oauth;

// 重新导出常用类型
pub use oauth::{ApiRequest, ApiResponse, HttpMethod, MonzoAuth, PendingStates};
