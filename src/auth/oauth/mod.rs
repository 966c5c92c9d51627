//! OAuth 认证模块
//!
//! Monzo 的授权码流程、令牌刷新与带认证的 API 调用

pub mod core;
pub mod session;
pub mod types;

pub use self::core::MonzoAuth;
pub use session::{generate_state, PendingStates};
pub use types::*;
