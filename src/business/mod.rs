//! 业务逻辑层模块
//!
//! 包含领域模型与 Monzo API 服务封装

pub mod domain;
pub mod services;

// 重新导出常用类型
pub use domain::*;
pub use services::*;
