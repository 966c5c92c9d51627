//! Monzo Viewer Rust 服务
//!
//! 个人 Monzo 面板：授权、查看账号与交易、发布 feed item、发送原始 API 请求

// 核心模块
pub mod shared;          // 共享模块（错误处理、工具函数、常量）
pub mod infrastructure;  // 基础设施层（配置、凭据存储）
pub mod auth;            // Monzo 认证适配层
pub mod business;        // 业务逻辑层（领域模型、API 服务封装）
pub mod presentation;    // 表示层（HTTP处理、路由、视图）

// 重新导出核心类型
pub use infrastructure::Config;
pub use presentation::{create_routes, AppState};
pub use shared::{AppError, AppResult};
