//! 表示层模块
//!
//! 负责HTTP请求处理、路由管理与页面渲染

pub mod handlers;
pub mod routes;
pub mod views;

// 重新导出路由创建函数
pub use routes::{create_routes, AppState};
