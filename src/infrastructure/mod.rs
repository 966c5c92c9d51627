//! 基础设施层模块
//!
//! 负责配置管理与凭据持久化

pub mod config;
pub mod storage;

// 重新导出常用类型
pub use config::Config;
pub use storage::{
    CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore,
    SharedCredentialStore, TokenSet,
};
