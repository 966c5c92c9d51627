//! OAuth 授权会话管理
//!
//! 记录发起授权时生成的 state，回调时取出校验

use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::shared::constants::oauth::STATE_LENGTH;

/// 生成随机的 state 参数
pub fn generate_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// 待完成的授权会话
///
/// 单用户场景下只保留最近一次发起的 state
#[derive(Debug, Default)]
pub struct PendingStates {
    current: Mutex<Option<String>>,
}

impl PendingStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成并记录新的 state，覆盖之前未完成的会话
    pub async fn issue(&self) -> String {
        let state = generate_state();
        let mut current = self.current.lock().await;
        if current.is_some() {
            warn!("⚠️ 覆盖尚未完成的授权会话");
        }
        *current = Some(state.clone());
        info!("✅ OAuth 会话已创建");
        state
    }

    /// 取出（并清除）当前 state
    pub async fn take(&self) -> Option<String> {
        self.current.lock().await.take()
    }
}
