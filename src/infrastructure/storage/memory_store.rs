//! 内存凭据存储（测试及临时运行使用）

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialStore, Credentials};
use crate::shared::AppResult;

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// 仅包含 client 信息的存储
    pub fn configured(client_id: &str, client_secret: &str) -> Self {
        Self::new(Credentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            ..Credentials::default()
        })
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> AppResult<Credentials> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> AppResult<()> {
        *self.credentials.write().await = credentials.clone();
        Ok(())
    }
}
