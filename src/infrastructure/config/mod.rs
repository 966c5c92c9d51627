use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub monzo: MonzoConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonzoConfig {
    pub api_url: String,
    pub auth_url: String,
    /// 必须与 Monzo 开发者后台登记的回调地址完全一致
    pub redirect_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub credentials_file: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        // 从环境变量加载配置
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let config = Config {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.server.port),
                host: env::var("HOST")
                    .unwrap_or(defaults.server.host),
            },

            monzo: MonzoConfig {
                api_url: env::var("MONZO_API_URL")
                    .unwrap_or(defaults.monzo.api_url),
                auth_url: env::var("MONZO_AUTH_URL")
                    .unwrap_or(defaults.monzo.auth_url),
                redirect_url: env::var("REDIRECT_URL")
                    .unwrap_or(defaults.monzo.redirect_url),
                timeout_seconds: env::var("MONZO_TIMEOUT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.monzo.timeout_seconds),
            },

            storage: StorageConfig {
                credentials_file: env::var("CREDENTIALS_FILE")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.credentials_file),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// 检查 URL 类配置项是否可解析
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("MONZO_API_URL", &self.monzo.api_url),
            ("MONZO_AUTH_URL", &self.monzo.auth_url),
            ("REDIRECT_URL", &self.monzo.redirect_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| anyhow::anyhow!("{} 不是有效的URL ({}): {}", name, value, e))?;
        }
        Ok(())
    }

    /// 监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 5000,
                host: "127.0.0.1".to_string(),
            },
            monzo: MonzoConfig {
                api_url: "https://api.monzo.com".to_string(),
                auth_url: "https://auth.monzo.com".to_string(),
                redirect_url: "http://127.0.0.1:5000/setup/callback".to_string(),
                timeout_seconds: 30,
            },
            storage: StorageConfig {
                credentials_file: PathBuf::from("monzo.json"),
            },
        }
    }
}
