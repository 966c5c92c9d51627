//! Monzo Viewer Rust 服务主入口

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monzo_viewer_rust::infrastructure::{FileCredentialStore, SharedCredentialStore};
use monzo_viewer_rust::{create_routes, AppState, Config};

/// 命令行参数（覆盖环境变量配置）
#[derive(Debug, Parser)]
#[command(name = "monzo-viewer-rust", version, about = "Personal Monzo dashboard")]
struct Cli {
    /// 监听地址
    #[arg(long)]
    host: Option<String>,

    /// 监听端口
    #[arg(long)]
    port: Option<u16>,

    /// 凭据文件路径
    #[arg(long)]
    credentials_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志 - 默认INFO等级
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "monzo_viewer_rust=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("🚀 启动 Monzo Viewer 服务");

    // 加载配置
    let mut config = Config::load()?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(path) = cli.credentials_file {
        config.storage.credentials_file = path;
    }
    info!("✅ 配置加载成功");

    let credentials: SharedCredentialStore =
        Arc::new(FileCredentialStore::new(&config.storage.credentials_file));
    info!("💾 凭据文件: {}", config.storage.credentials_file.display());
    info!("🔗 OAuth 回调地址: {}", config.monzo.redirect_url);

    let bind_address = config.bind_address();
    let state = AppState::new(config, credentials)?;
    let app = create_routes(state);
    info!("✅ 路由创建成功");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 服务器启动成功: http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("🛑 接收到关闭信号，正在优雅关闭服务器...");
        })
        .await?;

    Ok(())
}
