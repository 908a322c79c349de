//! Q&A Server - Rust Backend
//!
//! 使用 axum 框架构建的问答服务，接收问题并转发给外部回答服务。

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod answer;
mod api;
mod config;
mod error;
mod models;
mod state;

use answer::KarmaClient;
use api::create_api_routes;
use config::AppConfig;
use state::create_shared_state;

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qa_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Q&A Server backend...");

    // 加载配置
    let config = AppConfig::load();
    if config.api_key.is_empty() {
        warn!("API key not configured; /api/question will fail until config.json provides one");
    }

    // 创建回答服务客户端和共享状态
    let provider = Arc::new(KarmaClient::new(&config).expect("failed to build answer client"));
    let state = create_shared_state(provider);

    // 配置 CORS（允许所有来源）
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 构建路由
    let app = Router::new()
        .merge(create_api_routes(Arc::clone(&state)))
        .layer(cors);

    // 绑定地址（默认 0.0.0.0:5000）
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid host/port in config");
    info!("Server listening on: {}", addr);

    // 启动服务器
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
