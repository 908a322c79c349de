//! 存活检查端点

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;
use std::sync::Arc;

/// 存活检查处理器
///
/// 固定返回运行信息，不依赖任何其他状态
async fn health_check() -> Json<Value> {
    Json(json!({
        "message": "Q&A Server is running!"
    }))
}

/// 创建存活检查路由
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}
