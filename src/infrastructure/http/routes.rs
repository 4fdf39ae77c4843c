//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping             GET   健康检查
//! - /api/blog/generate    POST  以请求 JSON 触发生成
//! - /api/invoke           POST  以网关事件 `{"body": "..."}` 触发生成

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/invoke", post(handlers::invoke))
        .nest("/blog", blog_routes())
}

/// Blog 路由
fn blog_routes() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(handlers::generate_blog))
}
