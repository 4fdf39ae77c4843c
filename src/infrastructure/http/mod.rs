//! HTTP Layer - 触发入口
//!
//! 把 HTTP 请求当作一次函数调用：解析 → 生成 → 归档 → 固定信封

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
