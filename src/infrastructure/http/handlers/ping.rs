//! Ping Handler
//!
//! 健康检查，附带分阶段流水线的可用状态

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::StagedCapability;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub staged_pipeline: StagedCapability,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        staged_pipeline: state.staged_capability.clone(),
    })
}
