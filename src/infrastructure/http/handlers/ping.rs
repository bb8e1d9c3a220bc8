//! Ping Handler
//!
//! 存活检查，同时探测存储连通性

use axum::{extract::State, Json};
use http::StatusCode;
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> (StatusCode, Json<PingResponse>) {
    match state.todo_repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(PingResponse {
                status: "ok",
                database: "up",
                version: env!("CARGO_PKG_VERSION"),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(PingResponse {
                    status: "error",
                    database: "down",
                    version: env!("CARGO_PKG_VERSION"),
                }),
            )
        }
    }
}
