//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping          GET     健康检查
//! - /api/todos         GET     列出所有待办事项
//! - /api/todos         POST    创建待办事项
//! - /api/todos/:id     PUT     切换完成状态
//! - /api/todos/:id     DELETE  删除待办事项

use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use super::error::ApiError;
use super::handlers;
use super::middleware::rate_limit_middleware;
use super::rate_limit::RateLimiter;
use super::state::AppState;

/// 创建所有路由
///
/// 传入 limiter 时对 /api 下所有请求限流
pub fn create_routes(limiter: Option<Arc<RateLimiter>>) -> Router<Arc<AppState>> {
    let api = match limiter {
        Some(limiter) => api_routes().layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        )),
        None => api_routes(),
    };

    Router::new().nest("/api", api)
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/:id",
            put(handlers::toggle_todo).delete(handlers::delete_todo),
        )
        // 未匹配的 /api 路径也要经过限流层
        .fallback(api_not_found)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
