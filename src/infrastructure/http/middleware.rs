//! HTTP Middleware
//!
//! - HTTP 状态码错误日志
//! - 按客户端 IP 的固定窗口限流

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::error::ApiError;
use super::rate_limit::{RateLimitDecision, RateLimiter};

/// 没有对端地址时（如测试中直接调用 Router）共用的限流 key
const UNKNOWN_CLIENT: &str = "unknown";

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// 限流中间件
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    match limiter.check(&client, Instant::now()) {
        RateLimitDecision::Allowed { .. } => next.run(request).await,
        RateLimitDecision::Limited { retry_after } => {
            tracing::debug!(client = %client, "Request rejected by rate limiter");
            // 向上取整，至少 1 秒
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            ApiError::TooManyRequests {
                retry_after_secs: secs.max(1),
            }
            .into_response()
        }
    }
}
