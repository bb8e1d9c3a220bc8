//! HTTP Error Handling
//!
//! 所有错误响应格式统一为 `{"error": message}`，状态码按错误类型区分

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::header::RETRY_AFTER;
use http::{HeaderValue, StatusCode};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// 超出限流，携带建议的重试秒数
    TooManyRequests { retry_after_secs: u64 },
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 这里只记 debug，4xx/5xx 的 warn/error 日志由 `error_logging_middleware` 统一输出
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!(status = status.as_u16(), error = %msg, "Bad request");
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::NotFound(msg) => {
                tracing::debug!(status = status.as_u16(), error = %msg, "Resource not found");
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::TooManyRequests { retry_after_secs } => {
                tracing::debug!(status = status.as_u16(), retry_after_secs, "Rate limit exceeded");
                let mut response = (
                    status,
                    Json(ErrorResponse::new(
                        "Too many requests, please try again later.",
                    )),
                )
                    .into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            ApiError::Internal(msg) => {
                tracing::debug!(status = status.as_u16(), error = %msg, "Internal server error");
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found", resource_type))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::TodoId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_mapping() {
        let err: ApiError = ApplicationError::not_found("Todo", TodoId::new(3)).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Todo not found");
    }

    #[tokio::test]
    async fn test_repository_error_passes_message_through() {
        let err: ApiError = ApplicationError::RepositoryError("connection reset".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "connection reset");
    }

    #[tokio::test]
    async fn test_too_many_requests_sets_retry_after() {
        let response = ApiError::TooManyRequests {
            retry_after_secs: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[RETRY_AFTER], "42");
    }
}
