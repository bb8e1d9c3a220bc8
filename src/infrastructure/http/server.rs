//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::rate_limit::{RateLimitConfig, RateLimiter};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// None 表示不限流
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            rate_limit: Some(RateLimitConfig::default()),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimitConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
    limiter: Option<Arc<RateLimiter>>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        let limiter = config.rate_limit.map(|c| Arc::new(RateLimiter::new(c)));
        Self {
            config,
            state: Arc::new(state),
            limiter,
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_routes(self.limiter.clone())
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 每个窗口周期清理一次过期的限流记录
    fn spawn_limiter_janitor(&self) {
        let Some(limiter) = self.limiter.clone() else {
            return;
        };

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(limiter.config().window);
            loop {
                interval.tick().await;
                let purged = limiter.purge_expired(Instant::now());
                if purged > 0 {
                    tracing::debug!(purged, "Expired rate limit windows purged");
                }
            }
        });
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        let listener = TcpListener::bind(&addr).await?;
        info!("Backend running on {}", addr);

        self.spawn_limiter_janitor();

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{RepositoryError, TodoRepositoryPort};
    use crate::domain::todo::{Todo, TodoId, TodoTitle};
    use crate::infrastructure::memory::InMemoryTodoRepository;
    use async_trait::async_trait;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    /// 所有操作都失败的仓储，模拟数据库不可用
    struct UnavailableRepository;

    #[async_trait]
    impl TodoRepositoryPort for UnavailableRepository {
        async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }

        async fn find_by_id(&self, _id: TodoId) -> Result<Option<Todo>, RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }

        async fn insert(&self, _title: &TodoTitle) -> Result<TodoId, RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }

        async fn toggle_completed(&self, _id: TodoId) -> Result<bool, RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }

        async fn delete(&self, _id: TodoId) -> Result<bool, RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }

        async fn ping(&self) -> Result<(), RepositoryError> {
            Err(RepositoryError::DatabaseError("connect ECONNREFUSED".into()))
        }
    }

    fn router() -> Router {
        let state = AppState::new(Arc::new(InMemoryTodoRepository::new()));
        HttpServer::new(ServerConfig::default(), state).build_router()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(ServerConfig::default().addr(), "0.0.0.0:3000");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let app = router();
        let (status, body) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_create_then_list_newest_first() {
        let app = router();

        let (status, first) = send(&app, "POST", "/api/todos", Some(json!({"title": "first"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, second) = send(&app, "POST", "/api/todos", Some(json!({"title": "  second  "}))).await;
        assert_eq!(second["title"], "second");
        assert_eq!(second["completed"], false);
        assert!(second["created_at"].is_string());

        let (status, list) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["id"], second["id"]);
        assert_eq!(list[1]["id"], first["id"]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_missing_and_malformed() {
        let app = router();

        for body in [json!({"title": "   "}), json!({}), json!({"title": 5})] {
            let (status, err) = send(&app, "POST", "/api/todos", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(err["error"], "Title is required");
        }

        let (status, err) = send(&app, "POST", "/api/todos", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Title is required");

        let (_, list) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_toggle_twice() {
        let app = router();
        let (_, created) = send(&app, "POST", "/api/todos", Some(json!({"title": "t"}))).await;
        let uri = format!("/api/todos/{}", created["id"]);

        let (status, once) = send(&app, "PUT", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(once["completed"], true);

        let (_, twice) = send(&app, "PUT", &uri, None).await;
        assert_eq!(twice["completed"], false);
        assert_eq!(twice["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = router();

        for (method, uri) in [
            ("PUT", "/api/todos/12345"),
            ("DELETE", "/api/todos/12345"),
            ("PUT", "/api/todos/abc"),
            ("DELETE", "/api/todos/-1"),
        ] {
            let (status, err) = send(&app, method, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{} {}", method, uri);
            assert_eq!(err["error"], "Todo not found");
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let app = router();
        let (_, created) = send(&app, "POST", "/api/todos", Some(json!({"title": "bye"}))).await;
        let uri = format!("/api/todos/{}", created["id"]);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Deleted"}));

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ping() {
        let app = router();
        let (status, body) = send(&app, "GET", "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "up");
    }

    #[tokio::test]
    async fn test_rate_limit_applies_to_api() {
        let state = AppState::new(Arc::new(InMemoryTodoRepository::new()));
        let config = ServerConfig::default().with_rate_limit(Some(RateLimitConfig {
            window: std::time::Duration::from_secs(60),
            max_requests: 1,
        }));
        let app = HttpServer::new(config, state).build_router();

        let (status, _) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, err) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err["error"], "Too many requests, please try again later.");
    }

    #[tokio::test]
    async fn test_storage_failure_is_server_error() {
        let state = AppState::new(Arc::new(UnavailableRepository));
        let app = HttpServer::new(ServerConfig::default(), state).build_router();

        let (status, err) = send(&app, "GET", "/api/todos", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err["error"], "connect ECONNREFUSED");

        let (status, _) = send(&app, "POST", "/api/todos", Some(json!({"title": "x"}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = send(&app, "PUT", "/api/todos/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        // 校验先于存储访问
        let (status, _) = send(&app, "POST", "/api/todos", Some(json!({"title": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/ping", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "down");
    }

    #[tokio::test]
    async fn test_rate_limit_counts_unmatched_api_paths() {
        let state = AppState::new(Arc::new(InMemoryTodoRepository::new()));
        let config = ServerConfig::default().with_rate_limit(Some(RateLimitConfig {
            window: std::time::Duration::from_secs(60),
            max_requests: 1,
        }));
        let app = HttpServer::new(config, state).build_router();

        let (status, err) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(err["error"], "Not found");

        let (status, err) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err["error"], "Too many requests, please try again later.");
    }
}
