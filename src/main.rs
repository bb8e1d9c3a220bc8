//! todo-backend - 待办事项 CRUD 服务
//!
//! 启动流程：加载配置 -> 初始化日志 -> 连接数据库（带重试）-> 启动 HTTP 服务器

use std::sync::Arc;
use std::time::Duration;

use todo_backend::application::TodoRepositoryPort;
use todo_backend::config::{load_config, print_config, AppConfig, DatabaseBackend};
use todo_backend::infrastructure::http::{AppState, HttpServer, RateLimitConfig, ServerConfig};
use todo_backend::infrastructure::memory::InMemoryTodoRepository;
use todo_backend::infrastructure::persistence::mysql::{connect_with_retry, DatabaseConfig};
use todo_backend::infrastructure::persistence::MySqlTodoRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：DB_* > TODO_* 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    let todo_repo = create_repository(&config).await?;

    let rate_limit = config.rate_limit.enabled.then(|| RateLimitConfig {
        window: Duration::from_secs(config.rate_limit.window_secs),
        max_requests: config.rate_limit.max_requests,
    });
    let server_config =
        ServerConfig::new(&config.server.host, config.server.port).with_rate_limit(rate_limit);
    let server = HttpServer::new(server_config, AppState::new(todo_repo));

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},todo_backend={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 按配置选择存储后端；MySQL 连接重试耗尽时返回错误，进程以非零状态退出
async fn create_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn TodoRepositoryPort>> {
    match config.database.backend {
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");
            Ok(Arc::new(InMemoryTodoRepository::new()))
        }
        DatabaseBackend::Mysql => {
            let db_config = DatabaseConfig {
                host: config.database.host.clone(),
                port: config.database.port,
                user: config.database.user.clone(),
                password: config.database.password.clone(),
                database: config.database.name.clone(),
                max_connections: config.database.max_connections,
                connect_retries: config.database.connect_retries,
                connect_retry_delay: config.database.connect_retry_delay(),
                connect_timeout: config.database.connect_timeout(),
            };
            let pool = connect_with_retry(&db_config).await?;
            Ok(Arc::new(MySqlTodoRepository::new(pool)))
        }
    }
}
