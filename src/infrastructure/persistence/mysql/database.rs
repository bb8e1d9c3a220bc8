//! MySQL Database - 连接池创建（带启动重试）

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{MySql, Pool};
use std::time::Duration;
use thiserror::Error;

use super::retry::{retry_with_delay, RetryPolicy};

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 启动时最大连接尝试次数
    pub connect_retries: u32,
    /// 两次尝试之间的间隔
    pub connect_retry_delay: Duration,
    /// 获取连接的超时
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            port: 3306,
            user: "m347user".to_string(),
            password: "m347pass".to_string(),
            database: "m347db".to_string(),
            max_connections: 10,
            connect_retries: 15,
            connect_retry_delay: Duration::from_millis(3000),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.connect_retries, self.connect_retry_delay)
    }
}

/// 数据库连接池
pub type DbPool = Pool<MySql>;

/// 数据库启动错误
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Could not connect to database after {attempts} attempts: {last_error}")]
    ConnectExhausted { attempts: u32, last_error: String },
}

/// 创建连接池并用 `SELECT 1` 探测
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = config
        .pool_options()
        .connect_with(config.connect_options())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// 带重试地创建连接池
///
/// 最多尝试 `connect_retries` 次，间隔 `connect_retry_delay`；全部失败时返回
/// [`DatabaseError::ConnectExhausted`]，由调用方终止进程。
pub async fn connect_with_retry(config: &DatabaseConfig) -> Result<DbPool, DatabaseError> {
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        "Connecting to database"
    );

    let pool = retry_with_delay(config.retry_policy(), "DB connection", |_| {
        create_pool(config)
    })
    .await
    .map_err(|e| DatabaseError::ConnectExhausted {
        attempts: e.attempts,
        last_error: e.last_error.to_string(),
    })?;

    tracing::info!("Connected to database");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DatabaseConfig::default();
        assert_eq!(config.host, "db");
        assert_eq!(config.connect_retries, 15);
        assert_eq!(config.connect_retry_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_pool_options_bound_acquire() {
        let config = DatabaseConfig {
            max_connections: 4,
            connect_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let options = config.pool_options();
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_exhausted_message() {
        let err = DatabaseError::ConnectExhausted {
            attempts: 15,
            last_error: "Connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not connect to database after 15 attempts: Connection refused"
        );
    }
}
