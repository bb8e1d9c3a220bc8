//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 限流配置
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Mysql,
    /// 进程内存储，重启后数据丢失
    Memory,
}

impl DatabaseBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseBackend::Mysql => "mysql",
            DatabaseBackend::Memory => "memory",
        }
    }
}

/// 数据库配置
///
/// host/user/password/name/port 可分别由 `DB_HOST`、`DB_USER`、`DB_PASSWORD`、
/// `DB_NAME`、`DB_PORT` 覆盖
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: DatabaseBackend,

    #[serde(default = "default_db_host")]
    pub host: String,

    #[serde(default = "default_db_port")]
    pub port: u16,

    #[serde(default = "default_db_user")]
    pub user: String,

    #[serde(default = "default_db_password")]
    pub password: String,

    /// 数据库名
    #[serde(default = "default_db_name")]
    pub name: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// 启动时最大连接尝试次数
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// 连接重试间隔（毫秒）
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,

    /// 从连接池获取连接的超时（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_db_host() -> String {
    "db".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "m347user".to_string()
}

fn default_db_password() -> String {
    "m347pass".to_string()
}

fn default_db_name() -> String {
    "m347db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_retries() -> u32 {
    15
}

fn default_connect_retry_delay_ms() -> u64 {
    3000
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::default(),
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: default_db_password(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            connect_retries: default_connect_retries(),
            connect_retry_delay_ms: default_connect_retry_delay_ms(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_retry_delay(&self) -> Duration {
        Duration::from_millis(self.connect_retry_delay_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// 限流配置（作用于 /api 下所有请求）
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,

    /// 窗口长度（秒）
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// 每个窗口内每个客户端允许的请求数
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    100
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            window_secs: default_window_secs(),
            max_requests: default_max_requests(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.backend, DatabaseBackend::Mysql);
        assert_eq!(config.database.host, "db");
        assert_eq!(config.database.user, "m347user");
        assert_eq!(config.database.password, "m347pass");
        assert_eq!(config.database.name, "m347db");
        assert_eq!(config.database.connect_retries, 15);
        assert_eq!(config.database.connect_retry_delay(), Duration::from_secs(3));
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(5));
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 100);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }
}
