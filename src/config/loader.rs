//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. `DB_HOST` / `DB_USER` / `DB_PASSWORD` / `DB_NAME` / `DB_PORT`
//! 2. `TODO_` 前缀环境变量
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, DatabaseBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 数据库连接参数的独立环境变量 -> 配置键
const DB_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `TODO_SERVER__PORT=8080`
/// - `TODO_RATE_LIMIT__MAX_REQUESTS=500`
/// - `TODO_DATABASE__BACKEND=memory`
/// - `DB_HOST=localhost`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let db_env: Vec<(&str, Option<String>)> = DB_ENV_OVERRIDES
        .iter()
        .map(|(var, key)| (*key, std::env::var(var).ok()))
        .collect();
    load_config_with_overrides(config_path, &db_env)
}

fn load_config_with_overrides(
    config_path: Option<&Path>,
    db_env: &[(&str, Option<String>)],
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.backend", "mysql")?
        .set_default("database.host", "db")?
        .set_default("database.port", 3306)?
        .set_default("database.user", "m347user")?
        .set_default("database.password", "m347pass")?
        .set_default("database.name", "m347db")?
        .set_default("database.max_connections", 10)?
        .set_default("database.connect_retries", 15)?
        .set_default("database.connect_retry_delay_ms", 3000)?
        .set_default("database.connect_timeout_secs", 5)?
        .set_default("rate_limit.enabled", true)?
        .set_default("rate_limit.window_secs", 60)?
        .set_default("rate_limit.max_requests", 100)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量，层级分隔符 __，例如 TODO_SERVER__PORT=8080
    builder = builder.add_source(
        Environment::with_prefix("TODO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. DB_* 变量（最高优先级）
    for (key, value) in db_env {
        builder = builder.set_override_option(*key, value.clone())?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.backend == DatabaseBackend::Mysql {
        if config.database.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Database host cannot be empty".to_string(),
            ));
        }
        if config.database.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Database name cannot be empty".to_string(),
            ));
        }
    }

    if config.database.connect_retries == 0 {
        return Err(ConfigError::ValidationError(
            "Database connect retries must be at least 1".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max connections cannot be 0".to_string(),
        ));
    }

    if config.rate_limit.enabled && config.rate_limit.window_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Rate limit window cannot be 0 when rate limiting is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），密码不输出
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Database Backend: {}", config.database.backend.as_str());
    if config.database.backend == DatabaseBackend::Mysql {
        tracing::info!(
            "Database: {}@{}:{}/{}",
            config.database.user,
            config.database.host,
            config.database.port,
            config.database.name
        );
        tracing::info!("Database Password: ********");
        tracing::info!("Database Max Connections: {}", config.database.max_connections);
        tracing::info!(
            "Database Connect Retries: {} (every {}ms)",
            config.database.connect_retries,
            config.database.connect_retry_delay_ms
        );
        tracing::info!(
            "Database Acquire Timeout: {}s",
            config.database.connect_timeout_secs
        );
    }
    if config.rate_limit.enabled {
        tracing::info!(
            "Rate Limit: {} requests / {}s",
            config.rate_limit.max_requests,
            config.rate_limit.window_secs
        );
    } else {
        tracing::info!("Rate Limit: disabled");
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
