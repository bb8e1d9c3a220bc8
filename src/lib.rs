//! todo-backend - 待办事项 CRUD 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Todo Context: 标题校验、完成状态切换
//!
//! 应用层 (application/):
//! - Ports: TodoRepositoryPort
//! - Commands: CreateTodo, ToggleTodo, DeleteTodo
//! - Queries: ListTodos
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API、CORS、限流
//! - Persistence: MySQL（启动时带重试连接）
//! - Memory: 内存仓储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{load_config, AppConfig};
