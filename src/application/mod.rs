//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TodoRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{CreateTodoHandler, DeleteTodoHandler, ToggleTodoHandler},
    CreateTodo, DeleteTodo, ToggleTodo,
};

pub use error::ApplicationError;

pub use ports::{RepositoryError, TodoRepositoryPort};

pub use queries::{handlers::ListTodosHandler, ListTodos};
