//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::todo::{TodoError, TodoId};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found")]
    NotFound {
        resource_type: &'static str,
        id: TodoId,
    },

    /// 验证错误
    #[error("{0}")]
    ValidationError(String),

    /// 仓储错误
    #[error("{0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: TodoId) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<TodoError> for ApplicationError {
    fn from(err: TodoError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
