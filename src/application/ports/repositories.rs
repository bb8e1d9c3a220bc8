//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（MySQL、内存）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::todo::{Todo, TodoId, TodoTitle};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Todo Repository Port
#[async_trait]
pub trait TodoRepositoryPort: Send + Sync {
    /// 获取所有待办事项，按创建时间倒序（同一时间按 id 倒序）
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError>;

    /// 插入新记录，返回生成的 ID
    async fn insert(&self, title: &TodoTitle) -> Result<TodoId, RepositoryError>;

    /// 切换完成状态，没有匹配行时返回 false
    async fn toggle_completed(&self, id: TodoId) -> Result<bool, RepositoryError>;

    /// 删除记录，没有匹配行时返回 false
    async fn delete(&self, id: TodoId) -> Result<bool, RepositoryError>;

    /// 存储连通性探测
    async fn ping(&self) -> Result<(), RepositoryError>;
}
