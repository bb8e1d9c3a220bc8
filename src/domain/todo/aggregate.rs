//! Todo Context - Aggregate Root

use chrono::{DateTime, Utc};

use super::{TodoId, TodoTitle};

/// Todo 聚合根
///
/// 不变量:
/// - 标题非空
/// - created_at 创建后不可变
/// - 唯一允许的修改是切换 completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: TodoTitle,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Todo {
    /// 创建新的待办事项（未完成）
    pub fn new(id: TodoId, title: TodoTitle, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed: false,
            created_at,
        }
    }

    /// 从存储恢复
    pub fn restore(id: TodoId, title: TodoTitle, completed: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed,
            created_at,
        }
    }

    /// 切换完成状态
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    // Getters
    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
