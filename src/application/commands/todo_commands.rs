//! Todo Commands

use crate::domain::todo::TodoId;

/// 创建待办事项命令
///
/// title 为原始输入，由 handler 负责去除空白并校验
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: Option<String>,
}

/// 切换完成状态命令
#[derive(Debug, Clone)]
pub struct ToggleTodo {
    pub todo_id: TodoId,
}

/// 删除待办事项命令
#[derive(Debug, Clone)]
pub struct DeleteTodo {
    pub todo_id: TodoId,
}
