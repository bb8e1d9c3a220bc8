//! Todo Queries

/// 列出所有待办事项查询（无分页）
#[derive(Debug, Clone)]
pub struct ListTodos;
