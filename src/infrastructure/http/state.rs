//! Application State
//!
//! 包含仓储端口和所有 Command/Query Handlers

use std::sync::Arc;

use crate::application::{
    CreateTodoHandler, DeleteTodoHandler, ListTodosHandler, TodoRepositoryPort, ToggleTodoHandler,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub todo_repo: Arc<dyn TodoRepositoryPort>,

    // ========== Command Handlers ==========
    pub create_todo_handler: CreateTodoHandler,
    pub toggle_todo_handler: ToggleTodoHandler,
    pub delete_todo_handler: DeleteTodoHandler,

    // ========== Query Handlers ==========
    pub list_todos_handler: ListTodosHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(todo_repo: Arc<dyn TodoRepositoryPort>) -> Self {
        Self {
            todo_repo: todo_repo.clone(),

            create_todo_handler: CreateTodoHandler::new(todo_repo.clone()),
            toggle_todo_handler: ToggleTodoHandler::new(todo_repo.clone()),
            delete_todo_handler: DeleteTodoHandler::new(todo_repo.clone()),

            list_todos_handler: ListTodosHandler::new(todo_repo),
        }
    }
}
