//! Todo Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateTodo, DeleteTodo, ToggleTodo};
use crate::application::error::ApplicationError;
use crate::application::ports::TodoRepositoryPort;
use crate::domain::todo::{Todo, TodoError, TodoId, TodoTitle};

// ============================================================================
// CreateTodo
// ============================================================================

/// CreateTodo Handler - 插入后回读，返回带服务端 id/时间戳的完整记录
pub struct CreateTodoHandler {
    todo_repo: Arc<dyn TodoRepositoryPort>,
}

impl CreateTodoHandler {
    pub fn new(todo_repo: Arc<dyn TodoRepositoryPort>) -> Self {
        Self { todo_repo }
    }

    pub async fn handle(&self, command: CreateTodo) -> Result<Todo, ApplicationError> {
        let raw = command.title.ok_or(TodoError::EmptyTitle)?;
        let title = TodoTitle::new(raw)?;

        let todo_id = self.todo_repo.insert(&title).await?;
        let todo = self.reload(todo_id).await?;

        tracing::info!(todo_id = %todo_id, title = %title, "Todo created");

        Ok(todo)
    }

    async fn reload(&self, todo_id: TodoId) -> Result<Todo, ApplicationError> {
        self.todo_repo
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Todo", todo_id))
    }
}

// ============================================================================
// ToggleTodo
// ============================================================================

/// ToggleTodo Handler
pub struct ToggleTodoHandler {
    todo_repo: Arc<dyn TodoRepositoryPort>,
}

impl ToggleTodoHandler {
    pub fn new(todo_repo: Arc<dyn TodoRepositoryPort>) -> Self {
        Self { todo_repo }
    }

    pub async fn handle(&self, command: ToggleTodo) -> Result<Todo, ApplicationError> {
        let todo_id = command.todo_id;

        if !self.todo_repo.toggle_completed(todo_id).await? {
            return Err(ApplicationError::not_found("Todo", todo_id));
        }

        // 两条语句之间行可能已被删除
        let todo = self
            .todo_repo
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Todo", todo_id))?;

        tracing::info!(
            todo_id = %todo_id,
            completed = todo.completed(),
            "Todo toggled"
        );

        Ok(todo)
    }
}

// ============================================================================
// DeleteTodo
// ============================================================================

/// DeleteTodo Handler
pub struct DeleteTodoHandler {
    todo_repo: Arc<dyn TodoRepositoryPort>,
}

impl DeleteTodoHandler {
    pub fn new(todo_repo: Arc<dyn TodoRepositoryPort>) -> Self {
        Self { todo_repo }
    }

    pub async fn handle(&self, command: DeleteTodo) -> Result<(), ApplicationError> {
        let todo_id = command.todo_id;

        if !self.todo_repo.delete(todo_id).await? {
            return Err(ApplicationError::not_found("Todo", todo_id));
        }

        tracing::info!(todo_id = %todo_id, "Todo deleted");

        Ok(())
    }
}
