//! Todo Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::TodoRepositoryPort;
use crate::application::queries::ListTodos;
use crate::domain::todo::Todo;

/// ListTodos Handler
pub struct ListTodosHandler {
    todo_repo: Arc<dyn TodoRepositoryPort>,
}

impl ListTodosHandler {
    pub fn new(todo_repo: Arc<dyn TodoRepositoryPort>) -> Self {
        Self { todo_repo }
    }

    pub async fn handle(&self, _query: ListTodos) -> Result<Vec<Todo>, ApplicationError> {
        let todos = self.todo_repo.find_all().await?;
        tracing::debug!(count = todos.len(), "Todos listed");
        Ok(todos)
    }
}
