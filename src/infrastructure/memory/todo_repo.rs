//! In-Memory Todo Repository Implementation

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::application::ports::{RepositoryError, TodoRepositoryPort};
use crate::domain::todo::{Todo, TodoId, TodoTitle};

/// 内存 Todo 仓储
pub struct InMemoryTodoRepository {
    todos: DashMap<TodoId, Todo>,
    next_id: AtomicI64,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            todos: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoRepositoryPort for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let mut todos: Vec<Todo> = self.todos.iter().map(|t| t.value().clone()).collect();
        todos.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(todos)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        Ok(self.todos.get(&id).map(|t| t.value().clone()))
    }

    async fn insert(&self, title: &TodoTitle) -> Result<TodoId, RepositoryError> {
        let id = TodoId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.todos.insert(id, Todo::new(id, title.clone(), Utc::now()));
        tracing::debug!(todo_id = %id, "Todo inserted (memory)");
        Ok(id)
    }

    async fn toggle_completed(&self, id: TodoId) -> Result<bool, RepositoryError> {
        match self.todos.get_mut(&id) {
            Some(mut todo) => {
                todo.toggle();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: TodoId) -> Result<bool, RepositoryError> {
        Ok(self.todos.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> TodoTitle {
        TodoTitle::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let repo = InMemoryTodoRepository::new();
        let a = repo.insert(&title("a")).await.unwrap();
        let b = repo.insert(&title("b")).await.unwrap();
        assert!(b > a);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_unknown_returns_false() {
        let repo = InMemoryTodoRepository::new();
        assert!(!repo.toggle_completed(TodoId::new(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryTodoRepository::new();
        let id = repo.insert(&title("x")).await.unwrap();
        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.is_empty());
    }
}
