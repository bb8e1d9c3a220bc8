//! MySQL Todo Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, TodoRepositoryPort};
use crate::domain::todo::{Todo, TodoId, TodoTitle};

/// MySQL Todo Repository
///
/// 表结构由外部初始化（见 `sql/init.sql`），这里不做迁移
pub struct MySqlTodoRepository {
    pool: DbPool,
}

impl MySqlTodoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<TodoRow> for Todo {
    type Error = RepositoryError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let title = TodoTitle::new(&row.title).map_err(|e| {
            RepositoryError::SerializationError(format!("todo {}: {}", row.id, e))
        })?;
        Ok(Todo::restore(
            TodoId::new(row.id),
            title,
            row.completed,
            row.created_at,
        ))
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl TodoRepositoryPort for MySqlTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows: Vec<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, created_at FROM todos ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Todo::try_from).collect()
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        let row: Option<TodoRow> = sqlx::query_as(
            "SELECT id, title, completed, created_at FROM todos WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Todo::try_from).transpose()
    }

    async fn insert(&self, title: &TodoTitle) -> Result<TodoId, RepositoryError> {
        let result = sqlx::query("INSERT INTO todos (title) VALUES (?)")
            .bind(title.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(TodoId::new(id))
    }

    async fn toggle_completed(&self, id: TodoId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE todos SET completed = NOT completed WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TodoId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
