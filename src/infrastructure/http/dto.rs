//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::todo::Todo;

/// 创建请求
///
/// title 缺失或不是字符串时由 handler 统一按校验错误处理
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id().value(),
            completed: todo.completed(),
            created_at: todo.created_at(),
            title: todo.title().as_str().to_string(),
        }
    }
}

/// 操作确认
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::{TodoId, TodoTitle};
    use chrono::TimeZone;

    #[test]
    fn test_todo_response_json_shape() {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        let todo = Todo::restore(
            TodoId::new(1),
            TodoTitle::new("buy milk").unwrap(),
            false,
            created_at,
        );

        let value = serde_json::to_value(TodoResponse::from(todo)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "buy milk",
                "completed": false,
                "created_at": "2026-01-01T10:00:00Z"
            })
        );
    }
}
