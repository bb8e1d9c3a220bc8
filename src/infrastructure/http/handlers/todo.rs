//! Todo HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use http::StatusCode;
use std::sync::Arc;

use crate::application::{CreateTodo, DeleteTodo, ListTodos, ToggleTodo};
use crate::domain::todo::TodoId;
use crate::infrastructure::http::dto::{CreateTodoRequest, MessageResponse, TodoResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 路径中的 id 不是正整数时不可能对应任何记录，按 404 处理
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    TodoId::parse(raw).ok_or_else(|| ApiError::NotFound("Todo not found".to_string()))
}

/// 获取全部待办事项（按创建时间倒序）
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.list_todos_handler.handle(ListTodos).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// 创建待办事项
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let title = match payload {
        Ok(Json(req)) => req.title,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Create todo body rejected");
            None
        }
    };

    let todo = state.create_todo_handler.handle(CreateTodo { title }).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(todo))))
}

/// 切换完成状态
pub async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo_id = parse_todo_id(&id)?;
    let todo = state
        .toggle_todo_handler
        .handle(ToggleTodo { todo_id })
        .await?;

    Ok(Json(TodoResponse::from(todo)))
}

/// 删除待办事项
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let todo_id = parse_todo_id(&id)?;
    state
        .delete_todo_handler
        .handle(DeleteTodo { todo_id })
        .await?;

    Ok(Json(MessageResponse { message: "Deleted" }))
}
