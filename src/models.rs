use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub description: String,
    pub done: bool,
    pub todo_list_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Body of `POST /list` and `POST /list/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoListRequest {
    #[validate(length(min = 1, max = 20, message = "name must be between 1 and 20 characters"))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "description must be between 1 and 50 characters"
    ))]
    pub description: String,
}

/// Body of `POST /list/{id}/items`. Any list id in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoItemCreateRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "description must be between 1 and 50 characters"
    ))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TodoItemUpdateRequest {
    pub done: bool,
}
