#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresTodoRepository;
pub use sqlite::SqliteTodoRepository;

use async_trait::async_trait;

use crate::models::{TodoItem, TodoList};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// One persistence call per method. Lookups and writes that target a row
/// which does not exist return `None`/`false` rather than an error.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn get_all_todo_lists(&self) -> StoreResult<Vec<TodoList>>;

    async fn get_todo_list(&self, id: i64) -> StoreResult<Option<TodoList>>;

    async fn create_todo_list(&self, name: &str, description: &str) -> StoreResult<TodoList>;

    /// Overwrites `name` and `description` and refreshes `updated_at`.
    async fn update_todo_list(&self, list: &TodoList) -> StoreResult<Option<TodoList>>;

    /// Owned items go with the list.
    async fn delete_todo_list(&self, id: i64) -> StoreResult<bool>;

    async fn get_todo_items(&self, todo_list_id: i64) -> StoreResult<Vec<TodoItem>>;

    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<Option<TodoItem>>;

    async fn create_todo_item(&self, todo_list_id: i64, description: &str)
    -> StoreResult<TodoItem>;

    /// Persists `done` for the item scoped to its list.
    async fn update_todo_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>>;

    async fn delete_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<bool>;
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
