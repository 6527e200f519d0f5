use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use super::{StoreResult, TodoRepository, now_millis};
use crate::models::{TodoItem, TodoList};

pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn get_all_todo_lists(&self) -> StoreResult<Vec<TodoList>> {
        let rows = sqlx::query_as::<_, TodoList>(
            "SELECT id, name, description, created_at, updated_at FROM todo_list ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_todo_list(&self, id: i64) -> StoreResult<Option<TodoList>> {
        let row = sqlx::query_as::<_, TodoList>(
            "SELECT id, name, description, created_at, updated_at FROM todo_list WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_todo_list(&self, name: &str, description: &str) -> StoreResult<TodoList> {
        let now = now_millis();
        let row = sqlx::query_as::<_, TodoList>(
            "INSERT INTO todo_list (name, description, created_at, updated_at) VALUES (?, ?, ?, ?)
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_todo_list(&self, list: &TodoList) -> StoreResult<Option<TodoList>> {
        let row = sqlx::query_as::<_, TodoList>(
            "UPDATE todo_list SET name = ?, description = ?, updated_at = ? WHERE id = ?
             RETURNING id, name, description, created_at, updated_at",
        )
        .bind(&list.name)
        .bind(&list.description)
        .bind(now_millis())
        .bind(list.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_todo_list(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todo_list WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_todo_items(&self, todo_list_id: i64) -> StoreResult<Vec<TodoItem>> {
        let rows = sqlx::query_as::<_, TodoItem>(
            "SELECT id, description, done, todo_list_id, created_at, updated_at
             FROM todo_item WHERE todo_list_id = ? ORDER BY id ASC",
        )
        .bind(todo_list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<Option<TodoItem>> {
        let row = sqlx::query_as::<_, TodoItem>(
            "SELECT id, description, done, todo_list_id, created_at, updated_at
             FROM todo_item WHERE id = ? AND todo_list_id = ?",
        )
        .bind(id)
        .bind(todo_list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_todo_item(
        &self,
        todo_list_id: i64,
        description: &str,
    ) -> StoreResult<TodoItem> {
        let now = now_millis();
        let row = sqlx::query_as::<_, TodoItem>(
            "INSERT INTO todo_item (description, done, todo_list_id, created_at, updated_at)
             VALUES (?, FALSE, ?, ?, ?)
             RETURNING id, description, done, todo_list_id, created_at, updated_at",
        )
        .bind(description)
        .bind(todo_list_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_todo_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>> {
        let row = sqlx::query_as::<_, TodoItem>(
            "UPDATE todo_item SET done = ?, updated_at = ? WHERE id = ? AND todo_list_id = ?
             RETURNING id, description, done, todo_list_id, created_at, updated_at",
        )
        .bind(item.done)
        .bind(now_millis())
        .bind(item.id)
        .bind(item.todo_list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todo_item WHERE id = ? AND todo_list_id = ?")
            .bind(id)
            .bind(todo_list_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
