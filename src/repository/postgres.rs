use async_trait::async_trait;
use sqlx::postgres::PgPool;

use super::{StoreResult, TodoRepository, now_millis};
use crate::models::{TodoItem, TodoList};

pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
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
            "SELECT id, name, description, created_at, updated_at FROM todo_list WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_todo_list(&self, name: &str, description: &str) -> StoreResult<TodoList> {
        let now = now_millis();
        let row = sqlx::query_as::<_, TodoList>(
            "INSERT INTO todo_list (name, description, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
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
            "UPDATE todo_list SET name = $1, description = $2, updated_at = $3 WHERE id = $4
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
        let result = sqlx::query("DELETE FROM todo_list WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_todo_items(&self, todo_list_id: i64) -> StoreResult<Vec<TodoItem>> {
        let rows = sqlx::query_as::<_, TodoItem>(
            "SELECT id, description, done, todo_list_id, created_at, updated_at
             FROM todo_item WHERE todo_list_id = $1 ORDER BY id ASC",
        )
        .bind(todo_list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<Option<TodoItem>> {
        let row = sqlx::query_as::<_, TodoItem>(
            "SELECT id, description, done, todo_list_id, created_at, updated_at
             FROM todo_item WHERE id = $1 AND todo_list_id = $2",
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
             VALUES ($1, FALSE, $2, $3, $4)
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
            "UPDATE todo_item SET done = $1, updated_at = $2 WHERE id = $3 AND todo_list_id = $4
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
        let result = sqlx::query("DELETE FROM todo_item WHERE id = $1 AND todo_list_id = $2")
            .bind(id)
            .bind(todo_list_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.
    async fn repository() -> PostgresTodoRepository {
        let url = std::env::var("DATABASE_URL").unwrap();
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("./migrations/postgres")
            .run(&pool)
            .await
            .unwrap();
        PostgresTodoRepository::new(pool)
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn list_and_item_lifecycle() {
        let repo = repository().await;

        let list = repo.create_todo_list("Groceries", "Weekly shop").await.unwrap();
        assert!(list.created_at > 0);
        assert_eq!(repo.get_todo_list(list.id).await.unwrap(), Some(list.clone()));

        let mut renamed = list.clone();
        renamed.name = "Hardware".to_string();
        let updated = repo.update_todo_list(&renamed).await.unwrap().unwrap();
        assert_eq!(updated.name, "Hardware");
        assert_eq!(updated.created_at, list.created_at);

        let mut ids = Vec::new();
        for description in ["milk", "eggs", "bread"] {
            ids.push(repo.create_todo_item(list.id, description).await.unwrap().id);
        }
        let listed: Vec<i64> = repo
            .get_todo_items(list.id)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.id)
            .collect();
        assert_eq!(listed, ids);

        let mut item = repo.get_todo_item(list.id, ids[0]).await.unwrap().unwrap();
        item.done = true;
        let toggled = repo.update_todo_item(&item).await.unwrap().unwrap();
        assert!(toggled.done);
        assert_eq!(toggled.description, "milk");

        assert_eq!(repo.get_todo_item(list.id + 1_000_000, ids[0]).await.unwrap(), None);
        assert!(repo.delete_todo_item(list.id, ids[1]).await.unwrap());
        assert!(!repo.delete_todo_item(list.id, ids[1]).await.unwrap());

        assert!(repo.delete_todo_list(list.id).await.unwrap());
        assert_eq!(repo.get_todo_list(list.id).await.unwrap(), None);
        assert!(repo.get_todo_items(list.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "needs DATABASE_URL pointing at a PostgreSQL server"]
    async fn item_for_missing_list_is_rejected() {
        let repo = repository().await;

        assert!(repo.create_todo_item(i64::MAX, "orphan").await.is_err());
    }
}
