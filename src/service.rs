use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{TodoItem, TodoList};
use crate::repository::TodoRepository;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn get_todo_lists(&self) -> ServiceResult<Vec<TodoList>>;
    async fn get_todo_list(&self, id: i64) -> ServiceResult<TodoList>;
    async fn create_todo_list(&self, name: &str, description: &str) -> ServiceResult<TodoList>;
    async fn update_todo_list(
        &self,
        id: i64,
        name: &str,
        description: &str,
    ) -> ServiceResult<TodoList>;
    /// Returns the id of the deleted list.
    async fn delete_todo_list(&self, id: i64) -> ServiceResult<i64>;

    async fn get_todo_items(&self, todo_list_id: i64) -> ServiceResult<Vec<TodoItem>>;
    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> ServiceResult<TodoItem>;
    async fn create_todo_item(
        &self,
        todo_list_id: i64,
        description: &str,
    ) -> ServiceResult<TodoItem>;
    async fn update_todo_item(
        &self,
        todo_list_id: i64,
        id: i64,
        done: bool,
    ) -> ServiceResult<TodoItem>;
    /// Returns the id of the deleted item.
    async fn delete_todo_item(&self, todo_list_id: i64, id: i64) -> ServiceResult<i64>;
}

/// Looks a record up before changing it. The repository write is scoped to
/// the same row, so a row removed in between still reads as not found.
pub struct TodoServiceImpl {
    repo: Arc<dyn TodoRepository>,
}

impl TodoServiceImpl {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    async fn existing_list(&self, id: i64) -> ServiceResult<TodoList> {
        self.repo
            .get_todo_list(id)
            .await?
            .ok_or(ServiceError::ListNotFound(id))
    }

    async fn existing_item(&self, todo_list_id: i64, id: i64) -> ServiceResult<TodoItem> {
        self.repo
            .get_todo_item(todo_list_id, id)
            .await?
            .ok_or(ServiceError::ItemNotFound {
                list_id: todo_list_id,
                item_id: id,
            })
    }
}

#[async_trait]
impl TodoService for TodoServiceImpl {
    async fn get_todo_lists(&self) -> ServiceResult<Vec<TodoList>> {
        Ok(self.repo.get_all_todo_lists().await?)
    }

    async fn get_todo_list(&self, id: i64) -> ServiceResult<TodoList> {
        self.existing_list(id).await
    }

    async fn create_todo_list(&self, name: &str, description: &str) -> ServiceResult<TodoList> {
        let list = self.repo.create_todo_list(name, description).await?;
        tracing::debug!(list_id = list.id, "created todo list");
        Ok(list)
    }

    async fn update_todo_list(
        &self,
        id: i64,
        name: &str,
        description: &str,
    ) -> ServiceResult<TodoList> {
        let mut list = self.existing_list(id).await?;
        list.name = name.to_string();
        list.description = description.to_string();

        let updated = self
            .repo
            .update_todo_list(&list)
            .await?
            .ok_or(ServiceError::ListNotFound(id))?;
        tracing::debug!(list_id = id, "updated todo list");
        Ok(updated)
    }

    async fn delete_todo_list(&self, id: i64) -> ServiceResult<i64> {
        self.existing_list(id).await?;
        if !self.repo.delete_todo_list(id).await? {
            return Err(ServiceError::ListNotFound(id));
        }
        tracing::debug!(list_id = id, "deleted todo list");
        Ok(id)
    }

    async fn get_todo_items(&self, todo_list_id: i64) -> ServiceResult<Vec<TodoItem>> {
        Ok(self.repo.get_todo_items(todo_list_id).await?)
    }

    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> ServiceResult<TodoItem> {
        self.existing_item(todo_list_id, id).await
    }

    async fn create_todo_item(
        &self,
        todo_list_id: i64,
        description: &str,
    ) -> ServiceResult<TodoItem> {
        let item = self.repo.create_todo_item(todo_list_id, description).await?;
        tracing::debug!(list_id = todo_list_id, item_id = item.id, "created todo item");
        Ok(item)
    }

    async fn update_todo_item(
        &self,
        todo_list_id: i64,
        id: i64,
        done: bool,
    ) -> ServiceResult<TodoItem> {
        let mut item = self.existing_item(todo_list_id, id).await?;
        item.done = done;

        let updated = self
            .repo
            .update_todo_item(&item)
            .await?
            .ok_or(ServiceError::ItemNotFound {
                list_id: todo_list_id,
                item_id: id,
            })?;
        tracing::debug!(list_id = todo_list_id, item_id = id, done, "updated todo item");
        Ok(updated)
    }

    async fn delete_todo_item(&self, todo_list_id: i64, id: i64) -> ServiceResult<i64> {
        self.existing_item(todo_list_id, id).await?;
        if !self.repo.delete_todo_item(todo_list_id, id).await? {
            return Err(ServiceError::ItemNotFound {
                list_id: todo_list_id,
                item_id: id,
            });
        }
        tracing::debug!(list_id = todo_list_id, item_id = id, "deleted todo item");
        Ok(id)
    }
}
