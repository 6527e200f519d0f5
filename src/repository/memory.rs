use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StoreResult, TodoRepository, now_millis};
use crate::models::{TodoItem, TodoList};

#[derive(Default)]
struct Tables {
    lists: BTreeMap<i64, TodoList>,
    items: BTreeMap<i64, TodoItem>,
    next_list_id: i64,
    next_item_id: i64,
}

/// Map-backed repository for exercising the service without a database.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    tables: Mutex<Tables>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn get_all_todo_lists(&self) -> StoreResult<Vec<TodoList>> {
        let tables = self.tables.lock().await;
        Ok(tables.lists.values().cloned().collect())
    }

    async fn get_todo_list(&self, id: i64) -> StoreResult<Option<TodoList>> {
        let tables = self.tables.lock().await;
        Ok(tables.lists.get(&id).cloned())
    }

    async fn create_todo_list(&self, name: &str, description: &str) -> StoreResult<TodoList> {
        let mut tables = self.tables.lock().await;
        tables.next_list_id += 1;
        let now = now_millis();
        let list = TodoList {
            id: tables.next_list_id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.lists.insert(list.id, list.clone());
        Ok(list)
    }

    async fn update_todo_list(&self, list: &TodoList) -> StoreResult<Option<TodoList>> {
        let mut tables = self.tables.lock().await;
        let Some(stored) = tables.lists.get_mut(&list.id) else {
            return Ok(None);
        };
        stored.name = list.name.clone();
        stored.description = list.description.clone();
        stored.updated_at = now_millis();
        Ok(Some(stored.clone()))
    }

    async fn delete_todo_list(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        if tables.lists.remove(&id).is_none() {
            return Ok(false);
        }
        tables.items.retain(|_, item| item.todo_list_id != id);
        Ok(true)
    }

    async fn get_todo_items(&self, todo_list_id: i64) -> StoreResult<Vec<TodoItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .items
            .values()
            .filter(|item| item.todo_list_id == todo_list_id)
            .cloned()
            .collect())
    }

    async fn get_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<Option<TodoItem>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .items
            .get(&id)
            .filter(|item| item.todo_list_id == todo_list_id)
            .cloned())
    }

    async fn create_todo_item(
        &self,
        todo_list_id: i64,
        description: &str,
    ) -> StoreResult<TodoItem> {
        let mut tables = self.tables.lock().await;
        if !tables.lists.contains_key(&todo_list_id) {
            return Err(sqlx::Error::Protocol(format!(
                "FOREIGN KEY constraint failed: todo_list {todo_list_id}"
            )));
        }
        tables.next_item_id += 1;
        let now = now_millis();
        let item = TodoItem {
            id: tables.next_item_id,
            description: description.to_string(),
            done: false,
            todo_list_id,
            created_at: now,
            updated_at: now,
        };
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_todo_item(&self, item: &TodoItem) -> StoreResult<Option<TodoItem>> {
        let mut tables = self.tables.lock().await;
        let Some(stored) = tables
            .items
            .get_mut(&item.id)
            .filter(|stored| stored.todo_list_id == item.todo_list_id)
        else {
            return Ok(None);
        };
        stored.done = item.done;
        stored.updated_at = now_millis();
        Ok(Some(stored.clone()))
    }

    async fn delete_todo_item(&self, todo_list_id: i64, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let owned = tables
            .items
            .get(&id)
            .is_some_and(|item| item.todo_list_id == todo_list_id);
        if owned {
            tables.items.remove(&id);
        }
        Ok(owned)
    }
}
