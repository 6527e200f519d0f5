//! HTTP surface of the service.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /list | `get_todo_lists` |
//! | POST | /list | `create_todo_list` |
//! | GET | /list/{id} | `get_todo_list` |
//! | POST | /list/{id} | `update_todo_list` |
//! | DELETE | /list/{id} | `delete_todo_list` |
//! | GET | /list/{id}/items | `get_todo_items` |
//! | POST | /list/{id}/items | `create_todo_item` |
//! | GET | /list/{id}/items/{item_id} | `get_todo_item` |
//! | POST | /list/{id}/items/{item_id} | `update_todo_item` |
//! | DELETE | /list/{id}/items/{item_id} | `delete_todo_item` |

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    TodoItem, TodoItemCreateRequest, TodoItemUpdateRequest, TodoList, TodoListRequest,
};
use crate::service::TodoService;

#[derive(Clone)]
pub struct AppState {
    service: Arc<dyn TodoService>,
}

pub fn router(service: Arc<dyn TodoService>) -> Router {
    Router::new()
        .route("/list", get(get_todo_lists).post(create_todo_list))
        .route(
            "/list/{id}",
            get(get_todo_list)
                .post(update_todo_list)
                .delete(delete_todo_list),
        )
        .route("/list/{id}/items", get(get_todo_items).post(create_todo_item))
        .route(
            "/list/{id}/items/{item_id}",
            get(get_todo_item)
                .post(update_todo_item)
                .delete(delete_todo_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

// Ids in paths are 32-bit; anything wider is rejected before the service sees it.
fn list_id(path: Result<Path<i32>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| i64::from(id))
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn item_ids(path: Result<Path<(i32, i32)>, PathRejection>) -> Result<(i64, i64), ApiError> {
    path.map(|Path((id, item_id))| (i64::from(id), i64::from(item_id)))
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn validated_body<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    let body = json_body(payload)?;
    body.validate()
        .map_err(|errors| ApiError::BadRequest(errors.to_string()))?;
    Ok(body)
}

async fn get_todo_lists(State(state): State<AppState>) -> Result<Json<Vec<TodoList>>, ApiError> {
    Ok(Json(state.service.get_todo_lists().await?))
}

async fn get_todo_list(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<TodoList>, ApiError> {
    let id = list_id(path)?;
    Ok(Json(state.service.get_todo_list(id).await?))
}

async fn create_todo_list(
    State(state): State<AppState>,
    payload: Result<Json<TodoListRequest>, JsonRejection>,
) -> Result<Json<TodoList>, ApiError> {
    let request = validated_body(payload)?;
    let list = state
        .service
        .create_todo_list(&request.name, &request.description)
        .await?;
    Ok(Json(list))
}

async fn update_todo_list(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TodoListRequest>, JsonRejection>,
) -> Result<Json<TodoList>, ApiError> {
    let id = list_id(path)?;
    let request = validated_body(payload)?;
    let list = state
        .service
        .update_todo_list(id, &request.name, &request.description)
        .await?;
    Ok(Json(list))
}

async fn delete_todo_list(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = list_id(path)?;
    let deleted = state.service.delete_todo_list(id).await?;
    Ok(Json(json!({ "Message": format!("List {deleted} deleted") })))
}

async fn get_todo_items(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let id = list_id(path)?;
    Ok(Json(state.service.get_todo_items(id).await?))
}

async fn get_todo_item(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let (id, item_id) = item_ids(path)?;
    Ok(Json(state.service.get_todo_item(id, item_id).await?))
}

async fn create_todo_item(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<TodoItemCreateRequest>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = list_id(path)?;
    let request = validated_body(payload)?;
    let item = state
        .service
        .create_todo_item(id, &request.description)
        .await?;
    Ok(Json(item))
}

async fn update_todo_item(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
    payload: Result<Json<TodoItemUpdateRequest>, JsonRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let (id, item_id) = item_ids(path)?;
    let request = json_body(payload)?;
    let item = state
        .service
        .update_todo_item(id, item_id, request.done)
        .await?;
    Ok(Json(item))
}

async fn delete_todo_item(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let (id, item_id) = item_ids(path)?;
    let deleted = state.service.delete_todo_item(id, item_id).await?;
    Ok(Json(json!({ "Message": format!("Item {deleted} deleted") })))
}
