use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{CreateTodoInput, TodoItemResponse, UpdateTodoInput, ValidatedJson},
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, TodoService},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/todos", get(index).post(create))
        .route(
            "/todos/{id}",
            get(show).patch(update).put(update).delete(destroy),
        )
        .with_state(state)
}

async fn index(State(state): State<Arc<AppState>>) -> ApiResult<Vec<TodoItemResponse>> {
    let items = todo_service_from_state(&state).find_all().await?;
    JsonApiResponse::ok(items.into_iter().map(TodoItemResponse::from).collect())
}

async fn create(
    State(state): State<Arc<AppState>>,
    ValidatedJson(data): ValidatedJson<CreateTodoInput>,
) -> ApiResult<TodoItemResponse> {
    let item = todo_service_from_state(&state).create(data).await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", item.into())
}

async fn show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<TodoItemResponse> {
    let item = todo_service_from_state(&state)
        .find_one_or_fail(parse_id(&id)?)
        .await?;
    JsonApiResponse::ok(item.into())
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<UpdateTodoInput>,
) -> ApiResult<TodoItemResponse> {
    let item = todo_service_from_state(&state)
        .update(parse_id(&id)?, data)
        .await?;
    JsonApiResponse::ok(item.into())
}

async fn destroy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    todo_service_from_state(&state)
        .delete_by_id(parse_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Ids are UUIDs; anything else cannot name a stored item.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found("Todo item not found"))
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
