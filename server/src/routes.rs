//! Route table and request handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;
use crate::store::Todo;
use crate::validation;

const TODO_NOT_FOUND: &str = "Todo not found";

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/{id}", put(update_todo).delete(delete_todo))
        .method_not_allowed_fallback(route_not_found)
        .fallback(route_not_found)
}

#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub uptime: f64,
    pub timestamp: String,
    pub environment: String,
}

#[derive(Debug, Serialize)]
pub struct Ready {
    pub status: &'static str,
    pub timestamp: String,
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn root() -> Json<RootInfo> {
    Json(RootInfo {
        message: "Todo API is running!",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/api/todos",
    })
}

async fn health(State(state): State<SharedState>) -> Json<Health> {
    Json(Health {
        status: "OK",
        uptime: state.uptime_secs(),
        timestamp: timestamp(),
        environment: state.config.environment.clone(),
    })
}

async fn ready() -> Json<Ready> {
    Json(Ready {
        status: "Ready",
        timestamp: timestamp(),
    })
}

async fn list_todos(State(state): State<SharedState>) -> ApiResult<Json<Vec<Todo>>> {
    state.todos.list().map(Json)
}

async fn create_todo(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let Json(body) = payload?;
    let text = validation::validate_create(&body)?;
    let todo = state.todos.create(text)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let Json(body) = payload?;
    let patch = validation::validate_update(&body)?;
    let id = parse_id(&id)?;
    state
        .todos
        .update(id, patch)?
        .map(Json)
        .ok_or(ApiError::NotFound(TODO_NOT_FOUND))
}

async fn delete_todo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    if state.todos.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(TODO_NOT_FOUND))
    }
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Ids that are not non-negative integers can never name a record.
fn parse_id(raw: &str) -> ApiResult<u64> {
    raw.parse().map_err(|_| ApiError::NotFound(TODO_NOT_FOUND))
}
