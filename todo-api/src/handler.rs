//! Todo HTTP handlers
//!
//! Each handler decodes the request, calls the domain service and renders
//! the result. Failures are returned as [`ApiError`] and rendered by its
//! `IntoResponse` impl.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use todo_core::{format_timestamp, TodoRepository, TodoService, UpdateTodo};
use tracing::{debug, warn};

use crate::{error::ApiError, serialization::*};

/// Shared state handed to every handler
pub struct AppState<R> {
    pub service: TodoService<R>,
    /// Reported by `/health`
    pub version: String,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            version: self.version.clone(),
        }
    }
}

impl<R: TodoRepository> AppState<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            service: TodoService::new(repository),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

pub async fn create_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    payload: Result<Json<CreateTodoParams>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    let Json(params) = payload.map_err(reject_body)?;

    let todo = state.service.create_todo(params.into()).await?;
    Ok((StatusCode::CREATED, Json(todo.into())))
}

pub async fn list_todos<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    query: Result<Query<ListTodosParams>, QueryRejection>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let filter = params.to_filter()?;

    let todos = state.service.get_all_todos(filter).await?;
    debug!(count = todos.len(), completed = ?filter.completed, "Listed todos");
    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

pub async fn get_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiError> {
    let todo = state.service.get_todo_by_id(&id).await?;
    Ok(Json(todo.into()))
}

pub async fn update_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let Json(updates) = payload.map_err(reject_body)?;

    let todo = state.service.update_todo(&id, updates).await?;
    Ok(Json(todo.into()))
}

pub async fn delete_todo<R: TodoRepository + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_todo(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Liveness plus a store probe; 503 when the store does not answer
pub async fn health<R: TodoRepository + 'static>(State(state): State<AppState<R>>) -> Response {
    let (status_code, status) = match state.service.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        time: format_timestamp(&Utc::now()),
        version: state.version.clone(),
    };
    (status_code, Json(body)).into_response()
}

/// JSON 404 for unknown routes
pub async fn fallback(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

fn reject_body(rejection: JsonRejection) -> ApiError {
    debug!(reason = %rejection.body_text(), "Rejected request body");
    ApiError::invalid_body()
}
