//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{Todo, TodoId, TodoStatus, ValueObjectError},
    infrastructure::dto::http::{
        CreateTodoRequest, ErrorResponse, HealthResponse, ListTodosQuery, UpdateTodoRequest,
    },
    ui::state::AppState,
    usecase::{
        CreateTodoUseCase, DeleteTodoUseCase, GetTodoUseCase, ListTodosUseCase, TodoUseCaseError,
        UpdateTodoStatusUseCase,
    },
};

/// Error returned by the REST handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => {
                tracing::error!("request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(err: ValueObjectError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TodoUseCaseError> for ApiError {
    fn from(err: TodoUseCaseError) -> Self {
        match err {
            TodoUseCaseError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoUseCaseError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse::<i64>()
        .map(TodoId::new)
        .map_err(|_| ApiError::BadRequest("Invalid ID".to_string()))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        connections: state.registry.len(),
    })
}

/// `POST /api/todos`
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(request) = payload?;
    let new_todo = request.into_new_todo()?;

    let usecase = CreateTodoUseCase::new(state.repository.clone(), state.publisher.clone());
    let todo = usecase.execute(new_todo).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `GET /api/todos?status=`
pub async fn list_todos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let status = query.status_filter()?;

    let usecase = ListTodosUseCase::new(state.repository.clone());
    Ok(Json(usecase.execute(status).await?))
}

/// `GET /api/todos/{id}`
pub async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;

    let usecase = GetTodoUseCase::new(state.repository.clone());
    Ok(Json(usecase.execute(id).await?))
}

/// `PUT /api/todos/{id}` with body `{"status": "..."}`
pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;
    let status = TodoStatus::new(request.status)?;

    let usecase = UpdateTodoStatusUseCase::new(state.repository.clone(), state.publisher.clone());
    Ok(Json(usecase.execute(id, status).await?))
}

/// `DELETE /api/todos/{id}`; no body on success
pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    let usecase = DeleteTodoUseCase::new(state.repository.clone(), state.publisher.clone());
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
