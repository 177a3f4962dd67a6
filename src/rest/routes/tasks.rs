// rest/routes/tasks.rs — Task REST routes.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::storage::StorageError;
use crate::tasks::{validate_payload, Task, TaskDraft, ValidationError};
use crate::AppContext;

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, Json<Value>)> {
    // Stage one: pre-checks, each with its own body. The title error keeps
    // the `msg` key, every other error uses `error`.
    match validate_payload(&body) {
        Err(e @ ValidationError::TitleRequired) => {
            return Err((StatusCode::BAD_REQUEST, Json(json!({ "msg": e.to_string() }))))
        }
        Err(e @ ValidationError::DescriptionNotText) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": e.to_string() })),
            ))
        }
        Ok(()) => {}
    }

    // Stage two: the storage schema re-validates the document on write.
    let draft = TaskDraft::from_payload(&body, Utc::now());
    match ctx.storage.create_task(&draft).await {
        Ok(task) => Ok((StatusCode::CREATED, Json(task))),
        Err(StorageError::InvalidDocument(detail)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid data: {detail}") })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Task>>, (StatusCode, Json<Value>)> {
    match ctx.storage.list_tasks().await {
        Ok(tasks) => Ok(Json(tasks)),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )),
    }
}
