// SPDX-License-Identifier: MIT
//! Task model and payload pre-validation.
//!
//! Incoming payloads pass two independent validation stages: the pre-checks
//! here (specific per-field messages) and the document schema inside the
//! storage layer (`storage::schema`). The two stages stay separate and
//! produce different client-facing errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A persisted task, as stored and as returned on the wire.
///
/// `created_at` is the RFC 3339 string written at creation time; it never
/// changes afterwards, and neither does `id`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// A not-yet-persisted task document.
///
/// Field values are kept as raw JSON so the storage schema can re-check them;
/// the creation timestamp is supplied by the caller at the boundary rather
/// than defaulted here.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: Value,
    pub description: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl TaskDraft {
    pub fn new(title: Value, description: Option<Value>, created_at: DateTime<Utc>) -> Self {
        Self {
            title,
            description,
            created_at,
        }
    }

    /// Lift the task fields out of a request payload. A JSON `null`
    /// description is treated the same as an absent one.
    pub fn from_payload(payload: &Value, created_at: DateTime<Utc>) -> Self {
        Self::new(
            payload.get("title").cloned().unwrap_or(Value::Null),
            payload
                .get("description")
                .cloned()
                .filter(|v| !v.is_null()),
            created_at,
        )
    }
}

/// Pre-persistence payload rejection. Each variant maps to its own 400 body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Description must be a string")]
    DescriptionNotText,
}

/// Apply the pre-checks, in order: title presence first, then description
/// type. A truthy non-text title passes here; the storage schema is the
/// stage that rejects it.
pub fn validate_payload(payload: &Value) -> Result<(), ValidationError> {
    if is_falsy(payload.get("title")) {
        return Err(ValidationError::TitleRequired);
    }
    match payload.get("description") {
        Some(v) if !v.is_null() && !v.is_string() => Err(ValidationError::DescriptionNotText),
        _ => Ok(()),
    }
}

/// Absent, null, empty-string, `false`, and numeric zero all count as
/// missing for the title presence check.
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}
