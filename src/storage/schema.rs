// SPDX-License-Identifier: MIT
//! Document schema for the tasks collection.
//!
//! This check runs inside the storage layer, after the HTTP pre-checks, and
//! is kept independent of them: it guards every write path, including ones
//! the pre-checks never see (a truthy non-text title, callers other than the
//! REST handler).

use serde_json::Value;

use crate::storage::StorageError;
use crate::tasks::TaskDraft;

/// A draft that passed the schema check, with its fields in storable form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDocument {
    pub title: String,
    pub description: Option<String>,
}

/// Schema rules: `title` is a required non-empty text value, `description`
/// is text or null.
pub fn validate_document(draft: &TaskDraft) -> Result<TaskDocument, StorageError> {
    let title = match &draft.title {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::String(_) => {
            return Err(StorageError::InvalidDocument(
                "title: a non-empty text value is required".to_string(),
            ))
        }
        _ => {
            return Err(StorageError::InvalidDocument(
                "title: expected a text value".to_string(),
            ))
        }
    };

    let description = match &draft.description {
        None => None,
        Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(StorageError::InvalidDocument(
                "description: expected a text value".to_string(),
            ))
        }
    };

    Ok(TaskDocument { title, description })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn draft(title: Value, description: Option<Value>) -> TaskDraft {
        TaskDraft::new(title, description, Utc::now())
    }

    #[test]
    fn accepts_text_title_and_description() {
        let doc = validate_document(&draft(json!("Buy milk"), Some(json!("2%")))).unwrap();
        assert_eq!(doc.title, "Buy milk");
        assert_eq!(doc.description.as_deref(), Some("2%"));
    }

    #[test]
    fn accepts_absent_and_null_description() {
        assert!(validate_document(&draft(json!("t"), None)).is_ok());
        let doc = validate_document(&draft(json!("t"), Some(Value::Null))).unwrap();
        assert_eq!(doc.description, None);
    }

    #[test]
    fn rejects_non_text_title() {
        for title in [json!(123), json!(true), json!(["x"]), Value::Null] {
            let err = validate_document(&draft(title, None)).unwrap_err();
            assert!(
                matches!(&err, StorageError::InvalidDocument(d) if d.contains("title")),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn rejects_empty_title() {
        let err = validate_document(&draft(json!(""), None)).unwrap_err();
        assert!(matches!(&err, StorageError::InvalidDocument(d) if d.contains("non-empty")));
    }

    #[test]
    fn rejects_non_text_description() {
        let err = validate_document(&draft(json!("t"), Some(json!(12345)))).unwrap_err();
        assert!(
            matches!(&err, StorageError::InvalidDocument(d) if d.contains("description")),
            "unexpected error: {err}"
        );
    }
}
