//! Structured outcome for fallible operations.
//!
//! Validation failures are expected and reported through [`Outcome`] rather
//! than through the error type; only unexpected I/O faults travel as
//! `GridportError`. A failed outcome always carries a message and an empty
//! row list, so callers never see partially transformed data.

use serde::Serialize;

/// The {success, message, rows} wrapper returned by the import pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<E> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rows: Vec<E>,
}

impl<E> Outcome<E> {
    /// A failed outcome. The message must explain the failure.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty());
        Self {
            success: false,
            message: Some(message),
            rows: Vec::new(),
        }
    }

    /// A successful outcome carrying the accumulated rows.
    pub fn success(rows: Vec<E>) -> Self {
        Self {
            success: true,
            message: None,
            rows,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_rows(self) -> Vec<E> {
        self.rows
    }
}
