// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Field not found: {0}")]
    FieldNotFound(String),
    #[error("Type mismatch on {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Unknown mass unit: {0}")]
    UnknownUnit(String),
    #[error("view accepts at most {limit} sort keys")]
    TooManySortKeys { limit: usize },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
