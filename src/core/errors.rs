use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Unknown {kind} tag: {value:?}")]
    UnknownTag { kind: &'static str, value: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} {id} cannot reference itself")]
    SelfReference { kind: &'static str, id: String },

    #[error("Reply chain starting at comment {0} does not terminate")]
    CycleDetected(String),

    #[error("Page {page} is out of range (total pages: {total_pages})")]
    PageOutOfRange { page: usize, total_pages: usize },

    #[error("Malformed envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Request failed: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ModelError::NotFound { kind, id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
