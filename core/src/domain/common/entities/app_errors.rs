use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Add at least one pantry item")]
    EmptyPantry,

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
