use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("{0}")]
    PaymentRequired(String),

    #[error("Request already in progress: {0}")]
    Busy(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type TimetableResult<T> = Result<T, TimetableError>;
