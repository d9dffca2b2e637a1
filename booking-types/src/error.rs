//! Error types for the booking checkout service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Amount is not a valid number")]
    InvalidAmount,

    #[error("Invalid booking date: {0}")]
    InvalidDate(String),

    #[error("Payment not verified: {0}")]
    Unverified(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Payment gateway failures.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment gateway credentials are not configured")]
    NotConfigured,

    #[error("Payment gateway request failed: {0}")]
    Request(String),

    #[error("Payment gateway rejected the request: {code} - {description}")]
    Rejected { code: String, description: String },

    #[error("Unexpected payment gateway response: {0}")]
    Decode(String),
}

/// Persistence store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Invalid table name: {0}")]
    InvalidTable(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Invalid signature")]
    SignatureMismatch,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured => AppError::Config(err.to_string()),
            e => AppError::Gateway(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidTable(_) => AppError::Config(err.to_string()),
            StoreError::Unavailable(msg) | StoreError::Rejected(msg) => AppError::Persistence(msg),
        }
    }
}
