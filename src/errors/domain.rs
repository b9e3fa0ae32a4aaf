use thiserror::Error;

/// Error taxonomy shared by the stores and services.
///
/// Stores propagate storage failures unchanged as `Database`; the
/// authorization engine converts lower-layer failures into `Unauthorized` or
/// `Forbidden` before they reach a caller; the lifecycle engine validates
/// before mutating so a domain error never leaves a partial write behind.
/// This type is never exposed over the API directly; endpoints convert it
/// to `ApiError`.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or missing input. The caller can recover by correcting it.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No valid principal could be resolved from the presented credential.
    #[error("Unauthorized")]
    Unauthorized,

    /// A valid principal lacks rights or violates an ownership/state rule.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The entity does not exist or sits outside the principal's visibility.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation, e.g. a slug collision.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Temporary, time-bounded, self-clearing account lockout.
    #[error("Account locked until {until}")]
    AccountLocked { until: i64 },

    /// Database query or operation failed.
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    /// Cryptographic operation failed (hashing, verification, signing).
    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a database error with operation context.
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
