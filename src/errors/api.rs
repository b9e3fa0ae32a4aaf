use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::errors::domain::DomainError;

/// Standardized error response body for all endpoints
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

/// API-facing error responses, mapped from the internal taxonomy.
///
/// The mapping is part of the contract: 400 validation, 401 unauthorized,
/// 403 forbidden, 404 not found, 409 conflict, 423 locked, 500 internal.
/// Internal storage/crypto detail never reaches a caller.
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    #[oai(status = 400)]
    Validation(Json<ErrorBody>),

    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    #[oai(status = 403)]
    Forbidden(Json<ErrorBody>),

    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    #[oai(status = 409)]
    Conflict(Json<ErrorBody>),

    #[oai(status = 423)]
    AccountLocked(Json<ErrorBody>),

    #[oai(status = 500)]
    Internal(Json<ErrorBody>),
}

impl ApiError {
    fn body(error: &str, message: impl Into<String>) -> Json<ErrorBody> {
        Json(ErrorBody {
            error: error.to_string(),
            message: message.into(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(Self::body("validation_error", message))
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(Self::body("unauthorized", "Invalid or missing credentials"))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Self::body("forbidden", message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(Self::body("not_found", message))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(Self::body("conflict", message))
    }

    pub fn account_locked(until: i64) -> Self {
        ApiError::AccountLocked(Self::body(
            "account_locked",
            format!("Account is temporarily locked until {until}"),
        ))
    }

    pub fn internal() -> Self {
        ApiError::Internal(Self::body("internal_error", "Internal server error"))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => ApiError::validation(message),
            DomainError::Unauthorized => ApiError::unauthorized(),
            DomainError::Forbidden(message) => ApiError::forbidden(message),
            DomainError::NotFound(entity) => ApiError::not_found(entity),
            DomainError::Conflict(message) => ApiError::conflict(message),
            DomainError::AccountLocked { until } => ApiError::account_locked(until),
            DomainError::Database { .. } | DomainError::Crypto { .. } => {
                tracing::error!(error = %err, "internal error reached the API boundary");
                ApiError::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_detail_does_not_leak() {
        let err = DomainError::database(
            "find user",
            sea_orm::DbErr::Custom("connection refused to db.internal:5432".to_string()),
        );
        let api: ApiError = err.into();
        match api {
            ApiError::Internal(body) => {
                assert!(!body.0.message.contains("db.internal"));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_taxonomy_maps_to_stable_variants() {
        assert!(matches!(
            ApiError::from(DomainError::Unauthorized),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::conflict("slug taken")),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(DomainError::AccountLocked { until: 0 }),
            ApiError::AccountLocked(_)
        ));
    }
}
