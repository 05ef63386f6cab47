//! # Error Handling
//!
//! Errors for every layer of the booking directory:
//!
//! * [`RepositoryError`] is returned by the repository layer.
//! * [`BookingError`] is the failure side of a use-case [`Outcome`], split into
//!   [`ValidationFailure`] and [`PersistenceFailure`].
//! * [`ApiError`] is the problem+json body the HTTP layer renders.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::genres::GenresError;
use crate::telemetry;

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("not found: {0}")]
    NotFound(String),
    /// A stored row that cannot be decoded into its domain type.
    #[error("invalid stored data: {0}")]
    Validation(String),
}

impl From<GenresError> for RepositoryError {
    fn from(err: GenresError) -> Self {
        Self::Validation(format!("genres column: {err}"))
    }
}

/// Tag of a use-case outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    ValidationFailed,
    PersistenceFailed,
}

impl OutcomeKind {
    /// Tag of an already computed outcome.
    pub fn of<T>(outcome: &Outcome<T>) -> Self {
        match outcome {
            Ok(_) => OutcomeKind::Success,
            Err(err) => err.kind(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::ValidationFailed => "validation_failed",
            OutcomeKind::PersistenceFailed => "persistence_failed",
        }
    }
}

/// Input rejected before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },
    #[error("field '{field}' is invalid: {message}")]
    InvalidField { field: &'static str, message: String },
    #[error("the availability period is not correctly set")]
    BadAvailabilityFormat,
    #[error("the start time of the show should be in the availability period of the artist")]
    ShowOutsideAvailability,
}

impl ValidationFailure {
    /// Stable SCREAMING_SNAKE_CASE code for API clients.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationFailure::MissingField { .. } => "MISSING_FIELD",
            ValidationFailure::InvalidField { .. } => "INVALID_FIELD",
            ValidationFailure::BadAvailabilityFormat => "BAD_AVAILABILITY_FORMAT",
            ValidationFailure::ShowOutsideAvailability => "SHOW_OUTSIDE_AVAILABILITY",
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationFailure::MissingField { field }
            | ValidationFailure::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// Failure reported by the persistence collaborator.
///
/// A missing row is a persistence failure, not a separate outcome kind;
/// `NotFound` only lets the HTTP layer pick a better status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceFailure {
    #[error("{entity} {id} could not be found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl PersistenceFailure {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<RepositoryError> for PersistenceFailure {
    fn from(err: RepositoryError) -> Self {
        PersistenceFailure::Storage {
            message: err.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for PersistenceFailure {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::Database(err).into()
    }
}

/// Failure side of a use-case outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Persistence(#[from] PersistenceFailure),
}

impl BookingError {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            BookingError::Validation(_) => OutcomeKind::ValidationFailed,
            BookingError::Persistence(_) => OutcomeKind::PersistenceFailed,
        }
    }

    /// Human-readable reason suitable for showing to the user.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl From<RepositoryError> for BookingError {
    fn from(err: RepositoryError) -> Self {
        BookingError::Persistence(err.into())
    }
}

impl From<sea_orm::DbErr> for BookingError {
    fn from(err: sea_orm::DbErr) -> Self {
        BookingError::Persistence(err.into())
    }
}

/// Result of a booking use case: `Ok(payload)` is the success outcome.
pub type Outcome<T> = Result<T, BookingError>;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing, skip_deserializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Correlation trace ID for debugging (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<Box<str>>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new<S: Into<String>>(status: StatusCode, code: S, message: S) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            trace_id: Self::current_trace_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    /// Trace ID of the current request, or a fresh correlation ID outside one
    fn current_trace_id() -> Option<Box<str>> {
        telemetry::current_trace_id()
            .map(|trace_id| trace_id.into_boxed_str())
            .or_else(|| {
                Some(format!("corr-{}", &uuid::Uuid::new_v4().to_string()[..8]).into_boxed_str())
            })
    }
}

/// Standard error types with predefined status codes
#[derive(Debug, Error)]
pub enum ErrorType {
    #[error("Bad Request")]
    BadRequest,
    #[error("Not Found")]
    NotFound,
    #[error("Internal Server Error")]
    InternalServerError,
    #[error("Service Unavailable")]
    ServiceUnavailable,
}

impl ErrorType {
    /// Get the appropriate HTTP status code for this error type
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorType::BadRequest => StatusCode::BAD_REQUEST,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code string for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorType::BadRequest => "VALIDATION_FAILED",
            ErrorType::NotFound => "NOT_FOUND",
            ErrorType::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorType::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        (self.status, headers, axum::Json(self)).into_response()
    }
}

impl From<ErrorType> for ApiError {
    fn from(error_type: ErrorType) -> Self {
        Self::new(
            error_type.status_code(),
            error_type.error_code(),
            &error_type.to_string(),
        )
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", error);

        let kind = ErrorType::InternalServerError;
        Self::new(
            kind.status_code(),
            kind.error_code(),
            "An internal error occurred",
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        let kind = ErrorType::BadRequest;
        Self::new(kind.status_code(), kind.error_code(), &message)
    }
}

impl From<BookingError> for ApiError {
    fn from(error: BookingError) -> Self {
        match &error {
            BookingError::Validation(failure) => validation_error(
                &error.reason(),
                json!({
                    "reason": failure.code(),
                    "field": failure.field(),
                }),
            ),
            BookingError::Persistence(PersistenceFailure::NotFound { entity, id }) => {
                let kind = ErrorType::NotFound;
                Self::new(kind.status_code(), kind.error_code(), &error.reason()).with_details(
                    json!({
                        "entity": entity,
                        "id": id,
                    }),
                )
            }
            BookingError::Persistence(PersistenceFailure::Storage { message }) => {
                tracing::error!(error = %message, "Persistence failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_FAILED",
                    "An error occurred while accessing the directory",
                )
            }
        }
    }
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    let kind = ErrorType::BadRequest;
    ApiError::new(kind.status_code(), kind.error_code(), message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_api_error_basic() {
        let error = ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Test error message",
        );

        assert_eq!(error.code, Box::from("VALIDATION_FAILED"));
        assert_eq!(error.message, Box::from("Test error message"));
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_error_type_mapping() {
        let not_found_error: ApiError = ErrorType::NotFound.into();
        assert_eq!(not_found_error.code, Box::from("NOT_FOUND"));
        assert_eq!(not_found_error.message, Box::from("Not Found"));
    }

    #[test]
    fn bad_request_kind_maps_to_validation_failed() {
        let kind = ErrorType::BadRequest;
        assert_eq!(kind.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(kind.error_code(), "VALIDATION_FAILED");

        let api_error = validation_error("bad", json!({}));
        assert_eq!(api_error.status, kind.status_code());
        assert_eq!(api_error.code, Box::from(kind.error_code()));
    }

    #[test]
    fn test_from_anyhow() {
        let api_error: ApiError = anyhow::anyhow!("Something went wrong").into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.code, Box::from("INTERNAL_SERVER_ERROR"));
        assert_eq!(api_error.message, Box::from("An internal error occurred"));
    }

    #[test]
    fn test_content_type_header() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "Test error");

        let response = error.into_response();

        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn test_trace_id_generation() {
        let error = ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Test error",
        );

        let trace_id = error.trace_id.unwrap();
        assert!(trace_id.starts_with("corr-"));
        assert_eq!(trace_id.len(), 13); // "corr-" + 8 chars
    }

    #[test]
    fn outcome_kind_follows_error_variant() {
        let ok: Outcome<()> = Ok(());
        let invalid: Outcome<()> = Err(ValidationFailure::BadAvailabilityFormat.into());
        let missing: Outcome<()> = Err(PersistenceFailure::not_found("venue", 3).into());

        assert_eq!(OutcomeKind::of(&ok), OutcomeKind::Success);
        assert_eq!(OutcomeKind::of(&invalid), OutcomeKind::ValidationFailed);
        assert_eq!(OutcomeKind::of(&missing), OutcomeKind::PersistenceFailed);
    }

    #[test]
    fn repository_not_found_is_a_persistence_failure() {
        let err: BookingError = RepositoryError::NotFound("venue 9".to_string()).into();
        assert_eq!(err.kind(), OutcomeKind::PersistenceFailed);
    }

    #[test]
    fn validation_failure_maps_to_400_with_reason_code() {
        let api_error: ApiError = BookingError::from(ValidationFailure::ShowOutsideAvailability).into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.code, Box::from("VALIDATION_FAILED"));
        let details = api_error.details.unwrap();
        assert_eq!(details["reason"], json!("SHOW_OUTSIDE_AVAILABILITY"));
        assert_eq!(details["field"], json!(null));
    }

    #[test]
    fn missing_field_reports_field_name() {
        let api_error: ApiError =
            BookingError::from(ValidationFailure::MissingField { field: "city" }).into();

        let details = api_error.details.unwrap();
        assert_eq!(details["reason"], json!("MISSING_FIELD"));
        assert_eq!(details["field"], json!("city"));
        assert!(api_error.message.contains("city"));
    }

    #[test]
    fn not_found_maps_to_404_and_storage_to_500() {
        let not_found: ApiError = BookingError::from(PersistenceFailure::not_found("artist", 4)).into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        assert_eq!(not_found.code, Box::from("NOT_FOUND"));
        assert_eq!(not_found.details.unwrap()["id"], json!(4));

        let storage: ApiError = BookingError::from(PersistenceFailure::Storage {
            message: "disk on fire".to_string(),
        })
        .into();
        assert_eq!(storage.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(storage.code, Box::from("PERSISTENCE_FAILED"));
        assert!(!storage.message.contains("disk on fire"));
    }
}
