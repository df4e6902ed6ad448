use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use serde::Serialize;
use ticket_service::{AggregatorServiceError, DocumentServiceError};
use ticket_types::{FilterValidationError, StorageError};
use tracing::warn;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: &str, message: impl Into<String>) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

/// A search body that did not deserialize is reported like any other bad filter
pub fn filter_rejection(rejection: JsonRejection) -> ApiError {
	api_error(
		StatusCode::BAD_REQUEST,
		"INVALID_FILTER",
		format!("Invalid search request: {}", rejection.body_text()),
	)
}

pub fn body_rejection(rejection: JsonRejection) -> ApiError {
	api_error(rejection.status(), "INVALID_REQUEST", rejection.body_text())
}

pub fn filter_error(error: FilterValidationError) -> ApiError {
	api_error(
		StatusCode::BAD_REQUEST,
		"INVALID_FILTER",
		format!("Invalid search request: {}", error),
	)
}

pub fn aggregator_error(error: AggregatorServiceError) -> ApiError {
	match error {
		AggregatorServiceError::InvalidArgument(message) => {
			api_error(StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", message)
		},
	}
}

pub fn document_error(error: DocumentServiceError) -> ApiError {
	match error {
		DocumentServiceError::Storage(e) => storage_error(e),
	}
}

pub fn storage_error(error: StorageError) -> ApiError {
	warn!("Document store call failed: {}", error);
	match error {
		StorageError::Unavailable { message } => api_error(
			StatusCode::SERVICE_UNAVAILABLE,
			"STORE_UNAVAILABLE",
			format!("Document store unavailable: {}", message),
		),
		StorageError::Request {
			status_code,
			message,
		} => api_error(
			StatusCode::BAD_GATEWAY,
			"STORE_REQUEST_FAILED",
			format!("Document store returned {}: {}", status_code, message),
		),
		StorageError::Serialization { message } => api_error(
			StatusCode::INTERNAL_SERVER_ERROR,
			"STORE_RESPONSE_INVALID",
			format!("Unexpected document store reply: {}", message),
		),
		StorageError::Configuration { message } => api_error(
			StatusCode::INTERNAL_SERVER_ERROR,
			"STORE_MISCONFIGURED",
			message,
		),
	}
}
