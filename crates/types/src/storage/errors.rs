//! Error types for document store operations

use thiserror::Error;

/// Storage error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
	#[error("Document store unavailable: {message}")]
	Unavailable { message: String },
	#[error("Document store rejected the request ({status_code}): {message}")]
	Request { status_code: u16, message: String },
	#[error("Serialization error: {message}")]
	Serialization { message: String },
	#[error("Document store configuration error: {message}")]
	Configuration { message: String },
}

impl StorageError {
	/// Classify a transport-level failure from the HTTP client
	pub fn from_transport(error: reqwest::Error) -> Self {
		if error.is_decode() {
			return StorageError::Serialization {
				message: error.to_string(),
			};
		}
		StorageError::Unavailable {
			message: error.to_string(),
		}
	}
}

impl From<serde_json::Error> for StorageError {
	fn from(error: serde_json::Error) -> Self {
		StorageError::Serialization {
			message: error.to_string(),
		}
	}
}
