//! Error types for adapter operations

use thiserror::Error;

/// Adapter operation errors
///
/// Each variant maps onto one of the per-vendor failure categories reported in
/// an aggregation result. None of them are retried by the adapter itself.
#[derive(Error, Debug, Clone)]
pub enum AdapterError {
	#[error("Invalid filter for {vendor}: {reason}")]
	InvalidFilter { vendor: String, reason: String },

	#[error("Network error: {0}")]
	Network(String),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Vendor API returned HTTP {status_code}: {body}")]
	VendorApi { status_code: u16, body: String },

	#[error("Malformed vendor response: {reason}")]
	MalformedResponse { reason: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Adapter already registered for vendor {vendor}")]
	AlreadyRegistered { vendor: String },
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::VendorApi { status_code, .. } => Some(*status_code),
			_ => None,
		}
	}

	/// Whether the failure happened before any network I/O was attempted
	pub fn is_pre_flight(&self) -> bool {
		matches!(
			self,
			AdapterError::InvalidFilter { .. } | AdapterError::ConfigError { .. }
		)
	}

	/// Classify a transport error raised by reqwest
	///
	/// Decoding failures become `MalformedResponse`; everything else that
	/// reqwest can raise before a status is known is treated as a network error.
	pub fn from_transport(error: reqwest::Error) -> Self {
		if error.is_decode() {
			AdapterError::MalformedResponse {
				reason: error.to_string(),
			}
		} else if error.is_timeout() {
			AdapterError::Network(format!("request timed out: {}", error))
		} else {
			AdapterError::Network(error.to_string())
		}
	}
}
