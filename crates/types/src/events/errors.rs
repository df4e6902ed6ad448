//! Error types for event filters, normalization and conversion

use thiserror::Error;

use crate::vendors::Vendor;

/// Validation errors for search filters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterValidationError {
	#[error("Missing required field: {field}")]
	MissingField { field: String },

	#[error("Invalid {field}: {reason}")]
	InvalidField { field: String, reason: String },

	#[error("Invalid date range: startDate {start} is after endDate {end}")]
	InvertedDateRange { start: String, end: String },
}

/// A vendor record that cannot become an `Event`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
	#[error("{vendor} record is missing its identifier ({field})")]
	MissingIdentifier { vendor: Vendor, field: &'static str },

	#[error("{vendor} record has an unrecognized shape: {reason}")]
	UnrecognizedShape { vendor: Vendor, reason: String },
}

/// A stored document that cannot become an `Event`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventConversionError {
	#[error("Document is missing field: {field}")]
	MissingField { field: String },

	#[error("Document field {field} is invalid: {reason}")]
	InvalidField { field: String, reason: String },
}
