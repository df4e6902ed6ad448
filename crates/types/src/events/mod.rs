//! Canonical event domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::vendors::Vendor;

pub mod aggregation;
pub mod errors;
pub mod normalizer;
pub mod request;
pub mod storage;

pub use aggregation::{AggregationResult, NormalizationWarning, VendorFailure, VendorFailureKind};
pub use errors::{EventConversionError, FilterValidationError, NormalizationError};
pub use normalizer::EventNormalizer;
pub use request::{EventSearchRequest, PostalCodeInput, SearchFilter};

pub type FilterValidationResult<T> = Result<T, FilterValidationError>;

/// A ticketed event in the shape shared by every vendor
///
/// `(source_vendor, source_id)` identifies where the event came from. `id` is
/// only set once the document store has assigned one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub name: String,
	pub venue: String,
	pub date: DateTime<Utc>,
	pub price: f64,
	pub source_vendor: Vendor,
	pub source_id: String,
}

impl Event {
	/// Provenance key; distinct across vendors even for the same real-world show
	pub fn provenance(&self) -> (Vendor, &str) {
		(self.source_vendor, &self.source_id)
	}

	/// Copy of this event with the store-assigned id attached
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}
}
