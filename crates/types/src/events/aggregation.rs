//! Aggregation result model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{Event, NormalizationError};
use crate::adapters::AdapterError;
use crate::vendors::Vendor;

/// Category of a per-vendor failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum VendorFailureKind {
	InvalidFilter,
	Network,
	VendorApi,
	MalformedResponse,
	Internal,
}

/// Why one vendor contributed no events to an aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VendorFailure {
	pub kind: VendorFailureKind,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status_code: Option<u16>,
}

impl VendorFailure {
	pub fn internal(message: impl Into<String>) -> Self {
		Self {
			kind: VendorFailureKind::Internal,
			message: message.into(),
			status_code: None,
		}
	}
}

impl From<&AdapterError> for VendorFailure {
	fn from(error: &AdapterError) -> Self {
		let kind = match error {
			AdapterError::InvalidFilter { .. } => VendorFailureKind::InvalidFilter,
			AdapterError::Network(_) | AdapterError::Timeout { .. } => VendorFailureKind::Network,
			AdapterError::VendorApi { .. } => VendorFailureKind::VendorApi,
			AdapterError::MalformedResponse { .. } => VendorFailureKind::MalformedResponse,
			AdapterError::ConfigError { .. } | AdapterError::AlreadyRegistered { .. } => {
				VendorFailureKind::Internal
			},
		};
		Self {
			kind,
			message: error.to_string(),
			status_code: error.status_code(),
		}
	}
}

/// A single record dropped during normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NormalizationWarning {
	pub vendor: Vendor,
	pub reason: String,
}

impl From<&NormalizationError> for NormalizationWarning {
	fn from(error: &NormalizationError) -> Self {
		let vendor = match error {
			NormalizationError::MissingIdentifier { vendor, .. }
			| NormalizationError::UnrecognizedShape { vendor, .. } => *vendor,
		};
		Self {
			vendor,
			reason: error.to_string(),
		}
	}
}

/// Outcome of one fan-out across vendors
///
/// Every queried vendor has an entry in `events_by_vendor`, empty when the
/// vendor failed. Events keep the vendor's response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
	pub events_by_vendor: BTreeMap<Vendor, Vec<Event>>,
	pub errors: BTreeMap<Vendor, VendorFailure>,
	pub warnings: Vec<NormalizationWarning>,
}

impl AggregationResult {
	pub fn events_for(&self, vendor: Vendor) -> &[Event] {
		self.events_by_vendor
			.get(&vendor)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn total_events(&self) -> usize {
		self.events_by_vendor.values().map(Vec::len).sum()
	}

	/// All events, vendor by vendor in `Vendor` order
	pub fn into_events(self) -> Vec<Event> {
		self.events_by_vendor.into_values().flatten().collect()
	}

	pub fn is_complete(&self) -> bool {
		self.errors.is_empty()
	}
}
