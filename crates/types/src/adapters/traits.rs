//! Core adapter trait for vendor implementations

use super::{Adapter, AdapterResult, RawVendorRecord};
use crate::events::SearchFilter;
use crate::vendors::Vendor;
use async_trait::async_trait;
use std::fmt::Debug;

/// Core trait for ticket vendor adapter implementations
///
/// An adapter turns one `SearchFilter` into exactly one outbound request
/// against its vendor and hands back the vendor's event objects untouched.
/// Normalization happens elsewhere.
#[async_trait]
pub trait VendorAdapter: Send + Sync + Debug {
	/// Get adapter information
	fn adapter_info(&self) -> &Adapter;

	/// Vendor this adapter talks to (used for registration and result keys)
	fn vendor(&self) -> Vendor;

	/// Get adapter ID
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Search the vendor for events matching the filter
	///
	/// Returns records in the vendor's response order. Fails with
	/// `AdapterError::InvalidFilter` without touching the network when the
	/// filter cannot be expressed in the vendor's wire format.
	async fn search(&self, filter: &SearchFilter) -> AdapterResult<Vec<RawVendorRecord>>;

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Get adapter version
	fn version(&self) -> &str {
		&self.adapter_info().version
	}
}
