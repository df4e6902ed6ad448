//! Ticket Adapters
//!
//! Vendor-specific adapters for the ticket aggregator.

pub mod client;
pub mod seatgeek_adapter;
pub mod ticketmaster_adapter;

pub use client::VendorEndpoint;
pub use seatgeek_adapter::SeatGeekAdapter;
pub use ticketmaster_adapter::TicketmasterAdapter;
pub use ticket_types::{AdapterError, AdapterResult, VendorAdapter};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use ticket_types::Vendor;

/// The adapters available to one aggregator, at most one per vendor
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
	adapters: BTreeMap<Vendor, Arc<dyn VendorAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the adapter for `vendor` against the given endpoint
	pub fn create_adapter(
		vendor: Vendor,
		endpoint: VendorEndpoint,
	) -> AdapterResult<Box<dyn VendorAdapter>> {
		match vendor {
			Vendor::Ticketmaster => Ok(Box::new(TicketmasterAdapter::new(endpoint)?)),
			Vendor::SeatGeek => Ok(Box::new(SeatGeekAdapter::new(endpoint)?)),
		}
	}

	/// Register an adapter under the vendor it reports
	pub fn register(&mut self, adapter: Box<dyn VendorAdapter>) -> AdapterResult<()> {
		let vendor = adapter.vendor();
		if self.adapters.contains_key(&vendor) {
			return Err(AdapterError::AlreadyRegistered {
				vendor: vendor.to_string(),
			});
		}
		self.adapters.insert(vendor, Arc::from(adapter));
		Ok(())
	}

	pub fn with_adapters(adapters: Vec<Box<dyn VendorAdapter>>) -> AdapterResult<Self> {
		let mut registry = Self::new();
		for adapter in adapters {
			registry.register(adapter)?;
		}
		Ok(registry)
	}

	pub fn get(&self, vendor: Vendor) -> Option<Arc<dyn VendorAdapter>> {
		self.adapters.get(&vendor).cloned()
	}

	pub fn vendors(&self) -> BTreeSet<Vendor> {
		self.adapters.keys().copied().collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
