//! Core aggregation service logic

use futures::future::join_all;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use ticket_adapters::AdapterRegistry;
use ticket_types::{
	AdapterError, AggregationResult, Event, EventNormalizer, NormalizationWarning, RawVendorRecord,
	SearchFilter, Vendor, VendorFailure,
};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum AggregatorServiceError {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

/// Fans one search out to every requested vendor and merges the results
#[derive(Debug, Clone)]
pub struct AggregatorService {
	adapter_registry: Arc<AdapterRegistry>,
	per_vendor_timeout_ms: u64,
}

impl AggregatorService {
	pub fn new(adapter_registry: Arc<AdapterRegistry>, per_vendor_timeout_ms: u64) -> Self {
		Self {
			adapter_registry,
			per_vendor_timeout_ms,
		}
	}

	/// Vendors with a registered adapter
	pub fn vendors(&self) -> BTreeSet<Vendor> {
		self.adapter_registry.vendors()
	}

	/// Search every registered vendor
	pub async fn aggregate_all(
		&self,
		filter: &SearchFilter,
	) -> Result<AggregationResult, AggregatorServiceError> {
		self.aggregate(filter, &self.vendors()).await
	}

	/// Search the given vendors concurrently
	///
	/// Vendor failures never fail the call: each one is recorded under
	/// `errors` and leaves that vendor's event list empty. Only an empty
	/// vendor set or a vendor without an adapter is an error.
	pub async fn aggregate(
		&self,
		filter: &SearchFilter,
		vendors: &BTreeSet<Vendor>,
	) -> Result<AggregationResult, AggregatorServiceError> {
		if vendors.is_empty() {
			return Err(AggregatorServiceError::InvalidArgument(
				"at least one vendor must be requested".to_string(),
			));
		}

		let adapters = vendors
			.iter()
			.map(|vendor| {
				self.adapter_registry
					.get(*vendor)
					.map(|adapter| (*vendor, adapter))
					.ok_or_else(|| {
						AggregatorServiceError::InvalidArgument(format!(
							"no adapter registered for vendor {}",
							vendor
						))
					})
			})
			.collect::<Result<Vec<_>, _>>()?;

		info!(
			"Searching {} vendors for postal code {}",
			adapters.len(),
			filter.postal_code()
		);

		let per_vendor_timeout = Duration::from_millis(self.per_vendor_timeout_ms);
		let timeout_ms = self.per_vendor_timeout_ms;
		let tasks = adapters.iter().map(|(vendor, adapter)| {
			let adapter = Arc::clone(adapter);
			let filter = filter.clone();
			let vendor = *vendor;

			tokio::spawn(async move {
				debug!("Starting search on {}", vendor);
				match timeout(per_vendor_timeout, adapter.search(&filter)).await {
					Ok(result) => result,
					Err(_) => Err(AdapterError::Timeout { timeout_ms }),
				}
			})
		});

		let outcomes = join_all(tasks).await;

		let mut result = AggregationResult::default();
		for ((vendor, _), outcome) in adapters.iter().zip(outcomes) {
			let vendor = *vendor;
			let records = match outcome {
				Ok(Ok(records)) => records,
				Ok(Err(e)) => {
					warn!("Vendor {} search failed: {}", vendor, e);
					result.errors.insert(vendor, VendorFailure::from(&e));
					result.events_by_vendor.insert(vendor, Vec::new());
					continue;
				},
				Err(join_error) => {
					warn!("Vendor {} search task aborted: {}", vendor, join_error);
					result.errors.insert(
						vendor,
						VendorFailure::internal(format!("search task failed: {}", join_error)),
					);
					result.events_by_vendor.insert(vendor, Vec::new());
					continue;
				},
			};

			let events = normalize_all(vendor, &records, &mut result.warnings);
			debug!(
				"Vendor {} returned {} records, {} normalized",
				vendor,
				records.len(),
				events.len()
			);
			result.events_by_vendor.insert(vendor, events);
		}

		info!(
			"Aggregation completed: {} events, {} vendor errors, {} skipped records",
			result.total_events(),
			result.errors.len(),
			result.warnings.len()
		);

		Ok(result)
	}
}

fn normalize_all(
	vendor: Vendor,
	records: &[RawVendorRecord],
	warnings: &mut Vec<NormalizationWarning>,
) -> Vec<Event> {
	records
		.iter()
		.filter_map(|record| match EventNormalizer::normalize(record, vendor) {
			Ok(event) => Some(event),
			Err(e) => {
				warn!("Skipping {} record: {}", vendor, e);
				warnings.push(NormalizationWarning::from(&e));
				None
			},
		})
		.collect()
}
