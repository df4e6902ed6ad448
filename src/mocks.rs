//! Mock vendor adapters for demos and tests
//!
//! Each mock answers every search with a canned outcome, optionally after a
//! delay, without any network access.

use std::time::Duration;

use async_trait::async_trait;
use ticket_types::serde_json::{json, Value};
use ticket_types::{
	Adapter, AdapterError, AdapterResult, RawVendorRecord, SearchFilter, Vendor, VendorAdapter,
};

#[derive(Debug, Clone)]
enum MockOutcome {
	Records(Vec<Value>),
	Failure(AdapterError),
}

/// Adapter that returns fixed records (or a fixed error) for one vendor
#[derive(Debug, Clone)]
pub struct MockVendorAdapter {
	adapter: Adapter,
	vendor: Vendor,
	outcome: MockOutcome,
	delay: Option<Duration>,
}

impl MockVendorAdapter {
	pub fn with_records(vendor: Vendor, records: Vec<Value>) -> Self {
		Self {
			adapter: Adapter::new(
				format!("mock-{}-v1", vendor),
				format!("Mock {} Adapter", vendor),
				"Returns canned vendor records".to_string(),
				"1.0.0".to_string(),
			),
			vendor,
			outcome: MockOutcome::Records(records),
			delay: None,
		}
	}

	pub fn failing(vendor: Vendor, error: AdapterError) -> Self {
		let mut adapter = Self::with_records(vendor, Vec::new());
		adapter.outcome = MockOutcome::Failure(error);
		adapter
	}

	/// Ticketmaster-shaped records, `count` of them
	pub fn ticketmaster(count: usize) -> Self {
		let records = (1..=count).map(ticketmaster_record).collect();
		Self::with_records(Vendor::Ticketmaster, records)
	}

	/// SeatGeek-shaped records, `count` of them
	pub fn seatgeek(count: usize) -> Self {
		let records = (1..=count).map(seatgeek_record).collect();
		Self::with_records(Vendor::SeatGeek, records)
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn boxed(self) -> Box<dyn VendorAdapter> {
		Box::new(self)
	}
}

#[async_trait]
impl VendorAdapter for MockVendorAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn vendor(&self) -> Vendor {
		self.vendor
	}

	async fn search(&self, filter: &SearchFilter) -> AdapterResult<Vec<RawVendorRecord>> {
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		match &self.outcome {
			MockOutcome::Records(records) => Ok(records
				.iter()
				.take(filter.size() as usize)
				.cloned()
				.map(RawVendorRecord::new)
				.collect()),
			MockOutcome::Failure(error) => Err(error.clone()),
		}
	}
}

pub fn ticketmaster_record(n: usize) -> Value {
	json!({
		"id": format!("tm-{}", n),
		"name": format!("Ticketmaster Show {}", n),
		"dates": { "start": { "localDate": "2025-06-10", "dateTime": "2025-06-10T20:00:00Z" } },
		"priceRanges": [ { "min": 40.0 + n as f64, "max": 120.0 } ],
		"_embedded": { "venues": [ { "name": "Madison Square Garden" } ] }
	})
}

pub fn seatgeek_record(n: usize) -> Value {
	json!({
		"id": 7_000_000 + n,
		"title": format!("SeatGeek Show {}", n),
		"datetime_utc": "2025-06-12T19:30:00",
		"venue": { "name": "Barclays Center" },
		"stats": { "lowest_price": 25 + n }
	})
}
