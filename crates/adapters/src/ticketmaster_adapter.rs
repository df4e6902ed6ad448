//! Ticketmaster Discovery API v2 adapter (vendor A)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use ticket_types::constants::TICKETMASTER_MAX_PAGE_SIZE;
use ticket_types::{
	Adapter, AdapterError, AdapterResult, EventNormalizer, RawVendorRecord, SearchFilter,
	VendorAdapter, Vendor,
};
use tracing::debug;
use url::Url;

use crate::client::{build_client, build_url, read_json, VendorEndpoint};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Adapter for `GET {endpoint}/events.json`
///
/// The Discovery API has no price filter, so records whose cheapest known
/// price exceeds `max_price` are dropped after the response is read.
#[derive(Debug)]
pub struct TicketmasterAdapter {
	config: Adapter,
	endpoint: VendorEndpoint,
	client: Client,
}

impl TicketmasterAdapter {
	pub const DEFAULT_ENDPOINT: &'static str = "https://app.ticketmaster.com/discovery/v2";

	pub fn new(endpoint: VendorEndpoint) -> AdapterResult<Self> {
		build_url(&endpoint.endpoint, "events.json")?;
		let client = build_client(&endpoint, "Ticketmaster-v2")?;
		Ok(Self {
			config: Adapter::new(
				"ticketmaster-v2".to_string(),
				"Ticketmaster".to_string(),
				"Ticketmaster Discovery API v2".to_string(),
				"2.0.0".to_string(),
			),
			endpoint,
			client,
		})
	}

	/// Query parameters for a filter; fails before any I/O when the filter
	/// does not fit the Discovery API
	fn search_url(&self, filter: &SearchFilter) -> AdapterResult<Url> {
		if filter.size() > TICKETMASTER_MAX_PAGE_SIZE {
			return Err(AdapterError::InvalidFilter {
				vendor: Vendor::Ticketmaster.to_string(),
				reason: format!(
					"size {} exceeds the page limit of {}",
					filter.size(),
					TICKETMASTER_MAX_PAGE_SIZE
				),
			});
		}

		let mut url = build_url(&self.endpoint.endpoint, "events.json")?;
		url.query_pairs_mut()
			.append_pair("apikey", self.endpoint.api_key.expose_secret())
			.append_pair("postalCode", filter.postal_code())
			.append_pair(
				"startDateTime",
				&filter.start_date().format(DATE_FORMAT).to_string(),
			)
			.append_pair(
				"endDateTime",
				&filter.end_date().format(DATE_FORMAT).to_string(),
			)
			.append_pair("size", &filter.size().to_string())
			.append_pair("sort", "date,asc");
		Ok(url)
	}
}

/// Pull `_embedded.events`; a page without `_embedded` simply has no results
fn extract_events(body: Value) -> AdapterResult<Vec<RawVendorRecord>> {
	let Value::Object(mut body) = body else {
		return Err(AdapterError::MalformedResponse {
			reason: "expected a JSON object".to_string(),
		});
	};

	let embedded = match body.remove("_embedded") {
		None | Some(Value::Null) => return Ok(Vec::new()),
		Some(Value::Object(embedded)) => embedded,
		Some(_) => {
			return Err(AdapterError::MalformedResponse {
				reason: "_embedded is not an object".to_string(),
			})
		},
	};

	match embedded.get("events") {
		None | Some(Value::Null) => Ok(Vec::new()),
		Some(Value::Array(events)) => Ok(events.iter().cloned().map(RawVendorRecord::new).collect()),
		Some(_) => Err(AdapterError::MalformedResponse {
			reason: "_embedded.events is not an array".to_string(),
		}),
	}
}

fn within_price(record: &RawVendorRecord, max_price: f64) -> bool {
	EventNormalizer::price(record, Vendor::Ticketmaster).map_or(true, |price| price <= max_price)
}

#[async_trait]
impl VendorAdapter for TicketmasterAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn vendor(&self) -> Vendor {
		Vendor::Ticketmaster
	}

	async fn search(&self, filter: &SearchFilter) -> AdapterResult<Vec<RawVendorRecord>> {
		let url = self.search_url(filter)?;
		debug!(
			"Searching Ticketmaster for postal code {} ({} results max)",
			filter.postal_code(),
			filter.size()
		);

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(AdapterError::from_transport)?;
		let records = extract_events(read_json(response).await?)?;
		let total = records.len();

		let records: Vec<_> = records
			.into_iter()
			.filter(|record| within_price(record, filter.max_price()))
			.collect();

		debug!(
			"Ticketmaster returned {} records, {} within max price",
			total,
			records.len()
		);
		Ok(records)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{TimeZone, Utc};
	use serde_json::json;
	use wiremock::matchers::{method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn filter(size: u32) -> SearchFilter {
		SearchFilter::new(
			"10001",
			100.0,
			Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
			Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap(),
			size,
		)
		.unwrap()
	}

	fn adapter(server: &MockServer) -> TicketmasterAdapter {
		TicketmasterAdapter::new(VendorEndpoint::new(server.uri(), "tm-key")).unwrap()
	}

	#[tokio::test]
	async fn test_search_sends_discovery_query() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/events.json"))
			.and(query_param("apikey", "tm-key"))
			.and(query_param("postalCode", "10001"))
			.and(query_param("startDateTime", "2025-06-01T00:00:00Z"))
			.and(query_param("endDateTime", "2025-06-30T23:59:59Z"))
			.and(query_param("size", "5"))
			.and(query_param("sort", "date,asc"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"_embedded": { "events": [
					{ "id": "a", "priceRanges": [ { "min": 40.0 } ] },
					{ "id": "b", "priceRanges": [ { "min": 150.0 } ] },
					{ "id": "c" }
				] }
			})))
			.expect(1)
			.mount(&server)
			.await;

		let records = adapter(&server).search(&filter(5)).await.unwrap();
		let ids: Vec<_> = records.iter().filter_map(|r| r.str_at("/id")).collect();
		assert_eq!(ids, vec!["a", "c"]);
	}

	#[tokio::test]
	async fn test_page_without_embedded_is_empty() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/events.json"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": { "totalElements": 0 } })))
			.mount(&server)
			.await;

		let records = adapter(&server).search(&filter(5)).await.unwrap();
		assert!(records.is_empty());
	}

	#[tokio::test]
	async fn test_vendor_error_status_is_reported() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(401).set_body_string("Invalid ApiKey"))
			.mount(&server)
			.await;

		let err = adapter(&server).search(&filter(5)).await.unwrap_err();
		match err {
			AdapterError::VendorApi { status_code, body } => {
				assert_eq!(status_code, 401);
				assert_eq!(body, "Invalid ApiKey");
			},
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_non_json_body_is_malformed() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
			.mount(&server)
			.await;

		let err = adapter(&server).search(&filter(5)).await.unwrap_err();
		assert!(matches!(err, AdapterError::MalformedResponse { .. }));
	}

	#[tokio::test]
	async fn test_oversized_page_fails_without_request() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200))
			.expect(0)
			.mount(&server)
			.await;

		let err = adapter(&server).search(&filter(201)).await.unwrap_err();
		assert!(matches!(err, AdapterError::InvalidFilter { .. }));
	}

	#[tokio::test]
	async fn test_unreachable_vendor_is_network_error() {
		let adapter =
			TicketmasterAdapter::new(VendorEndpoint::new("http://127.0.0.1:1", "k").with_timeout_ms(500))
				.unwrap();
		let err = adapter.search(&filter(5)).await.unwrap_err();
		assert!(matches!(err, AdapterError::Network(_)));
	}
}
