//! SeatGeek Platform API v2 adapter (vendor B)

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use ticket_types::constants::SEATGEEK_MAX_PAGE_SIZE;
use ticket_types::{
	Adapter, AdapterError, AdapterResult, RawVendorRecord, SearchFilter, VendorAdapter, Vendor,
};
use tracing::debug;
use url::Url;

use crate::client::{build_client, build_url, read_json, VendorEndpoint};

/// SeatGeek takes UTC timestamps without an offset suffix
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Adapter for `GET {endpoint}/events`
#[derive(Debug)]
pub struct SeatGeekAdapter {
	config: Adapter,
	endpoint: VendorEndpoint,
	client: Client,
}

impl SeatGeekAdapter {
	pub const DEFAULT_ENDPOINT: &'static str = "https://api.seatgeek.com/2";

	pub fn new(endpoint: VendorEndpoint) -> AdapterResult<Self> {
		build_url(&endpoint.endpoint, "events")?;
		let client = build_client(&endpoint, "SeatGeek-v2")?;
		Ok(Self {
			config: Adapter::new(
				"seatgeek-v2".to_string(),
				"SeatGeek".to_string(),
				"SeatGeek Platform API v2".to_string(),
				"2.0.0".to_string(),
			),
			endpoint,
			client,
		})
	}

	fn search_url(&self, filter: &SearchFilter) -> AdapterResult<Url> {
		if filter.size() > SEATGEEK_MAX_PAGE_SIZE {
			return Err(AdapterError::InvalidFilter {
				vendor: Vendor::SeatGeek.to_string(),
				reason: format!(
					"size {} exceeds the page limit of {}",
					filter.size(),
					SEATGEEK_MAX_PAGE_SIZE
				),
			});
		}

		let mut url = build_url(&self.endpoint.endpoint, "events")?;
		{
			let mut query = url.query_pairs_mut();
			query.append_pair("client_id", self.endpoint.api_key.expose_secret());
			if let Some(secret) = &self.endpoint.api_secret {
				query.append_pair("client_secret", secret.expose_secret());
			}
			query
				.append_pair("postal_code", filter.postal_code())
				.append_pair("lowest_price.lte", &filter.max_price().to_string())
				.append_pair(
					"datetime_utc.gte",
					&filter.start_date().format(DATE_FORMAT).to_string(),
				)
				.append_pair(
					"datetime_utc.lte",
					&filter.end_date().format(DATE_FORMAT).to_string(),
				)
				.append_pair("per_page", &filter.size().to_string());
		}
		Ok(url)
	}
}

/// Pull the top-level `events` array, which SeatGeek always includes
fn extract_events(body: Value) -> AdapterResult<Vec<RawVendorRecord>> {
	match body {
		Value::Object(mut body) => match body.remove("events") {
			Some(Value::Array(events)) => Ok(events.into_iter().map(RawVendorRecord::new).collect()),
			Some(_) => Err(AdapterError::MalformedResponse {
				reason: "events is not an array".to_string(),
			}),
			None => Err(AdapterError::MalformedResponse {
				reason: "response has no events array".to_string(),
			}),
		},
		_ => Err(AdapterError::MalformedResponse {
			reason: "expected a JSON object".to_string(),
		}),
	}
}

#[async_trait]
impl VendorAdapter for SeatGeekAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn vendor(&self) -> Vendor {
		Vendor::SeatGeek
	}

	async fn search(&self, filter: &SearchFilter) -> AdapterResult<Vec<RawVendorRecord>> {
		let url = self.search_url(filter)?;
		debug!(
			"Searching SeatGeek for postal code {} under {}",
			filter.postal_code(),
			filter.max_price()
		);

		let response = self
			.client
			.get(url)
			.send()
			.await
			.map_err(AdapterError::from_transport)?;
		let records = extract_events(read_json(response).await?)?;

		debug!("SeatGeek returned {} records", records.len());
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

	fn filter() -> SearchFilter {
		SearchFilter::new(
			"94103",
			75.5,
			Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
			Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap(),
			10,
		)
		.unwrap()
	}

	#[tokio::test]
	async fn test_search_sends_platform_query() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/events"))
			.and(query_param("client_id", "sg-id"))
			.and(query_param("client_secret", "sg-secret"))
			.and(query_param("postal_code", "94103"))
			.and(query_param("lowest_price.lte", "75.5"))
			.and(query_param("datetime_utc.gte", "2025-06-01T00:00:00"))
			.and(query_param("datetime_utc.lte", "2025-06-30T23:59:59"))
			.and(query_param("per_page", "10"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"events": [ { "id": 1 }, { "id": 2 } ],
				"meta": { "total": 2 }
			})))
			.expect(1)
			.mount(&server)
			.await;

		let adapter = SeatGeekAdapter::new(
			VendorEndpoint::new(server.uri(), "sg-id").with_secret("sg-secret"),
		)
		.unwrap();
		let records = adapter.search(&filter()).await.unwrap();
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].as_value(), &json!({ "id": 1 }));
	}

	#[tokio::test]
	async fn test_missing_events_array_is_malformed() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/events"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meta": {} })))
			.mount(&server)
			.await;

		let adapter = SeatGeekAdapter::new(VendorEndpoint::new(server.uri(), "sg-id")).unwrap();
		let err = adapter.search(&filter()).await.unwrap_err();
		assert!(matches!(err, AdapterError::MalformedResponse { .. }));
	}

	#[tokio::test]
	async fn test_server_error_is_vendor_api_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(500))
			.mount(&server)
			.await;

		let adapter = SeatGeekAdapter::new(VendorEndpoint::new(server.uri(), "sg-id")).unwrap();
		let err = adapter.search(&filter()).await.unwrap_err();
		assert_eq!(err.status_code(), Some(500));
	}

	#[tokio::test]
	async fn test_slow_vendor_times_out_as_network_error() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(json!({ "events": [] }))
					.set_delay(std::time::Duration::from_millis(1_000)),
			)
			.mount(&server)
			.await;

		let adapter =
			SeatGeekAdapter::new(VendorEndpoint::new(server.uri(), "sg-id").with_timeout_ms(100)).unwrap();
		let err = adapter.search(&filter()).await.unwrap_err();
		assert!(matches!(err, AdapterError::Network(_)));
	}

	#[test]
	fn test_invalid_endpoint_is_rejected_at_construction() {
		let err = SeatGeekAdapter::new(VendorEndpoint::new("::nope::", "sg-id")).unwrap_err();
		assert!(matches!(err, AdapterError::ConfigError { .. }));
	}
}
