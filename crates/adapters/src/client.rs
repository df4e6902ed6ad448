//! HTTP plumbing shared by the vendor adapters
//!
//! Each adapter owns one `reqwest::Client` built from a `VendorEndpoint`, so
//! connections are pooled per vendor for the lifetime of the process.

use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, Response,
};
use serde_json::Value;
use std::{collections::HashMap, str::FromStr, time::Duration};
use ticket_types::constants::DEFAULT_VENDOR_TIMEOUT_MS;
use ticket_types::{AdapterError, AdapterResult, SecretString};
use tracing::debug;
use url::Url;

/// Connection settings for one vendor API
#[derive(Debug, Clone)]
pub struct VendorEndpoint {
	/// Base URL, e.g. `https://app.ticketmaster.com/discovery/v2`
	pub endpoint: String,
	/// Ticketmaster `apikey` or SeatGeek `client_id`
	pub api_key: SecretString,
	/// SeatGeek `client_secret`; unused by Ticketmaster
	pub api_secret: Option<SecretString>,
	pub timeout_ms: u64,
	/// Extra headers sent with every request
	pub headers: HashMap<String, String>,
}

impl VendorEndpoint {
	pub fn new(endpoint: impl Into<String>, api_key: impl Into<SecretString>) -> Self {
		Self {
			endpoint: endpoint.into(),
			api_key: api_key.into(),
			api_secret: None,
			timeout_ms: DEFAULT_VENDOR_TIMEOUT_MS,
			headers: HashMap::new(),
		}
	}

	pub fn with_secret(mut self, api_secret: impl Into<SecretString>) -> Self {
		self.api_secret = Some(api_secret.into());
		self
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}
}

/// Build a client with JSON defaults, the adapter tag and any configured headers
pub(crate) fn build_client(config: &VendorEndpoint, adapter_type: &'static str) -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert("Accept", HeaderValue::from_static("application/json"));
	headers.insert("User-Agent", HeaderValue::from_static("Ticket-Aggregator/0.1"));
	headers.insert("X-Adapter-Type", HeaderValue::from_static(adapter_type));

	for (key, value) in &config.headers {
		let name = HeaderName::from_str(key).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid header name '{}': {}", key, e),
		})?;
		let value = HeaderValue::from_str(value).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid value for header '{}': {}", key, e),
		})?;
		headers.insert(name, value);
	}

	Client::builder()
		.default_headers(headers)
		.timeout(Duration::from_millis(config.timeout_ms))
		.build()
		.map_err(|e| AdapterError::ConfigError {
			reason: format!("Failed to build HTTP client: {}", e),
		})
}

/// Join a path onto a base endpoint, keeping any path the base already has
pub(crate) fn build_url(base_url: &str, path: &str) -> AdapterResult<Url> {
	let mut base = Url::parse(base_url).map_err(|e| AdapterError::ConfigError {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	base.join(path.trim_start_matches('/'))
		.map_err(|e| AdapterError::ConfigError {
			reason: format!("Failed to join URL path '{}' to base '{}': {}", path, base_url, e),
		})
}

/// Read a vendor response into JSON, mapping non-2xx to `VendorApi`
pub(crate) async fn read_json(response: Response) -> AdapterResult<Value> {
	let status = response.status();
	let body = response.text().await.map_err(AdapterError::from_transport)?;

	if !status.is_success() {
		return Err(AdapterError::VendorApi {
			status_code: status.as_u16(),
			body,
		});
	}

	debug!("Vendor responded with {} bytes", body.len());

	serde_json::from_str(&body).map_err(|e| AdapterError::MalformedResponse {
		reason: format!("Response body is not JSON: {}", e),
	})
}
