//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use ticket_types::constants::{
	DEFAULT_STORE_TIMEOUT_MS, DEFAULT_VENDOR_TIMEOUT_MS, MAX_VENDOR_TIMEOUT_MS, MIN_VENDOR_TIMEOUT_MS,
};
use ticket_types::Vendor;

/// Main application settings
///
/// Every section has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub vendors: VendorSettings,
	pub document_store: DocumentStoreSettings,
	pub timeouts: TimeoutSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

/// One section per vendor
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VendorSettings {
	pub ticketmaster: VendorConfig,
	pub seatgeek: VendorConfig,
}

impl Default for VendorSettings {
	fn default() -> Self {
		Self {
			ticketmaster: VendorConfig::new(
				"https://app.ticketmaster.com/discovery/v2",
				ConfigurableValue::from_env("TICKETMASTER_API_KEY"),
				None,
			),
			seatgeek: VendorConfig::new(
				"https://api.seatgeek.com/2",
				ConfigurableValue::from_env("SEATGEEK_CLIENT_ID"),
				Some(ConfigurableValue::from_env("SEATGEEK_CLIENT_SECRET")),
			),
		}
	}
}

/// Connection settings for one vendor API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VendorConfig {
	#[serde(default = "default_true")]
	pub enabled: bool,
	pub endpoint: String,
	#[serde(default = "default_vendor_timeout_ms")]
	pub timeout_ms: u64,
	/// Ticketmaster `apikey` / SeatGeek `client_id`
	pub api_key: ConfigurableValue,
	/// SeatGeek `client_secret`
	#[serde(default)]
	pub api_secret: Option<ConfigurableValue>,
	#[serde(default)]
	pub headers: HashMap<String, String>,
}

impl VendorConfig {
	pub fn new(
		endpoint: &str,
		api_key: ConfigurableValue,
		api_secret: Option<ConfigurableValue>,
	) -> Self {
		Self {
			enabled: true,
			endpoint: endpoint.to_string(),
			timeout_ms: DEFAULT_VENDOR_TIMEOUT_MS,
			api_key,
			api_secret,
			headers: HashMap::new(),
		}
	}
}

fn default_true() -> bool {
	true
}

fn default_vendor_timeout_ms() -> u64 {
	DEFAULT_VENDOR_TIMEOUT_MS
}

/// Which document store implementation to run against
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
	Memory,
	DataApi,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DocumentStoreSettings {
	pub backend: StoreBackend,
	/// Data API base URL, required for `data_api`
	pub endpoint: Option<String>,
	pub data_source: String,
	pub database: String,
	pub collection: String,
	pub api_key: Option<ConfigurableValue>,
	pub timeout_ms: u64,
}

impl Default for DocumentStoreSettings {
	fn default() -> Self {
		Self {
			backend: StoreBackend::Memory,
			endpoint: None,
			data_source: "Cluster0".to_string(),
			database: "tickets".to_string(),
			collection: "events".to_string(),
			api_key: None,
			timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Upper bound on one vendor search inside an aggregation
	pub per_vendor_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_vendor_ms: DEFAULT_VENDOR_TIMEOUT_MS,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
			debug: true,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("{field} must be between {min} and {max}ms, got {value}ms")]
	TimeoutOutOfRange {
		field: String,
		value: u64,
		min: u64,
		max: u64,
	},
	#[error("{field} must be greater than zero")]
	ZeroValue { field: String },
	#[error("vendor {vendor} is enabled but has no endpoint")]
	MissingVendorEndpoint { vendor: Vendor },
	#[error("document_store.{field} is required for the data_api backend")]
	MissingStoreSetting { field: String },
}

impl Settings {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	pub fn vendor(&self, vendor: Vendor) -> &VendorConfig {
		match vendor {
			Vendor::Ticketmaster => &self.vendors.ticketmaster,
			Vendor::SeatGeek => &self.vendors.seatgeek,
		}
	}

	/// Enabled vendors in `Vendor` order
	pub fn enabled_vendors(&self) -> Vec<(Vendor, &VendorConfig)> {
		Vendor::ALL
			.into_iter()
			.map(|vendor| (vendor, self.vendor(vendor)))
			.filter(|(_, config)| config.enabled)
			.collect()
	}

	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Reject settings the service cannot run with
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		check_timeout("timeouts.per_vendor_ms", self.timeouts.per_vendor_ms)?;

		for (vendor, config) in self.enabled_vendors() {
			if config.endpoint.trim().is_empty() {
				return Err(ConfigValidationError::MissingVendorEndpoint { vendor });
			}
			check_timeout(&format!("vendors.{}.timeout_ms", vendor), config.timeout_ms)?;
		}

		let store = &self.document_store;
		if store.timeout_ms == 0 {
			return Err(ConfigValidationError::ZeroValue {
				field: "document_store.timeout_ms".to_string(),
			});
		}
		if store.backend == StoreBackend::DataApi {
			if store.endpoint.as_deref().map_or(true, |e| e.trim().is_empty()) {
				return Err(missing_store("endpoint"));
			}
			if store.api_key.is_none() {
				return Err(missing_store("api_key"));
			}
			for (field, value) in [
				("data_source", &store.data_source),
				("database", &store.database),
				("collection", &store.collection),
			] {
				if value.trim().is_empty() {
					return Err(missing_store(field));
				}
			}
		}

		Ok(())
	}
}

fn check_timeout(field: &str, value: u64) -> Result<(), ConfigValidationError> {
	if !(MIN_VENDOR_TIMEOUT_MS..=MAX_VENDOR_TIMEOUT_MS).contains(&value) {
		return Err(ConfigValidationError::TimeoutOutOfRange {
			field: field.to_string(),
			value,
			min: MIN_VENDOR_TIMEOUT_MS,
			max: MAX_VENDOR_TIMEOUT_MS,
		});
	}
	Ok(())
}

fn missing_store(field: &str) -> ConfigValidationError {
	ConfigValidationError::MissingStoreSetting {
		field: field.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_settings_are_valid() {
		let settings = Settings::default();
		assert!(settings.validate().is_ok());
		assert_eq!(settings.bind_address(), "0.0.0.0:3000");
		assert_eq!(settings.enabled_vendors().len(), 2);
		assert_eq!(settings.document_store.backend, StoreBackend::Memory);
	}

	#[test]
	fn test_zero_vendor_timeout_is_rejected() {
		let mut settings = Settings::default();
		settings.timeouts.per_vendor_ms = 0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::TimeoutOutOfRange { .. })
		));
	}

	#[test]
	fn test_enabled_vendor_needs_endpoint() {
		let mut settings = Settings::default();
		settings.vendors.seatgeek.endpoint = " ".to_string();
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::MissingVendorEndpoint {
				vendor: Vendor::SeatGeek
			})
		);

		settings.vendors.seatgeek.enabled = false;
		assert!(settings.validate().is_ok());
		assert_eq!(settings.enabled_vendors().len(), 1);
	}

	#[test]
	fn test_data_api_backend_requirements() {
		let mut settings = Settings::default();
		settings.document_store.backend = StoreBackend::DataApi;
		assert_eq!(settings.validate(), Err(missing_store("endpoint")));

		settings.document_store.endpoint = Some("https://data.example.com/v1".to_string());
		assert_eq!(settings.validate(), Err(missing_store("api_key")));

		settings.document_store.api_key = Some(ConfigurableValue::from_env("ATLAS_API_KEY"));
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_partial_json_uses_defaults() {
		let settings: Settings = serde_json::from_str(
			r#"{
				"server": { "port": 8080 },
				"vendors": {
					"seatgeek": {
						"endpoint": "http://localhost:9000",
						"api_key": { "type": "plain", "value": "sg" }
					}
				},
				"document_store": { "backend": "data_api", "endpoint": "http://localhost:9100" }
			}"#,
		)
		.unwrap();

		assert_eq!(settings.server.port, 8080);
		assert_eq!(settings.server.host, "0.0.0.0");
		assert_eq!(settings.vendors.seatgeek.endpoint, "http://localhost:9000");
		assert!(settings.vendors.seatgeek.enabled);
		assert!(settings.vendors.seatgeek.api_secret.is_none());
		assert_eq!(
			settings.vendors.ticketmaster.endpoint,
			"https://app.ticketmaster.com/discovery/v2"
		);
		assert_eq!(settings.document_store.backend, StoreBackend::DataApi);
		assert_eq!(settings.document_store.collection, "events");
	}
}
