//! Adapter-facing models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive information about an adapter implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,

	/// Human-readable name
	pub name: String,

	/// Optional description
	pub description: Option<String>,

	/// Adapter version
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: String, name: String, description: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: Some(description),
			version,
		}
	}
}

/// One vendor event object exactly as the vendor returned it
///
/// Only lives between an adapter's `search` and the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawVendorRecord(pub Value);

impl RawVendorRecord {
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Non-empty string at the JSON Pointer `path`, e.g. `/_embedded/venues/0/name`
	pub fn str_at(&self, path: &str) -> Option<&str> {
		self.0
			.pointer(path)
			.and_then(Value::as_str)
			.filter(|s| !s.trim().is_empty())
	}

	/// Number at `path`; numeric strings are accepted
	pub fn f64_at(&self, path: &str) -> Option<f64> {
		let number = match self.0.pointer(path)? {
			Value::Number(n) => n.as_f64(),
			Value::String(s) => s.trim().parse::<f64>().ok(),
			_ => None,
		};
		number.filter(|n| n.is_finite())
	}
}

impl From<Value> for RawVendorRecord {
	fn from(value: Value) -> Self {
		Self(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_str_at_follows_json_pointers() {
		let record = RawVendorRecord::new(json!({
			"_embedded": { "venues": [ { "name": "Madison Square Garden" } ] },
			"dates": { "start": { "dateTime": "2025-06-01T00:00:00Z" } }
		}));

		assert_eq!(
			record.str_at("/_embedded/venues/0/name"),
			Some("Madison Square Garden")
		);
		assert_eq!(
			record.str_at("/dates/start/dateTime"),
			Some("2025-06-01T00:00:00Z")
		);
		assert_eq!(record.str_at("/_embedded/venues/1/name"), None);
		assert_eq!(record.str_at("/dates/start/dateTime/nested"), None);
		assert_eq!(record.str_at("dates.start.dateTime"), None);
	}

	#[test]
	fn test_f64_at_accepts_numeric_strings() {
		let record = RawVendorRecord::new(json!({ "a": 12.5, "b": "7", "c": "n/a", "d": null }));
		assert_eq!(record.f64_at("/a"), Some(12.5));
		assert_eq!(record.f64_at("/b"), Some(7.0));
		assert_eq!(record.f64_at("/c"), None);
		assert_eq!(record.f64_at("/d"), None);
	}

	#[test]
	fn test_str_at_ignores_blank_strings() {
		let record = RawVendorRecord::new(json!({ "name": "   " }));
		assert_eq!(record.str_at("/name"), None);
	}
}
