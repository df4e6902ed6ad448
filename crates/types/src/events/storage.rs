//! Conversion between `Event` and stored documents

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use super::{Event, EventConversionError};
use crate::storage::Document;
use crate::vendors::Vendor;

/// Field holding the store-assigned identifier
pub const ID_FIELD: &str = "_id";

impl Event {
	/// Document written to the store; `id` is left for the store to assign
	pub fn to_document(&self) -> Document {
		let mut document = Document::new();
		document.insert("name".to_string(), json!(self.name));
		document.insert("venue".to_string(), json!(self.venue));
		document.insert(
			"date".to_string(),
			json!(self.date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
		);
		document.insert("price".to_string(), json!(self.price));
		document.insert("sourceVendor".to_string(), json!(self.source_vendor));
		document.insert("sourceId".to_string(), json!(self.source_id));
		document
	}

	/// Rebuild an event from a stored document
	///
	/// Accepts `_id` either as a plain string or as extended JSON
	/// (`{"$oid": "..."}`), which is what Atlas-style data APIs return.
	pub fn from_document(document: &Document) -> Result<Event, EventConversionError> {
		let id = match document.get(ID_FIELD) {
			None | Some(Value::Null) => None,
			Some(Value::String(s)) => Some(s.clone()),
			Some(Value::Object(oid)) => match oid.get("$oid") {
				Some(Value::String(s)) => Some(s.clone()),
				_ => return Err(invalid(ID_FIELD, "expected a string or {\"$oid\": string}")),
			},
			Some(other) => Some(other.to_string()),
		};

		let source_vendor: Vendor = document
			.get("sourceVendor")
			.ok_or_else(|| missing("sourceVendor"))
			.and_then(|v| {
				serde_json::from_value(v.clone()).map_err(|e| invalid("sourceVendor", &e.to_string()))
			})?;

		let source_id = match document.get("sourceId") {
			Some(Value::String(s)) if !s.is_empty() => s.clone(),
			Some(Value::Number(n)) => n.to_string(),
			Some(_) => return Err(invalid("sourceId", "expected a non-empty string")),
			None => return Err(missing("sourceId")),
		};

		let date = match document.get("date") {
			Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
				.map(|dt| dt.with_timezone(&Utc))
				.map_err(|e| invalid("date", &e.to_string()))?,
			Some(_) => return Err(invalid("date", "expected an RFC 3339 string")),
			None => return Err(missing("date")),
		};

		let price = match document.get("price") {
			None | Some(Value::Null) => 0.0,
			Some(v) => v
				.as_f64()
				.ok_or_else(|| invalid("price", "expected a number"))?,
		};

		Ok(Event {
			id,
			name: string_field(document, "name"),
			venue: string_field(document, "venue"),
			date,
			price,
			source_vendor,
			source_id,
		})
	}
}

fn string_field(document: &Document, field: &str) -> String {
	document
		.get(field)
		.and_then(Value::as_str)
		.unwrap_or_default()
		.to_string()
}

fn missing(field: &str) -> EventConversionError {
	EventConversionError::MissingField {
		field: field.to_string(),
	}
}

fn invalid(field: &str, reason: &str) -> EventConversionError {
	EventConversionError::InvalidField {
		field: field.to_string(),
		reason: reason.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn event() -> Event {
		Event {
			id: None,
			name: "Hamilton".to_string(),
			venue: "Richard Rodgers Theatre".to_string(),
			date: Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap(),
			price: 199.5,
			source_vendor: Vendor::SeatGeek,
			source_id: "6123456".to_string(),
		}
	}

	#[test]
	fn test_document_round_trip_preserves_fields() {
		let original = event();
		let mut document = original.to_document();
		assert!(!document.contains_key(ID_FIELD));

		document.insert(ID_FIELD.to_string(), json!("65a1f0c2e4b0a1b2c3d4e5f6"));
		let restored = Event::from_document(&document).unwrap();

		assert_eq!(restored.id.as_deref(), Some("65a1f0c2e4b0a1b2c3d4e5f6"));
		assert_eq!(Event { id: None, ..restored }, original);
	}

	#[test]
	fn test_extended_json_object_id() {
		let mut document = event().to_document();
		document.insert(ID_FIELD.to_string(), json!({ "$oid": "abc123" }));
		let restored = Event::from_document(&document).unwrap();
		assert_eq!(restored.id.as_deref(), Some("abc123"));
	}

	#[test]
	fn test_missing_provenance_is_rejected() {
		let mut document = event().to_document();
		document.remove("sourceId");
		assert_eq!(
			Event::from_document(&document).unwrap_err(),
			EventConversionError::MissingField {
				field: "sourceId".to_string()
			}
		);

		let mut document = event().to_document();
		document.insert("sourceVendor".to_string(), json!("stubhub"));
		assert!(matches!(
			Event::from_document(&document),
			Err(EventConversionError::InvalidField { .. })
		));
	}

	#[test]
	fn test_documents_from_other_writers_are_tolerated() {
		let document: Document = serde_json::from_value(json!({
			"_id": "1",
			"sourceVendor": "ticketmaster",
			"sourceId": "G5v",
			"date": "2025-01-01T00:00:00Z"
		}))
		.unwrap();
		let event = Event::from_document(&document).unwrap();
		assert_eq!(event.name, "");
		assert_eq!(event.price, 0.0);
	}
}
