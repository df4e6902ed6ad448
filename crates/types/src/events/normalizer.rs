//! Vendor record → `Event` mapping
//!
//! Vendors routinely omit fields, so anything other than the vendor's own
//! identifier falls back to a default:
//!
//! | field | default |
//! |-------|---------|
//! | name  | `""` |
//! | venue | `""` |
//! | price | `0.0` |
//! | date  | Unix epoch |

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::{Event, NormalizationError};
use crate::adapters::RawVendorRecord;
use crate::vendors::Vendor;

/// Stateless mapper from raw vendor records to canonical events
#[derive(Debug, Clone, Copy, Default)]
pub struct EventNormalizer;

impl EventNormalizer {
	/// Map one raw record into an `Event`
	///
	/// Deterministic: the same record and vendor always produce an equal event.
	pub fn normalize(record: &RawVendorRecord, vendor: Vendor) -> Result<Event, NormalizationError> {
		if !record.as_value().is_object() {
			return Err(NormalizationError::UnrecognizedShape {
				vendor,
				reason: format!("expected a JSON object, got {}", type_name(record.as_value())),
			});
		}

		match vendor {
			Vendor::Ticketmaster => Ok(Event {
				id: None,
				source_id: Self::source_id(record, vendor)?,
				name: record.str_at("/name").unwrap_or_default().to_string(),
				venue: record
					.str_at("/_embedded/venues/0/name")
					.unwrap_or_default()
					.to_string(),
				date: ticketmaster_date(record).unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
				price: Self::price(record, vendor).unwrap_or(0.0),
				source_vendor: vendor,
			}),
			Vendor::SeatGeek => Ok(Event {
				id: None,
				source_id: Self::source_id(record, vendor)?,
				name: record
					.str_at("/title")
					.or_else(|| record.str_at("/short_title"))
					.unwrap_or_default()
					.to_string(),
				venue: record.str_at("/venue/name").unwrap_or_default().to_string(),
				date: record
					.str_at("/datetime_utc")
					.and_then(parse_vendor_datetime)
					.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
				price: Self::price(record, vendor).unwrap_or(0.0),
				source_vendor: vendor,
			}),
		}
	}

	/// Lowest advertised price, if the vendor published one
	pub fn price(record: &RawVendorRecord, vendor: Vendor) -> Option<f64> {
		match vendor {
			Vendor::Ticketmaster => record
				.as_value()
				.pointer("/priceRanges")
				.and_then(Value::as_array)?
				.iter()
				.filter_map(|range| RawVendorRecord::new(range.clone()).f64_at("/min"))
				.reduce(f64::min),
			Vendor::SeatGeek => record.f64_at("/stats/lowest_price"),
		}
	}

	fn source_id(record: &RawVendorRecord, vendor: Vendor) -> Result<String, NormalizationError> {
		let id = match record.as_value().pointer("/id") {
			Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
			Some(Value::Number(n)) => Some(n.to_string()),
			_ => None,
		};
		id.ok_or(NormalizationError::MissingIdentifier { vendor, field: "id" })
	}
}

fn ticketmaster_date(record: &RawVendorRecord) -> Option<DateTime<Utc>> {
	record
		.str_at("/dates/start/dateTime")
		.and_then(parse_vendor_datetime)
		.or_else(|| {
			record
				.str_at("/dates/start/localDate")
				.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
				.and_then(|d| d.and_hms_opt(0, 0, 0))
				.map(|naive| naive.and_utc())
		})
}

/// RFC 3339, or SeatGeek's offset-less `datetime_utc`
fn parse_vendor_datetime(raw: &str) -> Option<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(raw)
		.map(|dt| dt.with_timezone(&Utc))
		.ok()
		.or_else(|| {
			NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
				.ok()
				.map(|naive| naive.and_utc())
		})
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
