//! Search request body and the validated search filter

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
#[allow(unused_imports)]
use serde_json::json;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::{FilterValidationError, FilterValidationResult};

/// Postal codes arrive either as JSON strings or bare numbers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(untagged)]
pub enum PostalCodeInput {
	Text(String),
	Number(u64),
}

impl PostalCodeInput {
	fn into_string(self) -> String {
		match self {
			PostalCodeInput::Text(s) => s.trim().to_string(),
			PostalCodeInput::Number(n) => n.to_string(),
		}
	}
}

/// API request body for the event search endpoints
///
/// Every field is optional on the wire so that missing keys are reported by
/// `SearchFilter::try_from` with the offending field name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "postalCode": "10001",
    "maxPrice": 100,
    "startDate": "2025-06-01T00:00:00Z",
    "endDate": "2025-06-30T23:59:59Z",
    "size": 5
})))]
#[serde(rename_all = "camelCase")]
pub struct EventSearchRequest {
	pub postal_code: Option<PostalCodeInput>,
	pub max_price: Option<f64>,
	/// RFC 3339, or a local `YYYY-MM-DDTHH:MM[:SS]` / `YYYY-MM-DD` taken as UTC
	pub start_date: Option<String>,
	pub end_date: Option<String>,
	pub size: Option<i64>,
}

/// Validated search filter shared by every vendor query of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
	postal_code: String,
	max_price: f64,
	start_date: DateTime<Utc>,
	end_date: DateTime<Utc>,
	size: u32,
}

impl SearchFilter {
	/// Build a filter, enforcing every invariant
	pub fn new(
		postal_code: impl Into<String>,
		max_price: f64,
		start_date: DateTime<Utc>,
		end_date: DateTime<Utc>,
		size: u32,
	) -> FilterValidationResult<Self> {
		let postal_code = postal_code.into().trim().to_string();
		if postal_code.is_empty() {
			return Err(FilterValidationError::InvalidField {
				field: "postalCode".to_string(),
				reason: "must not be empty".to_string(),
			});
		}
		if !max_price.is_finite() || max_price < 0.0 {
			return Err(FilterValidationError::InvalidField {
				field: "maxPrice".to_string(),
				reason: format!("must be a non-negative number, got {}", max_price),
			});
		}
		if size == 0 {
			return Err(FilterValidationError::InvalidField {
				field: "size".to_string(),
				reason: "must be greater than zero".to_string(),
			});
		}
		if start_date > end_date {
			return Err(FilterValidationError::InvertedDateRange {
				start: start_date.to_rfc3339(),
				end: end_date.to_rfc3339(),
			});
		}

		Ok(Self {
			postal_code,
			max_price,
			start_date,
			end_date,
			size,
		})
	}

	pub fn postal_code(&self) -> &str {
		&self.postal_code
	}

	pub fn max_price(&self) -> f64 {
		self.max_price
	}

	pub fn start_date(&self) -> DateTime<Utc> {
		self.start_date
	}

	pub fn end_date(&self) -> DateTime<Utc> {
		self.end_date
	}

	pub fn size(&self) -> u32 {
		self.size
	}
}

impl TryFrom<EventSearchRequest> for SearchFilter {
	type Error = FilterValidationError;

	fn try_from(request: EventSearchRequest) -> Result<Self, Self::Error> {
		let postal_code = request
			.postal_code
			.ok_or_else(|| missing("postalCode"))?
			.into_string();
		let max_price = request.max_price.ok_or_else(|| missing("maxPrice"))?;
		let start_date = parse_date(
			"startDate",
			&request.start_date.ok_or_else(|| missing("startDate"))?,
		)?;
		let end_date = parse_date(
			"endDate",
			&request.end_date.ok_or_else(|| missing("endDate"))?,
		)?;
		let size = request.size.ok_or_else(|| missing("size"))?;
		let size = u32::try_from(size).map_err(|_| FilterValidationError::InvalidField {
			field: "size".to_string(),
			reason: format!("must be between 1 and {}, got {}", u32::MAX, size),
		})?;

		SearchFilter::new(postal_code, max_price, start_date, end_date, size)
	}
}

fn missing(field: &str) -> FilterValidationError {
	FilterValidationError::MissingField {
		field: field.to_string(),
	}
}

/// Parse a request date
///
/// HTML `datetime-local` inputs carry no offset, so offset-less values are
/// interpreted as UTC.
pub fn parse_date(field: &str, raw: &str) -> FilterValidationResult<DateTime<Utc>> {
	let raw = raw.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Ok(dt.with_timezone(&Utc));
	}
	for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
		if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
			return Ok(naive.and_utc());
		}
	}
	if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.and_then(|d| d.and_hms_opt(0, 0, 0))
	{
		return Ok(naive.and_utc());
	}

	Err(FilterValidationError::InvalidField {
		field: field.to_string(),
		reason: format!("'{}' is not a recognised date", raw),
	})
}
