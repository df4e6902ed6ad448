//! Request bodies and vendor payloads

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn search_body() -> Value {
	json!({
		"postalCode": "10001",
		"maxPrice": 500,
		"startDate": "2025-06-01T00:00:00Z",
		"endDate": "2025-06-30T23:59:59Z",
		"size": 10
	})
}

/// A Ticketmaster discovery page holding `records`
pub fn ticketmaster_page(records: Vec<Value>) -> Value {
	let total = records.len();
	json!({
		"_embedded": { "events": records },
		"page": { "size": 10, "totalElements": total, "totalPages": 1, "number": 0 }
	})
}

/// A SeatGeek events page holding `records`
pub fn seatgeek_page(records: Vec<Value>) -> Value {
	let total = records.len();
	json!({
		"events": records,
		"meta": { "total": total, "per_page": 10, "page": 1 }
	})
}
