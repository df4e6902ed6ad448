//! Ticket vendor identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// External ticket-search API an event was sourced from
///
/// Ordering is declaration order, so maps keyed by vendor always list
/// Ticketmaster before SeatGeek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
	/// Ticketmaster Discovery API (vendor A)
	#[serde(alias = "vendorA")]
	Ticketmaster,
	/// SeatGeek Platform API (vendor B)
	#[serde(alias = "vendorB")]
	SeatGeek,
}

impl Vendor {
	/// Every vendor the aggregator knows how to talk to
	pub const ALL: [Vendor; 2] = [Vendor::Ticketmaster, Vendor::SeatGeek];

	/// Stable identifier used in config keys, logs and stored documents
	pub fn as_str(&self) -> &'static str {
		match self {
			Vendor::Ticketmaster => "ticketmaster",
			Vendor::SeatGeek => "seatgeek",
		}
	}
}

impl fmt::Display for Vendor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown vendor: {0}")]
pub struct UnknownVendorError(pub String);

impl FromStr for Vendor {
	type Err = UnknownVendorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"ticketmaster" | "vendora" | "tm" => Ok(Vendor::Ticketmaster),
			"seatgeek" | "vendorb" | "sg" => Ok(Vendor::SeatGeek),
			_ => Err(UnknownVendorError(s.to_string())),
		}
	}
}
