//! Global limits and defaults for configuration and runtime

/// Minimum allowed timeout for a vendor search in milliseconds
pub const MIN_VENDOR_TIMEOUT_MS: u64 = 100;

/// Maximum allowed timeout for a vendor search in milliseconds
pub const MAX_VENDOR_TIMEOUT_MS: u64 = 30_000;

/// Default timeout for a vendor search in milliseconds
pub const DEFAULT_VENDOR_TIMEOUT_MS: u64 = 5_000;

/// Default timeout for one document store call in milliseconds
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10_000;

/// Largest page the Ticketmaster Discovery API serves
pub const TICKETMASTER_MAX_PAGE_SIZE: u32 = 200;

/// Largest page the SeatGeek events endpoint serves
pub const SEATGEEK_MAX_PAGE_SIZE: u32 = 5_000;

/// Request body limit for the HTTP surface
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
