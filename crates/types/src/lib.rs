//! Ticket Types
//!
//! Shared models and traits for the ticket aggregator: vendor adapters,
//! canonical events, search filters and the document store boundary.

pub mod adapters;
pub mod constants;
pub mod events;
pub mod models;
pub mod storage;
pub mod vendors;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{Adapter, AdapterError, AdapterResult, RawVendorRecord, VendorAdapter};

pub use events::{
	AggregationResult, Event, EventConversionError, EventNormalizer, EventSearchRequest,
	FilterValidationError, FilterValidationResult, NormalizationError, NormalizationWarning,
	PostalCodeInput, SearchFilter, VendorFailure, VendorFailureKind,
};

pub use models::SecretString;

pub use storage::{Document, DocumentStore, StorageError, StorageResult};

pub use vendors::{UnknownVendorError, Vendor};
