//! Vendor adapter contract

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::AdapterError;
pub use models::{Adapter, RawVendorRecord};
pub use traits::VendorAdapter;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
