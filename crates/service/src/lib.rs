//! Ticket Service
//!
//! Vendor fan-out aggregation and document store access.

pub mod aggregator;
pub mod documents;

pub use aggregator::{AggregatorService, AggregatorServiceError};
pub use documents::{DocumentService, DocumentServiceError, VendorSyncOutcome};
