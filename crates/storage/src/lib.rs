//! Ticket Storage
//!
//! Document store backends for the ticket aggregator: a remote Data API
//! store and an in-memory store.

pub mod data_api_store;
pub mod memory_store;

pub use data_api_store::{DataApiConfig, DataApiStore};
pub use memory_store::MemoryStore;
pub use ticket_types::{Document, DocumentStore, StorageError, StorageResult};
