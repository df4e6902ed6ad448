//! Storage trait for pluggable document store implementations

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Document, StorageResult};

/// Insert, query and delete documents in a single collection
///
/// Filters are documents matched by the store; an empty filter matches every
/// document. Each call is one attempt against the backend.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
	/// Insert one document and return the identifier the store assigned
	async fn insert_one(&self, document: Document) -> StorageResult<String>;

	/// Insert several documents, returning identifiers in input order
	async fn insert_many(&self, documents: Vec<Document>) -> StorageResult<Vec<String>>;

	async fn find_one(&self, filter: Document) -> StorageResult<Option<Document>>;

	async fn find(&self, filter: Document) -> StorageResult<Vec<Document>>;

	/// Delete the first matching document; returns 0 or 1
	async fn delete_one(&self, filter: Document) -> StorageResult<u64>;

	async fn delete_many(&self, filter: Document) -> StorageResult<u64>;

	/// Whether the backend is reachable
	async fn health_check(&self) -> StorageResult<bool>;

	/// Short backend name for logs and readiness output
	fn backend_name(&self) -> &'static str;
}
