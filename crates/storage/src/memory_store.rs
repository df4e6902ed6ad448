//! In-process document store backed by DashMap

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use ticket_types::events::storage::ID_FIELD;
use ticket_types::{Document, DocumentStore, StorageError, StorageResult};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredDocument {
	sequence: u64,
	document: Document,
}

/// Document store kept in memory for tests and local runs
///
/// Ids are UUID v4 strings unless the inserted document already carries an
/// `_id`. Inserting an `_id` that is already stored fails with a 409
/// duplicate key error and leaves the stored document untouched. Filters match on top-level field equality; queries return
/// documents in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	documents: Arc<DashMap<String, StoredDocument>>,
	sequence: Arc<AtomicU64>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	fn insert(&self, mut document: Document) -> StorageResult<String> {
		let id = match document.get(ID_FIELD) {
			Some(Value::String(id)) => id.clone(),
			Some(other) if !other.is_null() => other.to_string(),
			_ => Uuid::new_v4().to_string(),
		};
		document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

		match self.documents.entry(id.clone()) {
			Entry::Occupied(_) => Err(StorageError::Request {
				status_code: 409,
				message: format!("Duplicate key: {} '{}' already exists", ID_FIELD, id),
			}),
			Entry::Vacant(slot) => {
				let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
				slot.insert(StoredDocument { sequence, document });
				Ok(id)
			},
		}
	}

	/// Matching `(id, document)` pairs in insertion order
	fn matching(&self, filter: &Document) -> Vec<(String, Document)> {
		let mut found: Vec<_> = self
			.documents
			.iter()
			.filter(|entry| matches_filter(&entry.value().document, filter))
			.map(|entry| {
				(
					entry.value().sequence,
					entry.key().clone(),
					entry.value().document.clone(),
				)
			})
			.collect();
		found.sort_by_key(|(sequence, _, _)| *sequence);
		found
			.into_iter()
			.map(|(_, id, document)| (id, document))
			.collect()
	}
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
	filter
		.iter()
		.all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
	async fn insert_one(&self, document: Document) -> StorageResult<String> {
		self.insert(document)
	}

	async fn insert_many(&self, documents: Vec<Document>) -> StorageResult<Vec<String>> {
		let ids = documents
			.into_iter()
			.map(|d| self.insert(d))
			.collect::<StorageResult<Vec<_>>>()?;
		debug!("Inserted {} documents into memory store", ids.len());
		Ok(ids)
	}

	async fn find_one(&self, filter: Document) -> StorageResult<Option<Document>> {
		Ok(self
			.matching(&filter)
			.into_iter()
			.next()
			.map(|(_, document)| document))
	}

	async fn find(&self, filter: Document) -> StorageResult<Vec<Document>> {
		Ok(self
			.matching(&filter)
			.into_iter()
			.map(|(_, document)| document)
			.collect())
	}

	async fn delete_one(&self, filter: Document) -> StorageResult<u64> {
		let removed = self
			.matching(&filter)
			.into_iter()
			.next()
			.and_then(|(id, _)| self.documents.remove(&id));
		Ok(removed.map_or(0, |_| 1))
	}

	async fn delete_many(&self, filter: Document) -> StorageResult<u64> {
		let deleted = self
			.matching(&filter)
			.into_iter()
			.filter_map(|(id, _)| self.documents.remove(&id))
			.count();
		debug!("Deleted {} documents from memory store", deleted);
		Ok(deleted as u64)
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}

	fn backend_name(&self) -> &'static str {
		"memory"
	}
}
