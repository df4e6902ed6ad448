//! Document service
//!
//! Thin layer over a `DocumentStore` that speaks in events as well as raw
//! documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use ticket_types::{
	AggregationResult, Document, DocumentStore, Event, StorageError, Vendor,
};
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum DocumentServiceError {
	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// What happened to one vendor's events during a sync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSyncOutcome {
	pub inserted_ids: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DocumentService {
	store: Arc<dyn DocumentStore>,
}

impl DocumentService {
	pub fn new(store: Arc<dyn DocumentStore>) -> Self {
		Self { store }
	}

	pub fn store(&self) -> &Arc<dyn DocumentStore> {
		&self.store
	}

	/// Persist events; returned ids follow the input order
	pub async fn insert_events(&self, events: &[Event]) -> Result<Vec<String>, DocumentServiceError> {
		let documents = events.iter().map(Event::to_document).collect();
		let ids = self.store.insert_many(documents).await?;
		debug!("Stored {} events", ids.len());
		Ok(ids)
	}

	pub async fn insert_document(&self, document: Document) -> Result<String, DocumentServiceError> {
		Ok(self.store.insert_one(document).await?)
	}

	pub async fn insert_documents(
		&self,
		documents: Vec<Document>,
	) -> Result<Vec<String>, DocumentServiceError> {
		Ok(self.store.insert_many(documents).await?)
	}

	pub async fn find_documents(&self, filter: Document) -> Result<Vec<Document>, DocumentServiceError> {
		Ok(self.store.find(filter).await?)
	}

	pub async fn find_one_document(
		&self,
		filter: Document,
	) -> Result<Option<Document>, DocumentServiceError> {
		Ok(self.store.find_one(filter).await?)
	}

	/// Stored documents converted back to events
	///
	/// Documents that do not describe an event are skipped.
	pub async fn find_events(&self, filter: Document) -> Result<Vec<Event>, DocumentServiceError> {
		let documents = self.store.find(filter).await?;
		let total = documents.len();
		let events: Vec<Event> = documents
			.iter()
			.filter_map(|document| match Event::from_document(document) {
				Ok(event) => Some(event),
				Err(e) => {
					warn!("Skipping stored document that is not an event: {}", e);
					None
				},
			})
			.collect();
		debug!("Converted {} of {} stored documents", events.len(), total);
		Ok(events)
	}

	pub async fn delete_documents(&self, filter: Document) -> Result<u64, DocumentServiceError> {
		Ok(self.store.delete_many(filter).await?)
	}

	pub async fn delete_one_document(&self, filter: Document) -> Result<u64, DocumentServiceError> {
		Ok(self.store.delete_one(filter).await?)
	}

	/// Remove every document in the collection
	pub async fn clear(&self) -> Result<u64, DocumentServiceError> {
		let deleted = self.store.delete_many(Document::new()).await?;
		info!("Cleared {} documents from {} store", deleted, self.store.backend_name());
		Ok(deleted)
	}

	/// Store each vendor's events with its own insert
	///
	/// A vendor whose search failed reports that failure in its outcome. The
	/// first store error aborts the sync and is returned to the caller.
	pub async fn sync_aggregation(
		&self,
		result: &AggregationResult,
	) -> Result<BTreeMap<Vendor, VendorSyncOutcome>, DocumentServiceError> {
		let mut outcomes = BTreeMap::new();
		for (vendor, events) in &result.events_by_vendor {
			let outcome = match result.errors.get(vendor) {
				Some(failure) => VendorSyncOutcome {
					inserted_ids: Vec::new(),
					error: Some(failure.message.clone()),
				},
				None => {
					let inserted_ids = self.insert_events(events).await.map_err(|e| {
						warn!("Failed to store {} events: {}", vendor, e);
						e
					})?;
					VendorSyncOutcome {
						inserted_ids,
						error: None,
					}
				},
			};
			outcomes.insert(*vendor, outcome);
		}
		Ok(outcomes)
	}

	pub async fn health_check(&self) -> bool {
		match self.store.health_check().await {
			Ok(healthy) => healthy,
			Err(e) => {
				warn!("Document store health check errored: {}", e);
				false
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use chrono::{TimeZone, Utc};
	use serde_json::json;
	use ticket_storage::MemoryStore;
	use ticket_types::{StorageResult, VendorFailure};

	fn event(vendor: Vendor, source_id: &str) -> Event {
		Event {
			id: None,
			name: format!("Event {}", source_id),
			venue: "Venue".to_string(),
			date: Utc.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap(),
			price: 42.0,
			source_vendor: vendor,
			source_id: source_id.to_string(),
		}
	}

	fn service() -> DocumentService {
		DocumentService::new(Arc::new(MemoryStore::new()))
	}

	#[derive(Debug)]
	struct DownStore;

	#[async_trait]
	impl DocumentStore for DownStore {
		async fn insert_one(&self, _: Document) -> StorageResult<String> {
			Err(unavailable())
		}
		async fn insert_many(&self, _: Vec<Document>) -> StorageResult<Vec<String>> {
			Err(unavailable())
		}
		async fn find_one(&self, _: Document) -> StorageResult<Option<Document>> {
			Err(unavailable())
		}
		async fn find(&self, _: Document) -> StorageResult<Vec<Document>> {
			Err(unavailable())
		}
		async fn delete_one(&self, _: Document) -> StorageResult<u64> {
			Err(unavailable())
		}
		async fn delete_many(&self, _: Document) -> StorageResult<u64> {
			Err(unavailable())
		}
		async fn health_check(&self) -> StorageResult<bool> {
			Err(unavailable())
		}
		fn backend_name(&self) -> &'static str {
			"down"
		}
	}

	fn unavailable() -> StorageError {
		StorageError::Unavailable {
			message: "connection refused".to_string(),
		}
	}

	#[tokio::test]
	async fn test_events_round_trip_through_store() {
		let service = service();
		let original = event(Vendor::Ticketmaster, "G5vYZ9");
		let ids = service
			.insert_events(std::slice::from_ref(&original))
			.await
			.unwrap();
		assert_eq!(ids.len(), 1);

		let stored = service.find_events(Document::new()).await.unwrap();
		assert_eq!(stored.len(), 1);
		assert_eq!(stored[0].id.as_deref(), Some(ids[0].as_str()));
		assert_eq!(Event { id: None, ..stored[0].clone() }, original);
	}

	#[tokio::test]
	async fn test_find_events_skips_foreign_documents() {
		let service = service();
		service
			.insert_document(serde_json::from_value(json!({ "note": "not an event" })).unwrap())
			.await
			.unwrap();
		service
			.insert_events(&[event(Vendor::SeatGeek, "1")])
			.await
			.unwrap();

		assert_eq!(service.find_documents(Document::new()).await.unwrap().len(), 2);
		assert_eq!(service.find_events(Document::new()).await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_clear_empties_store() {
		let service = service();
		assert_eq!(service.clear().await.unwrap(), 0);
		service
			.insert_events(&[event(Vendor::SeatGeek, "1"), event(Vendor::SeatGeek, "2")])
			.await
			.unwrap();
		assert_eq!(service.clear().await.unwrap(), 2);
		assert!(service.find_documents(Document::new()).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_sync_reports_each_vendor() {
		let service = service();
		let mut result = AggregationResult::default();
		result.events_by_vendor.insert(
			Vendor::Ticketmaster,
			vec![event(Vendor::Ticketmaster, "a"), event(Vendor::Ticketmaster, "b")],
		);
		result.events_by_vendor.insert(Vendor::SeatGeek, Vec::new());
		result
			.errors
			.insert(Vendor::SeatGeek, VendorFailure::internal("vendor down"));

		let outcomes = service.sync_aggregation(&result).await.unwrap();
		assert_eq!(outcomes[&Vendor::Ticketmaster].inserted_ids.len(), 2);
		assert!(outcomes[&Vendor::Ticketmaster].error.is_none());
		assert!(outcomes[&Vendor::SeatGeek].inserted_ids.is_empty());
		assert_eq!(outcomes[&Vendor::SeatGeek].error.as_deref(), Some("vendor down"));
	}

	#[tokio::test]
	async fn test_sync_fails_when_store_is_down() {
		let service = DocumentService::new(Arc::new(DownStore));
		let mut result = AggregationResult::default();
		result
			.events_by_vendor
			.insert(Vendor::Ticketmaster, vec![event(Vendor::Ticketmaster, "a")]);

		let err = service.sync_aggregation(&result).await.unwrap_err();
		assert_eq!(err, DocumentServiceError::Storage(unavailable()));
	}

	#[tokio::test]
	async fn test_storage_errors_propagate() {
		let service = DocumentService::new(Arc::new(DownStore));
		let err = service.find_documents(Document::new()).await.unwrap_err();
		assert_eq!(err, DocumentServiceError::Storage(unavailable()));
		assert!(!service.health_check().await);
	}
}
