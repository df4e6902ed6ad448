use std::sync::Arc;

use ticket_service::{AggregatorService, DocumentService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<AggregatorService>,
	pub document_service: Arc<DocumentService>,
}
