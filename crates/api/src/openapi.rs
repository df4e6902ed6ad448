use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::documents::{
	DeleteDocumentsResponse, DocumentFilterRequest, InsertDocumentsRequest,
	InsertDocumentsResponse, QueryDocumentsResponse,
};
use crate::handlers::events::{EventsResponse, StoredEventsRequest, StoredEventsResponse};
use crate::handlers::health::{HealthResponse, ReadinessResponse};
use crate::handlers::{documents, events, health};

use ticket_types::{
	Event, EventSearchRequest, NormalizationWarning, PostalCodeInput, Vendor, VendorFailure,
	VendorFailureKind,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::ready,
        events::post_events,
        events::post_ticketmaster_events,
        events::post_seatgeek_events,
        events::post_sync_events,
        events::post_stored_events,
        documents::post_documents,
        documents::query_documents,
        documents::delete_documents,
        documents::clear_documents,
    ),
    components(schemas(
        HealthResponse, ReadinessResponse, ErrorResponse,
        EventSearchRequest, PostalCodeInput, Event, Vendor,
        EventsResponse, VendorFailure, VendorFailureKind, NormalizationWarning,
        StoredEventsRequest, StoredEventsResponse,
        InsertDocumentsRequest, InsertDocumentsResponse, DocumentFilterRequest,
        QueryDocumentsResponse, DeleteDocumentsResponse
    )),
    tags(
        (name = "events", description = "Vendor search and sync endpoints"),
        (name = "documents", description = "Document store endpoints"),
        (name = "health", description = "Health and readiness endpoints")
    )
)]
pub struct ApiDoc;
