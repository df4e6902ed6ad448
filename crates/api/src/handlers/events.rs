//! Event search, sync and stored-event handlers

use axum::{
	extract::{rejection::JsonRejection, State},
	response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use ticket_service::VendorSyncOutcome;
use ticket_types::{
	AggregationResult, Document, Event, EventSearchRequest, NormalizationWarning, SearchFilter,
	Vendor, VendorFailure,
};
use tracing::info;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{
	aggregator_error, body_rejection, document_error, filter_error, filter_rejection, ApiError,
};
use crate::state::AppState;

/// Events found across the queried vendors
///
/// `events` lists Ticketmaster results before SeatGeek results, each in the
/// vendor's own order.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventsResponse {
	pub events: Vec<Event>,
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub errors: BTreeMap<Vendor, VendorFailure>,
	pub warnings: Vec<NormalizationWarning>,
}

impl From<AggregationResult> for EventsResponse {
	fn from(result: AggregationResult) -> Self {
		let errors = result.errors.clone();
		let warnings = result.warnings.clone();
		Self {
			events: result.into_events(),
			errors,
			warnings,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StoredEventsRequest {
	#[serde(default)]
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub filter: Document,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StoredEventsResponse {
	pub events: Vec<Event>,
}

fn parse_filter(
	request: Result<Json<EventSearchRequest>, JsonRejection>,
) -> Result<SearchFilter, ApiError> {
	let Json(request) = request.map_err(filter_rejection)?;
	SearchFilter::try_from(request).map_err(filter_error)
}

async fn search(
	state: &AppState,
	request: Result<Json<EventSearchRequest>, JsonRejection>,
	vendors: Option<BTreeSet<Vendor>>,
) -> Result<AggregationResult, ApiError> {
	let filter = parse_filter(request)?;
	let vendors = vendors.unwrap_or_else(|| state.aggregator_service.vendors());
	state
		.aggregator_service
		.aggregate(&filter, &vendors)
		.await
		.map_err(aggregator_error)
}

/// Search every configured vendor
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events",
    request_body = EventSearchRequest,
    responses(
        (status = 200, description = "Events aggregated; vendor failures are listed under errors", body = EventsResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    tag = "events"
))]
pub async fn post_events(
	State(state): State<AppState>,
	request: Result<Json<EventSearchRequest>, JsonRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
	let result = search(&state, request, None).await?;
	info!("Returning {} events from all vendors", result.total_events());
	Ok(Json(result.into()))
}

/// Search Ticketmaster only (vendor A)
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events/vendorA",
    request_body = EventSearchRequest,
    responses(
        (status = 200, description = "Ticketmaster events", body = EventsResponse),
        (status = 400, description = "Invalid filter or vendor disabled", body = ErrorResponse)
    ),
    tag = "events"
))]
pub async fn post_ticketmaster_events(
	State(state): State<AppState>,
	request: Result<Json<EventSearchRequest>, JsonRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
	let result = search(&state, request, Some(BTreeSet::from([Vendor::Ticketmaster]))).await?;
	Ok(Json(result.into()))
}

/// Search SeatGeek only (vendor B)
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events/vendorB",
    request_body = EventSearchRequest,
    responses(
        (status = 200, description = "SeatGeek events", body = EventsResponse),
        (status = 400, description = "Invalid filter or vendor disabled", body = ErrorResponse)
    ),
    tag = "events"
))]
pub async fn post_seatgeek_events(
	State(state): State<AppState>,
	request: Result<Json<EventSearchRequest>, JsonRejection>,
) -> Result<Json<EventsResponse>, ApiError> {
	let result = search(&state, request, Some(BTreeSet::from([Vendor::SeatGeek]))).await?;
	Ok(Json(result.into()))
}

/// Search every vendor and store each vendor's events
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events/sync",
    request_body = EventSearchRequest,
    responses(
        (status = 200, description = "Inserted ids and vendor search errors keyed by vendor"),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 502, description = "Document store rejected the insert", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "events"
))]
pub async fn post_sync_events(
	State(state): State<AppState>,
	request: Result<Json<EventSearchRequest>, JsonRejection>,
) -> Result<Json<BTreeMap<Vendor, VendorSyncOutcome>>, ApiError> {
	let result = search(&state, request, None).await?;
	let outcomes = state
		.document_service
		.sync_aggregation(&result)
		.await
		.map_err(document_error)?;
	info!(
		"Synced {} events into the document store",
		outcomes.values().map(|o| o.inserted_ids.len()).sum::<usize>()
	);
	Ok(Json(outcomes))
}

/// Stored documents that describe events
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events/stored",
    request_body = StoredEventsRequest,
    responses(
        (status = 200, description = "Stored events", body = StoredEventsResponse),
        (status = 502, description = "Document store rejected the request", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "events"
))]
pub async fn post_stored_events(
	State(state): State<AppState>,
	request: Result<Json<StoredEventsRequest>, JsonRejection>,
) -> Result<Json<StoredEventsResponse>, ApiError> {
	let Json(request) = request.map_err(body_rejection)?;
	let events = state
		.document_service
		.find_events(request.filter)
		.await
		.map_err(document_error)?;
	Ok(Json(StoredEventsResponse { events }))
}
