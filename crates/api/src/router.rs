use axum::{
	routing::{get, post},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use ticket_types::constants::MAX_REQUEST_BODY_BYTES;
use tracing::Level;

use crate::handlers::{
	clear_documents, delete_documents, health, post_documents, post_events, post_seatgeek_events,
	post_stored_events, post_sync_events, post_ticketmaster_events, query_documents, ready,
};
use crate::security::add_security_headers;
use crate::state::AppState;
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/health/", get(health))
		.route("/ready", get(ready))
		.route("/ready/", get(ready))
		.route("/events", post(post_events))
		.route("/events/", post(post_events))
		.route("/events/vendorA", post(post_ticketmaster_events))
		.route("/events/ticketmaster", post(post_ticketmaster_events))
		.route("/events/vendorB", post(post_seatgeek_events))
		.route("/events/seatgeek", post(post_seatgeek_events))
		.route("/events/sync", post(post_sync_events))
		.route("/events/stored", post(post_stored_events))
		.route("/documents", post(post_documents).delete(delete_documents))
		.route("/documents/", post(post_documents).delete(delete_documents))
		.route("/documents/query", post(query_documents))
		.route("/documents/clear", post(clear_documents));

	#[cfg(feature = "openapi")]
	let router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}
