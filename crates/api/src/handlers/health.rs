use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
use ticket_types::Vendor;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct HealthResponse {
	pub status: String,
	pub message: String,
}

/// Liveness check
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service healthy", body = HealthResponse)),
    tag = "health"
))]
pub async fn health() -> Json<HealthResponse> {
	Json(HealthResponse {
		status: "healthy".to_string(),
		message: "hello world".to_string(),
	})
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReadinessResponse {
	pub status: String,
	pub store_healthy: bool,
	pub vendors: Vec<Vendor>,
}

/// GET /ready - readiness check; 503 when the document store is unreachable
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Ready", body = ReadinessResponse),
        (status = 503, description = "Document store unhealthy", body = ReadinessResponse)
    ),
    tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let store_healthy = state.document_service.health_check().await;
	let vendors = state.aggregator_service.vendors().into_iter().collect();

	let (code, status) = if store_healthy {
		(StatusCode::OK, "ready")
	} else {
		(StatusCode::SERVICE_UNAVAILABLE, "degraded")
	};

	(
		code,
		Json(ReadinessResponse {
			status: status.to_string(),
			store_healthy,
			vendors,
		}),
	)
}
