//! Raw document store access

use axum::{
	extract::{rejection::JsonRejection, State},
	http::StatusCode,
	response::Json,
};
use serde::{Deserialize, Serialize};
use ticket_types::Document;
use tracing::info;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{api_error, body_rejection, document_error, ApiError};
use crate::state::AppState;

/// Either `{"document": {...}}` or `{"documents": [...]}`
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InsertDocumentsRequest {
	#[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
	pub document: Option<Document>,
	#[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Object>>))]
	pub documents: Option<Vec<Document>>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(untagged)]
pub enum InsertDocumentsResponse {
	One {
		#[serde(rename = "insertedId")]
		inserted_id: String,
	},
	Many {
		#[serde(rename = "insertedIds")]
		inserted_ids: Vec<String>,
	},
}

/// Filter for queries and deletes; `one` limits the call to the first match
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DocumentFilterRequest {
	#[serde(default)]
	#[cfg_attr(feature = "openapi", schema(value_type = Object))]
	pub filter: Document,
	#[serde(default)]
	pub one: bool,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(untagged)]
pub enum QueryDocumentsResponse {
	One {
		#[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
		document: Option<Document>,
	},
	Many {
		#[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
		documents: Vec<Document>,
	},
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DeleteDocumentsResponse {
	#[serde(rename = "deletedCount")]
	pub deleted_count: u64,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/documents",
    request_body = InsertDocumentsRequest,
    responses(
        (status = 200, description = "Documents inserted", body = InsertDocumentsResponse),
        (status = 400, description = "Neither or both of document/documents given", body = ErrorResponse),
        (status = 502, description = "Document store rejected the request", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "documents"
))]
pub async fn post_documents(
	State(state): State<AppState>,
	request: Result<Json<InsertDocumentsRequest>, JsonRejection>,
) -> Result<Json<InsertDocumentsResponse>, ApiError> {
	let Json(request) = request.map_err(body_rejection)?;
	let response = match (request.document, request.documents) {
		(Some(document), None) => InsertDocumentsResponse::One {
			inserted_id: state
				.document_service
				.insert_document(document)
				.await
				.map_err(document_error)?,
		},
		(None, Some(documents)) => InsertDocumentsResponse::Many {
			inserted_ids: state
				.document_service
				.insert_documents(documents)
				.await
				.map_err(document_error)?,
		},
		_ => {
			return Err(api_error(
				StatusCode::BAD_REQUEST,
				"INVALID_ARGUMENT",
				"Provide exactly one of 'document' or 'documents'",
			))
		},
	};
	Ok(Json(response))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/documents/query",
    request_body = DocumentFilterRequest,
    responses(
        (status = 200, description = "Matching documents", body = QueryDocumentsResponse),
        (status = 502, description = "Document store rejected the request", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "documents"
))]
pub async fn query_documents(
	State(state): State<AppState>,
	request: Result<Json<DocumentFilterRequest>, JsonRejection>,
) -> Result<Json<QueryDocumentsResponse>, ApiError> {
	let Json(request) = request.map_err(body_rejection)?;
	let service = &state.document_service;
	let response = if request.one {
		QueryDocumentsResponse::One {
			document: service
				.find_one_document(request.filter)
				.await
				.map_err(document_error)?,
		}
	} else {
		QueryDocumentsResponse::Many {
			documents: service
				.find_documents(request.filter)
				.await
				.map_err(document_error)?,
		}
	};
	Ok(Json(response))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/documents",
    request_body = DocumentFilterRequest,
    responses(
        (status = 200, description = "Documents deleted", body = DeleteDocumentsResponse),
        (status = 502, description = "Document store rejected the request", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "documents"
))]
pub async fn delete_documents(
	State(state): State<AppState>,
	request: Result<Json<DocumentFilterRequest>, JsonRejection>,
) -> Result<Json<DeleteDocumentsResponse>, ApiError> {
	let Json(request) = request.map_err(body_rejection)?;
	let service = &state.document_service;
	let deleted_count = if request.one {
		service.delete_one_document(request.filter).await
	} else {
		service.delete_documents(request.filter).await
	}
	.map_err(document_error)?;
	Ok(Json(DeleteDocumentsResponse { deleted_count }))
}

/// Empty the collection
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/documents/clear",
    responses(
        (status = 200, description = "Collection cleared", body = DeleteDocumentsResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    ),
    tag = "documents"
))]
pub async fn clear_documents(
	State(state): State<AppState>,
) -> Result<Json<DeleteDocumentsResponse>, ApiError> {
	let deleted_count = state.document_service.clear().await.map_err(document_error)?;
	info!("Cleared {} documents", deleted_count);
	Ok(Json(DeleteDocumentsResponse { deleted_count }))
}
