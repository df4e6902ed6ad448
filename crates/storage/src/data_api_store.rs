//! Remote document store spoken to over an Atlas Data API-style HTTP interface
//!
//! Every operation is a `POST {endpoint}/action/{name}` carrying the target
//! `dataSource`, `database` and `collection` alongside the payload.

use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue},
	Client,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use ticket_types::constants::DEFAULT_STORE_TIMEOUT_MS;
use ticket_types::{Document, DocumentStore, SecretString, StorageError, StorageResult};
use tracing::{debug, warn};
use url::Url;

/// Connection settings for a Data API endpoint
#[derive(Debug, Clone)]
pub struct DataApiConfig {
	/// e.g. `https://data.mongodb-api.com/app/<app-id>/endpoint/data/v1`
	pub endpoint: String,
	pub data_source: String,
	pub database: String,
	pub collection: String,
	pub api_key: SecretString,
	pub timeout_ms: u64,
}

impl DataApiConfig {
	pub fn new(
		endpoint: impl Into<String>,
		data_source: impl Into<String>,
		database: impl Into<String>,
		collection: impl Into<String>,
		api_key: impl Into<SecretString>,
	) -> Self {
		Self {
			endpoint: endpoint.into(),
			data_source: data_source.into(),
			database: database.into(),
			collection: collection.into(),
			api_key: api_key.into(),
			timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}
}

/// Actions understood by the Data API
#[derive(Debug, Clone, Copy)]
enum Action {
	InsertOne,
	InsertMany,
	FindOne,
	Find,
	DeleteOne,
	DeleteMany,
}

impl Action {
	fn as_str(&self) -> &'static str {
		match self {
			Action::InsertOne => "insertOne",
			Action::InsertMany => "insertMany",
			Action::FindOne => "findOne",
			Action::Find => "find",
			Action::DeleteOne => "deleteOne",
			Action::DeleteMany => "deleteMany",
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionRequest<'a> {
	data_source: &'a str,
	database: &'a str,
	collection: &'a str,
	#[serde(flatten)]
	payload: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertOneReply {
	inserted_id: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertManyReply {
	inserted_ids: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct FindOneReply {
	document: Option<Document>,
}

#[derive(Debug, Deserialize)]
struct FindReply {
	documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteReply {
	deleted_count: u64,
}

/// `DocumentStore` backed by a remote Data API
#[derive(Debug)]
pub struct DataApiStore {
	config: DataApiConfig,
	base_url: Url,
	client: Client,
}

impl DataApiStore {
	pub fn new(config: DataApiConfig) -> StorageResult<Self> {
		let mut base_url = Url::parse(&config.endpoint).map_err(|e| StorageError::Configuration {
			message: format!("Invalid document store endpoint '{}': {}", config.endpoint, e),
		})?;
		if !base_url.path().ends_with('/') {
			base_url.set_path(&format!("{}/", base_url.path()));
		}

		let mut headers = HeaderMap::new();
		headers.insert("Accept", HeaderValue::from_static("application/json"));
		let mut api_key =
			HeaderValue::from_str(config.api_key.expose_secret()).map_err(|_| StorageError::Configuration {
				message: "Document store API key is not a valid header value".to_string(),
			})?;
		api_key.set_sensitive(true);
		headers.insert("api-key", api_key);

		let client = Client::builder()
			.default_headers(headers)
			.timeout(Duration::from_millis(config.timeout_ms))
			.build()
			.map_err(|e| StorageError::Configuration {
				message: format!("Failed to build HTTP client: {}", e),
			})?;

		Ok(Self {
			config,
			base_url,
			client,
		})
	}

	async fn call<R>(&self, action: Action, payload: Map<String, Value>) -> StorageResult<R>
	where
		R: for<'de> Deserialize<'de>,
	{
		let url = self
			.base_url
			.join(&format!("action/{}", action.as_str()))
			.map_err(|e| StorageError::Configuration {
				message: e.to_string(),
			})?;
		let body = ActionRequest {
			data_source: &self.config.data_source,
			database: &self.config.database,
			collection: &self.config.collection,
			payload,
		};

		debug!(
			"Document store {} on {}.{}",
			action.as_str(),
			self.config.database,
			self.config.collection
		);

		let response = self
			.client
			.post(url)
			.json(&body)
			.send()
			.await
			.map_err(StorageError::from_transport)?;

		let status = response.status();
		let text = response.text().await.map_err(StorageError::from_transport)?;
		if !status.is_success() {
			return Err(StorageError::Request {
				status_code: status.as_u16(),
				message: text,
			});
		}

		serde_json::from_str(&text).map_err(|e| StorageError::Serialization {
			message: format!("Unexpected {} reply: {}", action.as_str(), e),
		})
	}
}

fn payload(key: &str, value: Value) -> Map<String, Value> {
	let mut map = Map::new();
	map.insert(key.to_string(), value);
	map
}

/// Ids come back as plain strings or as extended JSON `{"$oid": "..."}`
fn id_string(id: Value) -> String {
	match id {
		Value::String(s) => s,
		Value::Object(ref map) => match map.get("$oid") {
			Some(Value::String(oid)) => oid.clone(),
			_ => id.to_string(),
		},
		other => other.to_string(),
	}
}

#[async_trait]
impl DocumentStore for DataApiStore {
	async fn insert_one(&self, document: Document) -> StorageResult<String> {
		let reply: InsertOneReply = self
			.call(Action::InsertOne, payload("document", Value::Object(document)))
			.await?;
		Ok(id_string(reply.inserted_id))
	}

	async fn insert_many(&self, documents: Vec<Document>) -> StorageResult<Vec<String>> {
		if documents.is_empty() {
			return Ok(Vec::new());
		}
		let documents = documents.into_iter().map(Value::Object).collect();
		let reply: InsertManyReply = self
			.call(Action::InsertMany, payload("documents", Value::Array(documents)))
			.await?;
		Ok(reply.inserted_ids.into_iter().map(id_string).collect())
	}

	async fn find_one(&self, filter: Document) -> StorageResult<Option<Document>> {
		let reply: FindOneReply = self
			.call(Action::FindOne, payload("filter", Value::Object(filter)))
			.await?;
		Ok(reply.document)
	}

	async fn find(&self, filter: Document) -> StorageResult<Vec<Document>> {
		let reply: FindReply = self
			.call(Action::Find, payload("filter", Value::Object(filter)))
			.await?;
		Ok(reply.documents)
	}

	async fn delete_one(&self, filter: Document) -> StorageResult<u64> {
		let reply: DeleteReply = self
			.call(Action::DeleteOne, payload("filter", Value::Object(filter)))
			.await?;
		Ok(reply.deleted_count)
	}

	async fn delete_many(&self, filter: Document) -> StorageResult<u64> {
		let reply: DeleteReply = self
			.call(Action::DeleteMany, payload("filter", Value::Object(filter)))
			.await?;
		Ok(reply.deleted_count)
	}

	async fn health_check(&self) -> StorageResult<bool> {
		match self.find_one(Document::new()).await {
			Ok(_) => Ok(true),
			Err(e) => {
				warn!("Document store health check failed: {}", e);
				Ok(false)
			},
		}
	}

	fn backend_name(&self) -> &'static str {
		"data_api"
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use wiremock::matchers::{body_json, header, method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn store(server: &MockServer) -> DataApiStore {
		DataApiStore::new(DataApiConfig::new(
			format!("{}/app/data-abc/endpoint/data/v1", server.uri()),
			"Cluster0",
			"tickets",
			"events",
			"atlas-key",
		))
		.unwrap()
	}

	fn doc(value: Value) -> Document {
		serde_json::from_value(value).unwrap()
	}

	#[tokio::test]
	async fn test_insert_one_posts_action_envelope() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/app/data-abc/endpoint/data/v1/action/insertOne"))
			.and(header("api-key", "atlas-key"))
			.and(body_json(json!({
				"dataSource": "Cluster0",
				"database": "tickets",
				"collection": "events",
				"document": { "name": "Hamilton" }
			})))
			.respond_with(
				ResponseTemplate::new(201).set_body_json(json!({ "insertedId": "65a1f0c2e4b0a1b2c3d4e5f6" })),
			)
			.expect(1)
			.mount(&server)
			.await;

		let id = store(&server)
			.insert_one(doc(json!({ "name": "Hamilton" })))
			.await
			.unwrap();
		assert_eq!(id, "65a1f0c2e4b0a1b2c3d4e5f6");
	}

	#[tokio::test]
	async fn test_insert_many_reads_extended_json_ids() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/app/data-abc/endpoint/data/v1/action/insertMany"))
			.respond_with(ResponseTemplate::new(201).set_body_json(json!({
				"insertedIds": [ "a1", { "$oid": "b2" } ]
			})))
			.mount(&server)
			.await;

		let ids = store(&server)
			.insert_many(vec![doc(json!({ "n": 1 })), doc(json!({ "n": 2 }))])
			.await
			.unwrap();
		assert_eq!(ids, vec!["a1", "b2"]);
	}

	#[tokio::test]
	async fn test_insert_many_empty_skips_network() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(500))
			.expect(0)
			.mount(&server)
			.await;

		assert!(store(&server).insert_many(Vec::new()).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_find_and_delete_replies() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/app/data-abc/endpoint/data/v1/action/find"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"documents": [ { "_id": "1", "name": "a" } ]
			})))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/app/data-abc/endpoint/data/v1/action/findOne"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "document": null })))
			.mount(&server)
			.await;
		Mock::given(method("POST"))
			.and(path("/app/data-abc/endpoint/data/v1/action/deleteMany"))
			.and(body_json(json!({
				"dataSource": "Cluster0",
				"database": "tickets",
				"collection": "events",
				"filter": {}
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deletedCount": 0 })))
			.mount(&server)
			.await;

		let store = store(&server);
		let found = store.find(Document::new()).await.unwrap();
		assert_eq!(found.len(), 1);
		assert_eq!(found[0]["name"], json!("a"));
		assert!(store.find_one(Document::new()).await.unwrap().is_none());
		assert_eq!(store.delete_many(Document::new()).await.unwrap(), 0);
	}

	#[tokio::test]
	async fn test_error_status_is_request_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(401).set_body_string("invalid session"))
			.mount(&server)
			.await;

		let err = store(&server).delete_one(Document::new()).await.unwrap_err();
		assert_eq!(
			err,
			StorageError::Request {
				status_code: 401,
				message: "invalid session".to_string()
			}
		);
	}

	#[tokio::test]
	async fn test_unexpected_reply_is_serialization_error() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
			.mount(&server)
			.await;

		let err = store(&server).delete_one(Document::new()).await.unwrap_err();
		assert!(matches!(err, StorageError::Serialization { .. }));
	}

	#[tokio::test]
	async fn test_unreachable_store_is_unavailable() {
		let store = DataApiStore::new(
			DataApiConfig::new("http://127.0.0.1:1/v1", "c", "d", "e", "k").with_timeout_ms(500),
		)
		.unwrap();
		let err = store.find(Document::new()).await.unwrap_err();
		assert!(matches!(err, StorageError::Unavailable { .. }));
		assert!(!store.health_check().await.unwrap());
	}

	#[test]
	fn test_bad_settings_are_configuration_errors() {
		let err = DataApiStore::new(DataApiConfig::new("not a url", "c", "d", "e", "k")).unwrap_err();
		assert!(matches!(err, StorageError::Configuration { .. }));

		let err = DataApiStore::new(DataApiConfig::new(
			"http://127.0.0.1:1/v1",
			"c",
			"d",
			"e",
			"bad\nkey",
		))
		.unwrap_err();
		assert!(matches!(err, StorageError::Configuration { .. }));
	}
}
