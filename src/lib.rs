//! Ticket Aggregator Library
//!
//! Fans an event search out to ticket vendors, normalizes what comes back
//! and persists it to a document store.

// Core domain types
pub use ticket_types::{
	chrono,
	serde_json,
	Adapter,
	AdapterError,
	AggregationResult,
	Document,
	Event,
	EventNormalizer,
	EventSearchRequest,
	FilterValidationError,
	NormalizationWarning,
	RawVendorRecord,
	SearchFilter,
	Vendor,
	VendorFailure,
	VendorFailureKind,
};

// Service layer
pub use ticket_service::{
	AggregatorService, AggregatorServiceError, DocumentService, DocumentServiceError,
	VendorSyncOutcome,
};

// Storage layer
pub use ticket_storage::{
	DataApiConfig, DataApiStore, DocumentStore, MemoryStore, StorageError, StorageResult,
};

// API layer
pub use ticket_api::{create_router, AppState};

// Adapters
pub use ticket_adapters::{
	AdapterRegistry, AdapterResult, SeatGeekAdapter, TicketmasterAdapter, VendorAdapter,
	VendorEndpoint,
};

// Config
pub use ticket_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use ticket_types::*;
}

pub mod storage {
	pub use ticket_storage::*;
}

pub mod config {
	pub use ticket_config::*;
}

pub mod adapters {
	pub use ticket_adapters::*;
}

pub mod api {
	pub use ticket_api::*;
}

pub mod service {
	pub use ticket_service::*;
}

pub mod mocks;

use std::net::SocketAddr;
use std::sync::Arc;
use ticket_config::{LogFormat, StoreBackend, VendorConfig};
use tracing::info;

pub use async_trait;
pub use reqwest;

/// Builder for a configured aggregator
///
/// Adapters and a store supplied here take precedence over the ones the
/// settings would otherwise build.
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	adapters: Vec<Box<dyn VendorAdapter>>,
	store: Option<Arc<dyn DocumentStore>>,
}

impl AggregatorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use this adapter instead of building one from settings
	///
	/// Once any adapter is supplied, only supplied adapters are registered.
	pub fn with_adapter(mut self, adapter: Box<dyn VendorAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};
		result.map_err(|e| format!("Failed to initialize tracing: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);
		Ok(())
	}

	fn vendor_endpoint(config: &VendorConfig) -> Result<VendorEndpoint, Box<dyn std::error::Error>> {
		let mut endpoint = VendorEndpoint::new(config.endpoint.clone(), config.api_key.resolve_secret()?)
			.with_timeout_ms(config.timeout_ms);
		if let Some(secret) = &config.api_secret {
			endpoint = endpoint.with_secret(secret.resolve_secret()?);
		}
		for (name, value) in &config.headers {
			endpoint = endpoint.with_header(name.clone(), value.clone());
		}
		Ok(endpoint)
	}

	fn build_registry(
		adapters: Vec<Box<dyn VendorAdapter>>,
		settings: &Settings,
	) -> Result<AdapterRegistry, Box<dyn std::error::Error>> {
		if !adapters.is_empty() {
			return Ok(AdapterRegistry::with_adapters(adapters)?);
		}

		let mut registry = AdapterRegistry::new();
		for (vendor, config) in settings.enabled_vendors() {
			let endpoint = Self::vendor_endpoint(config)
				.map_err(|e| format!("Failed to configure vendor {}: {}", vendor, e))?;
			registry.register(AdapterRegistry::create_adapter(vendor, endpoint)?)?;
		}
		Ok(registry)
	}

	fn build_store(settings: &Settings) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
		let store = &settings.document_store;
		match store.backend {
			StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
			StoreBackend::DataApi => {
				let endpoint = store
					.endpoint
					.clone()
					.ok_or("document_store.endpoint is required for the data_api backend")?;
				let api_key = store
					.api_key
					.as_ref()
					.ok_or("document_store.api_key is required for the data_api backend")?
					.resolve_secret()?;
				let config = DataApiConfig::new(
					endpoint,
					store.data_source.clone(),
					store.database.clone(),
					store.collection.clone(),
					api_key,
				)
				.with_timeout_ms(store.timeout_ms);
				Ok(Arc::new(DataApiStore::new(config)?))
			},
		}
	}

	/// Build the services and return the router with its state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let adapter_registry = Arc::new(Self::build_registry(self.adapters, &settings)?);
		let vendors = adapter_registry.vendors();
		info!(
			"Initialized {} vendor adapter(s): {:?}",
			vendors.len(),
			vendors
		);

		let store = match self.store {
			Some(store) => store,
			None => Self::build_store(&settings)?,
		};
		info!("Document store backend: {}", store.backend_name());

		let app_state = AppState {
			aggregator_service: Arc::new(AggregatorService::new(
				adapter_registry,
				settings.timeouts.per_vendor_ms,
			)),
			document_service: Arc::new(DocumentService::new(store)),
		};

		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Load configuration, initialize logging and serve until Ctrl-C
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)?;

		log_service_info();
		ticket_config::log_configuration(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET    /health");
		info!("  GET    /ready");
		info!("  POST   /events");
		info!("  POST   /events/vendorA");
		info!("  POST   /events/vendorB");
		info!("  POST   /events/sync");
		info!("  POST   /events/stored");
		info!("  POST   /documents");
		info!("  DELETE /documents");
		info!("  POST   /documents/query");
		info!("  POST   /documents/clear");
		if cfg!(feature = "openapi") {
			info!("  GET    /swagger-ui");
			info!("  GET    /api-docs/openapi.json");
		}

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		ticket_config::log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
	}
}
