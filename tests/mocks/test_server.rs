//! Test server for integration tests

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use ticket_aggregator::mocks::MockVendorAdapter;
use ticket_aggregator::{
	AdapterError, AggregatorBuilder, DocumentStore, MemoryStore, Settings, Vendor,
};
use tokio::task::JoinHandle;

/// Server bound to an ephemeral local port
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Ticketmaster answers with three events, SeatGeek with two
	#[allow(dead_code)]
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_adapters(vec![
			MockVendorAdapter::ticketmaster(3),
			MockVendorAdapter::seatgeek(2),
		])
		.await
	}

	/// Ticketmaster answers with three events, SeatGeek fails with HTTP 500
	#[allow(dead_code)]
	pub async fn spawn_with_failing_seatgeek() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_adapters(vec![
			MockVendorAdapter::ticketmaster(3),
			MockVendorAdapter::failing(
				Vendor::SeatGeek,
				AdapterError::VendorApi {
					status_code: 500,
					body: "Internal Server Error".to_string(),
				},
			),
		])
		.await
	}

	/// SeatGeek outlives a short per-vendor timeout
	#[allow(dead_code)]
	pub async fn spawn_with_slow_seatgeek() -> Result<Self, Box<dyn std::error::Error>> {
		let mut settings = Settings::default();
		settings.timeouts.per_vendor_ms = 200;

		let (app, _) = AggregatorBuilder::new()
			.with_settings(settings)
			.with_adapter(MockVendorAdapter::ticketmaster(2).boxed())
			.with_adapter(
				MockVendorAdapter::seatgeek(2)
					.with_delay(Duration::from_secs(2))
					.boxed(),
			)
			.start()
			.await?;
		Self::spawn_server_with_app(app).await
	}

	#[allow(dead_code)]
	pub async fn spawn_with_adapters(
		adapters: Vec<MockVendorAdapter>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
		Self::spawn_with_store(adapters, store).await
	}

	#[allow(dead_code)]
	pub async fn spawn_with_store(
		adapters: Vec<MockVendorAdapter>,
		store: Arc<dyn DocumentStore>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let mut builder = AggregatorBuilder::new()
			.with_settings(Settings::default())
			.with_store(store);
		for adapter in adapters {
			builder = builder.with_adapter(adapter.boxed());
		}
		let (app, _) = builder.start().await?;
		Self::spawn_server_with_app(app).await
	}

	/// Serve a router built purely from settings
	#[allow(dead_code)]
	pub async fn spawn_with_settings(
		settings: Settings,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let (app, _) = AggregatorBuilder::new()
			.with_settings(settings)
			.start()
			.await?;
		Self::spawn_server_with_app(app).await
	}

	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;

		let handle = tokio::spawn(async move {
			if let Err(e) = axum::serve(listener, app).await {
				eprintln!("Test server error: {}", e);
			}
		});

		Ok(Self {
			base_url: format!("http://{}", addr),
			handle,
		})
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}
