//! Service startup and shutdown logging

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Logs service, platform and environment details at startup
pub fn log_service_info() {
	let service_name = "ticket-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Ticket Aggregator Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs which vendors and which document store this instance will use
pub fn log_configuration(settings: &Settings) {
	let vendors = settings.enabled_vendors();
	if vendors.is_empty() {
		warn!("⚠️ No vendors enabled; event searches will be rejected");
	}
	for (vendor, config) in vendors {
		info!(
			"🎫 Vendor {}: {} (timeout {}ms, key from {})",
			vendor,
			config.endpoint,
			config.timeout_ms,
			config.api_key.description()
		);
	}

	let store = &settings.document_store;
	info!(
		"🗄️ Document store: {:?} ({}.{})",
		store.backend, store.database, store.collection
	);
	info!("⏱️ Per-vendor timeout: {}ms", settings.timeouts.per_vendor_ms);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Ticket Aggregator Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}

pub fn log_service_shutdown() {
	info!("🛑 Ticket Aggregator Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
