//! Ticket Configuration
//!
//! Configuration management and startup utilities for the ticket aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ConfigValidationError, DocumentStoreSettings, EnvironmentProfile, LogFormat, LoggingSettings,
	Settings, StoreBackend, VendorConfig,
};
pub use startup_logger::{
	log_configuration, log_service_info, log_service_shutdown, log_startup_complete,
};
