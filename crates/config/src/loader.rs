//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

/// Prefix for environment overrides, e.g. `TICKET_AGGREGATOR__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TICKET_AGGREGATOR";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("failed to read configuration: {0}")]
	Read(#[from] ConfigError),
	#[error("invalid configuration: {0}")]
	Invalid(#[from] ConfigValidationError),
}

/// Load `config/config.{toml,json,yaml}` (optional) plus environment overrides
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	load_config_from("config/config")
}

/// Same as `load_config` with an explicit file stem
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
