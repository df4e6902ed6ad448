//! Config values that are either written inline or read from the environment

use serde::{Deserialize, Serialize};
use std::fmt;
use ticket_types::SecretString;

/// A credential in the config file: `{"type": "env", "value": "TICKETMASTER_API_KEY"}`
/// or `{"type": "plain", "value": "..."}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name, or the value itself
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			}),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Resolve straight into a zeroizing secret
	pub fn resolve_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::new)
	}

	/// Where the value comes from, safe to log
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "inline value".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` reads from the environment, anything else is inline
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	#[test]
	fn test_plain_value() {
		let value = ConfigurableValue::from_plain("tm-key");
		assert_eq!(value.resolve().unwrap(), "tm-key");
		assert_eq!(value.to_string(), "plain:[REDACTED]");
	}

	#[test]
	fn test_env_value() {
		env::set_var("TICKET_CONFIG_TEST_SECRET", "from-env");

		let value = ConfigurableValue::from_env("TICKET_CONFIG_TEST_SECRET");
		assert_eq!(value.resolve_secret().unwrap().expose_secret(), "from-env");
		assert_eq!(value.to_string(), "env:TICKET_CONFIG_TEST_SECRET");

		env::remove_var("TICKET_CONFIG_TEST_SECRET");
	}

	#[test]
	fn test_missing_env_value() {
		let value = ConfigurableValue::from_env("TICKET_CONFIG_TEST_UNSET");
		assert_eq!(
			value.resolve().unwrap_err(),
			ConfigurableValueError::EnvironmentVariableNotFound("TICKET_CONFIG_TEST_UNSET".to_string())
		);
	}

	#[test]
	fn test_from_prefixed_string() {
		assert_eq!(
			ConfigurableValue::from("env:SEATGEEK_CLIENT_ID").value_type,
			ValueType::Env
		);
		assert_eq!(ConfigurableValue::from("abc").value_type, ValueType::Plain);
	}

	#[test]
	fn test_serde_shape() {
		let value: ConfigurableValue =
			serde_json::from_str(r#"{"type":"env","value":"ATLAS_API_KEY"}"#).unwrap();
		assert_eq!(value, ConfigurableValue::from_env("ATLAS_API_KEY"));
		assert_eq!(
			value.description(),
			"environment variable 'ATLAS_API_KEY'"
		);
	}
}
