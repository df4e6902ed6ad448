//! Credential holder for vendor API keys and the document store key

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "[REDACTED]";

/// A string that is wiped from memory on drop and never printed
///
/// ```rust
/// use ticket_types::SecretString;
///
/// let key = SecretString::from("tm-consumer-key");
/// assert_eq!(key.expose_secret(), "tm-consumer-key");
/// assert_eq!(key.to_string(), "[REDACTED]");
/// ```
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Raw value, for placing into an outbound request only
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretString").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

// Serializing never writes the value, so settings can be dumped to logs.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString::new)
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
		a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
	}
}

impl Eq for SecretString {}
