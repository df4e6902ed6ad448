//! Document store types and traits

pub mod traits;
pub use traits::*;

pub mod errors;
pub use errors::*;

use serde_json::{Map, Value};

/// One stored record; the store owns the `_id` key
pub type Document = Map<String, Value>;

pub type StorageResult<T> = Result<T, StorageError>;
