//! Response payloads.
//!
//! A [`Payload`] is what a handler hands to the dispatch functions. Encoders
//! decide how each variant lands on the wire. [`Payload::data`] defers
//! serialization to the encoder, so an unencodable value surfaces as an
//! encode failure.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{BoxError, Result};

/// Value emitted by a handler as the response body.
#[derive(Clone, Default)]
pub enum Payload {
    /// No payload.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// An error value, usually normalized by a `before` hook.
    Error(Arc<dyn std::error::Error + Send + Sync>),
    /// A value serialized by the encoder.
    Data(Arc<dyn SerializeJson>),
}

/// Object-safe JSON serialization, implemented for every `Serialize` value.
pub trait SerializeJson: Send + Sync {
    /// Serialize into a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no JSON representation.
    fn to_json_value(&self) -> serde_json::Result<Value>;

    /// Serialize into JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the value has no JSON representation.
    fn to_json_vec(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: serde::Serialize + Send + Sync> SerializeJson for T {
    fn to_json_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

impl Payload {
    /// Serialize any value into a [`Payload::Json`].
    ///
    /// # Example
    ///
    /// ```
    /// use responder_core::Payload;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct User { name: String }
    ///
    /// let payload = Payload::json(&User { name: "Alice".to_string() }).expect("serialize");
    /// assert_eq!(payload.as_json(), Some(&serde_json::json!({"name": "Alice"})));
    /// ```
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Wrap a value serialized only when the response is encoded.
    ///
    /// # Example
    ///
    /// ```
    /// use responder_core::Payload;
    ///
    /// let payload = Payload::data(vec![1, 2, 3]);
    /// assert_eq!(payload.to_value().expect("serialize"), serde_json::json!([1, 2, 3]));
    /// ```
    #[must_use]
    pub fn data<T: serde::Serialize + Send + Sync + 'static>(value: T) -> Self {
        Self::Data(Arc::new(value))
    }

    /// Wrap an error value.
    #[must_use]
    pub fn error(error: impl Into<BoxError>) -> Self {
        Self::Error(Arc::from(error.into()))
    }

    /// Returns `true` for [`Payload::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The JSON document, if any.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The JSON document this payload encodes to with [`crate::JsonEncoder`].
    ///
    /// # Errors
    ///
    /// Returns an error if a [`Payload::Data`] value cannot be serialized.
    pub fn to_value(&self) -> Result<Value> {
        Ok(match self {
            Self::Empty => Value::Object(serde_json::Map::new()),
            Self::Json(value) => value.clone(),
            Self::Error(error) => Value::String(error.to_string()),
            Self::Data(data) => data.to_json_value()?,
        })
    }

    /// The error value, if any.
    #[must_use]
    pub fn as_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Error(error) => Some(error.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Error(error) => f.debug_tuple("Error").field(&error.to_string()).finish(),
            Self::Data(_) => f.write_str("Data(..)"),
        }
    }
}

// Error and data payloads compare by identity.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => Arc::ptr_eq(a, b),
            (Self::Data(a), Self::Data(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<Option<Value>> for Payload {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Empty, Self::Json)
    }
}

impl From<()> for Payload {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<BoxError> for Payload {
    fn from(error: BoxError) -> Self {
        Self::error(error)
    }
}
