//! Payload encoders.
//!
//! An [`Encoder`] declares the response content type and serializes a
//! [`Payload`] into a [`Sink`]. [`JsonEncoder`] is used unless the
//! [`Options`](crate::Options) install an encoder factory.

use bytes::Bytes;
use http::{HeaderValue, Request};
use serde_json::Value;

use crate::{Payload, Result, Sink};

/// Content type produced by [`JsonEncoder`].
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// The built-in JSON encoder.
pub static JSON: JsonEncoder = JsonEncoder;

/// Serializer for response payloads.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use http::{HeaderValue, Request};
/// use responder_core::{Encoder, Payload, Result, Sink};
///
/// struct PlainText;
///
/// impl Encoder for PlainText {
///     fn content_type(&self, _sink: &dyn Sink, _request: &Request<Bytes>) -> HeaderValue {
///         HeaderValue::from_static("text/plain; charset=utf-8")
///     }
///
///     fn encode(&self, sink: &mut dyn Sink, _request: &Request<Bytes>, payload: &Payload) -> Result<()> {
///         let text = payload.as_json().map(ToString::to_string).unwrap_or_default();
///         sink.write(text.as_bytes())?;
///         Ok(())
///     }
/// }
/// ```
pub trait Encoder: Send + Sync {
    /// MIME type set as the `Content-Type` header before the body is written.
    fn content_type(&self, sink: &dyn Sink, request: &Request<Bytes>) -> HeaderValue;

    /// Serialize `payload` into the sink body.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized or the sink
    /// rejects the write.
    fn encode(&self, sink: &mut dyn Sink, request: &Request<Bytes>, payload: &Payload)
    -> Result<()>;
}

/// Newline-terminated JSON encoder.
///
/// - [`Payload::Json`] is written as-is.
/// - [`Payload::Empty`] is written as `{}`.
/// - [`Payload::Error`] is written as the JSON string of its message.
/// - [`Payload::Data`] is serialized here; failures surface as [`crate::Error::Json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    /// Serialize a payload to its JSON body, trailing newline included.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_body(payload: &Payload) -> Result<Vec<u8>> {
        let mut body = match payload {
            Payload::Empty => serde_json::to_vec(&Value::Object(serde_json::Map::new()))?,
            Payload::Json(value) => serde_json::to_vec(value)?,
            Payload::Error(error) => serde_json::to_vec(&error.to_string())?,
            Payload::Data(data) => data.to_json_vec()?,
        };
        body.push(b'\n');
        Ok(body)
    }
}

impl Encoder for JsonEncoder {
    fn content_type(&self, _sink: &dyn Sink, _request: &Request<Bytes>) -> HeaderValue {
        HeaderValue::from_static(JSON_CONTENT_TYPE)
    }

    fn encode(
        &self,
        sink: &mut dyn Sink,
        _request: &Request<Bytes>,
        payload: &Payload,
    ) -> Result<()> {
        let body = Self::to_body(payload)?;
        sink.write(&body)?;
        Ok(())
    }
}
