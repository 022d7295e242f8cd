//! Response sinks.
//!
//! A [`Sink`] is the response-writing channel of one exchange: a status, a
//! header map, and body bytes. Hosts adapt their own writer to it;
//! [`ResponseWriter`] is the in-memory implementation used by the tower
//! service and by tests.

use std::io;

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, HeaderValue, StatusCode, header};
use tracing::warn;

/// Response-writing channel for a single exchange.
///
/// The status and headers must be in place before the first body byte is
/// written; after that the sink is *committed*.
pub trait Sink: Send {
    /// The status recorded so far.
    fn status(&self) -> StatusCode;

    /// Record the response status.
    fn write_status(&mut self, status: StatusCode);

    /// Response headers.
    fn headers(&self) -> &HeaderMap;

    /// Mutable response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Append the whole buffer to the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying transport rejects the bytes.
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Whether body bytes have already been written.
    fn is_committed(&self) -> bool;

    /// Content type header, if set and valid UTF-8.
    fn content_type(&self) -> Option<&str> {
        self.headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// In-memory [`Sink`] that records the status, headers and body.
///
/// The status defaults to `200 OK` until written. It keeps the most recent
/// status, so a second response on an exchange that allows several is
/// observable; rewriting the status after the body is committed is logged.
#[derive(Debug, Clone)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
    committed: bool,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
            committed: false,
        }
    }

    /// Whether a status was explicitly written.
    #[must_use]
    pub const fn status_written(&self) -> bool {
        self.status.is_some()
    }

    /// Body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text, lossily decoded.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// Consume into an [`http::Response`].
    #[must_use]
    pub fn into_response(self) -> http::Response<Bytes> {
        let mut response = http::Response::new(self.body.freeze());
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl Sink for ResponseWriter {
    fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.committed {
            warn!(
                previous = %self.status(),
                %status,
                "status written after the response body"
            );
        }
        self.status = Some(status);
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.committed = true;
        self.body.extend_from_slice(buf);
        Ok(())
    }

    fn is_committed(&self) -> bool {
        self.committed
    }
}
