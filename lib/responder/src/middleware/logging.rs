//! Exchange logging middleware.
//!
//! This middleware logs served requests and their responses using the
//! `tracing` crate.

use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

/// Layer that adds exchange logging.
///
/// # Example
///
/// ```ignore
/// use responder::middleware::LoggingLayer;
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(LoggingLayer::new())
///     .layer(ResponderLayer::new(options))
///     .service(handler);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at debug level (request headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs requests and responses.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<S, B> Service<http::Request<B>> for Logging<S>
where
    S: Service<http::Request<B>, Response = http::Response<Bytes>>,
    S::Error: Display,
    S::Future: Send + 'static,
{
    type Response = http::Response<Bytes>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let method = request.method().clone();
        let uri = request.uri().clone();
        let level = self.level;

        let span = span!(Level::INFO, "http_exchange", %method, %uri);

        match level {
            LogLevel::Debug => {
                debug!(
                    parent: &span,
                    method = %method,
                    uri = %uri,
                    headers = ?request.headers(),
                    "serving request"
                );
            }
            LogLevel::Info => {
                info!(parent: &span, method = %method, uri = %uri, "serving request");
            }
        }

        let future = self.inner.call(request);
        Box::pin(
            async move {
                let start = Instant::now();
                let result = future.await;

                // Saturating conversion to u64 (truncates after ~584 million years)
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let status = response.status().as_u16();
                        let bytes = response.body().len();
                        if response.status().is_server_error() {
                            warn!(status, bytes, elapsed_ms, "response sent with server error");
                        } else {
                            info!(status, bytes, elapsed_ms, "response sent");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, elapsed_ms, "exchange failed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
