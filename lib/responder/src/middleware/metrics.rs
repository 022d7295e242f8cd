//! Metrics middleware using the metrics crate facade.
//!
//! This middleware records served-exchange metrics using the `metrics` crate,
//! which allows integration with various metrics backends (Prometheus, `StatsD`, etc.).

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};

/// Labels used for metrics.
const LABEL_METHOD: &str = "method";
const LABEL_STATUS: &str = "status";

/// Metric names.
const METRIC_RESPONSES_TOTAL: &str = "http_server_responses_total";
const METRIC_RESPONSE_DURATION: &str = "http_server_response_duration_seconds";
const METRIC_EXCHANGES_IN_FLIGHT: &str = "http_server_exchanges_in_flight";

/// In-flight gauge increment, undone on drop.
///
/// Dropped on completion, on a handler panic, or when the host drops the
/// future.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        metrics::gauge!(METRIC_EXCHANGES_IN_FLIGHT).increment(1.0);
        Self
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        metrics::gauge!(METRIC_EXCHANGES_IN_FLIGHT).decrement(1.0);
    }
}

/// Layer that records exchange metrics.
///
/// Records the following metrics:
/// - `http_server_responses_total` (counter): Responses sent, labeled by method and status
/// - `http_server_response_duration_seconds` (histogram): Handling duration in seconds
/// - `http_server_exchanges_in_flight` (gauge): Exchanges currently being handled
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer {
    _private: (),
}

impl MetricsLayer {
    /// Create a new metrics layer.
    #[must_use]
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = Metrics<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Metrics { inner }
    }
}

/// Service that records exchange metrics.
#[derive(Debug, Clone)]
pub struct Metrics<S> {
    inner: S,
}

impl<S> Metrics<S> {
    /// Create a new metrics service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, B> Service<http::Request<B>> for Metrics<S>
where
    S: Service<http::Request<B>, Response = http::Response<Bytes>>,
    S::Future: Send + 'static,
{
    type Response = http::Response<Bytes>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let method = request.method().to_string();
        let start = Instant::now();

        let in_flight = InFlight::enter();
        let future = self.inner.call(request);

        Box::pin(async move {
            let result = future.await;
            drop(in_flight);

            let duration = start.elapsed().as_secs_f64();
            metrics::histogram!(METRIC_RESPONSE_DURATION, LABEL_METHOD => method.clone())
                .record(duration);

            let status = match &result {
                Ok(response) => response.status().as_u16().to_string(),
                Err(_) => "error".to_string(),
            };

            metrics::counter!(
                METRIC_RESPONSES_TOTAL,
                LABEL_METHOD => method,
                LABEL_STATUS => status
            )
            .increment(1);

            result
        })
    }
}
