//! Tower integration.
//!
//! [`ResponderService`] runs a decorated [`Handler`] for each
//! `http::Request`, buffering the request body and recording the response in
//! a [`ResponseWriter`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::Body;
use http_body_util::BodyExt;
use responder_core::{BoxError, Decorated, Error, Handler, Options, ResponseWriter, Result};
use tower::{Layer, Service};

/// Layer that turns a [`Handler`] into a [`ResponderService`].
///
/// # Example
///
/// ```
/// use responder::{Options, ResponderLayer, StatusCode, handler_fn};
/// use tower::Layer;
///
/// let layer = ResponderLayer::new(Options::default());
/// let service = layer.layer(handler_fn(|exchange| {
///     exchange.with_status(StatusCode::OK);
/// }));
/// # let _ = service;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponderLayer {
    options: Options,
}

impl ResponderLayer {
    /// Create a layer decorating handlers with `options`.
    #[must_use]
    pub const fn new(options: Options) -> Self {
        Self { options }
    }
}

impl<H: Handler> Layer<H> for ResponderLayer {
    type Service = ResponderService<H>;

    fn layer(&self, handler: H) -> Self::Service {
        ResponderService::new(self.options.handler(handler))
    }
}

/// Service serving each request with a decorated handler.
///
/// A handler that responds twice without `allow_multiple` panics inside
/// [`Service::call`]; the host's panic recovery, if any, sees it.
#[derive(Debug)]
pub struct ResponderService<H> {
    handler: Arc<Decorated<H>>,
}

impl<H> Clone for ResponderService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: Handler> ResponderService<H> {
    /// Wrap a decorated handler.
    #[must_use]
    pub fn new(handler: Decorated<H>) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Serve a request whose body is already buffered.
    #[must_use]
    pub fn respond(&self, request: &http::Request<Bytes>) -> http::Response<Bytes> {
        let mut writer = ResponseWriter::new();
        self.handler.serve_http(&mut writer, request);
        writer.into_response()
    }
}

/// Decorate `handler` with `options` and wrap it in a [`ResponderService`].
#[must_use]
pub fn service<H: Handler>(options: &Options, handler: H) -> ResponderService<H> {
    ResponderService::new(options.handler(handler))
}

impl<H, B> Service<http::Request<B>> for ResponderService<H>
where
    H: Handler + 'static,
    B: Body + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Response = http::Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: http::Request<B>) -> Self::Future {
        let service = self.clone();
        Box::pin(async move {
            let (parts, body) = request.into_parts();
            let body = body.collect().await.map_err(Error::body)?.to_bytes();
            let request = http::Request::from_parts(parts, body);
            Ok(service.respond(&request))
        })
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use http_body_util::Full;
    use responder_core::handler_fn;
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn respond_buffers_the_response() {
        let service = service(
            &Options::default(),
            handler_fn(|exchange| exchange.with(StatusCode::ACCEPTED, "queued")),
        );

        let request = http::Request::builder()
            .uri("/jobs")
            .body(Bytes::new())
            .expect("request");
        let response = service.respond(&request);

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.body().as_ref(), b"\"queued\"\n");
    }

    #[tokio::test]
    async fn layer_applies_options() {
        let options = Options::builder()
            .status_data(|_sink, request, _status| request.uri().path().into())
            .build();
        let service = ResponderLayer::new(options).layer(handler_fn(|exchange| {
            exchange.with_status(StatusCode::OK);
        }));

        let request = http::Request::builder()
            .uri("/ping")
            .body(Full::new(Bytes::new()))
            .expect("request");
        let response = service.oneshot(request).await.expect("response");

        assert_eq!(response.body().as_ref(), b"\"/ping\"\n");
    }
}
