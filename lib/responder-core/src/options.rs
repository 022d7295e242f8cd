//! Response options and the handler decorator.
//!
//! [`Options`] hold the hooks that run around every dispatch. They are
//! immutable once built and cheap to clone, so one value can decorate many
//! handlers serving concurrent exchanges.
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use responder_core::{Exchange, Options, Payload, handler_fn};
//!
//! let options = Options::builder()
//!     .before(|_sink, _request, status, payload| match payload.as_error() {
//!         Some(err) => (status, serde_json::json!({"error": err.to_string()}).into()),
//!         None => (status, payload),
//!     })
//!     .build();
//!
//! let handler = options.handler(handler_fn(|exchange: &mut Exchange<'_>| {
//!     exchange.with(StatusCode::BAD_GATEWAY, Payload::error("upstream down"));
//! }));
//! # let _ = handler;
//! ```

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http::{Request, StatusCode};

use crate::{Encoder, Error, Exchange, Handler, Payload, Sink};

/// Pre-encode transform of status and payload.
pub type BeforeHook =
    Arc<dyn Fn(&mut dyn Sink, &Request<Bytes>, StatusCode, Payload) -> (StatusCode, Payload) + Send + Sync>;

/// Post-encode observer.
pub type AfterHook = Arc<dyn Fn(&dyn Sink, &Request<Bytes>, StatusCode, &Payload) + Send + Sync>;

/// Per-request encoder factory.
pub type EncoderFactory = Arc<dyn Fn(&dyn Sink, &Request<Bytes>) -> Arc<dyn Encoder> + Send + Sync>;

/// Encode failure observer.
pub type ErrorHook = Arc<dyn Fn(Error) + Send + Sync>;

/// Payload generator for status-only responses.
pub type StatusDataHook = Arc<dyn Fn(&dyn Sink, &Request<Bytes>, StatusCode) -> Payload + Send + Sync>;

/// Options applied by the dispatch functions.
#[derive(Clone, Default)]
pub struct Options {
    pub(crate) before: Option<BeforeHook>,
    pub(crate) after: Option<AfterHook>,
    pub(crate) encoder: Option<EncoderFactory>,
    pub(crate) on_err: Option<ErrorHook>,
    pub(crate) status_data: Option<StatusDataHook>,
    pub(crate) allow_multiple: bool,
}

/// Options used by exchanges outside any decorator.
pub(crate) static DEFAULT_OPTIONS: Options = Options::empty();

impl Options {
    /// Options with no hooks and the single-response rule enforced.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            before: None,
            after: None,
            encoder: None,
            on_err: None,
            status_data: None,
            allow_multiple: false,
        }
    }

    /// Create a new options builder.
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Whether several responses may be emitted on one exchange.
    #[must_use]
    pub const fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    /// Decorate a handler with these options.
    ///
    /// Every exchange served by the returned handler gets a fresh
    /// [`ResponseContext`](crate::ResponseContext), and its dispatch calls run
    /// the hooks configured here.
    #[must_use]
    pub fn handler<H: Handler>(&self, inner: H) -> Decorated<H> {
        Decorated {
            options: self.clone(),
            inner,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("encoder", &self.encoder.is_some())
            .field("on_err", &self.on_err.is_some())
            .field("status_data", &self.status_data.is_some())
            .field("allow_multiple", &self.allow_multiple)
            .finish()
    }
}

/// Builder for [`Options`].
#[derive(Clone, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Transform status and payload before encoding.
    #[must_use]
    pub fn before<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut dyn Sink, &Request<Bytes>, StatusCode, Payload) -> (StatusCode, Payload)
            + Send
            + Sync
            + 'static,
    {
        self.options.before = Some(Arc::new(hook));
        self
    }

    /// Observe every dispatch once the body is written.
    ///
    /// The hook receives the status and payload the handler passed in, before
    /// any `before` transform.
    #[must_use]
    pub fn after<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Sink, &Request<Bytes>, StatusCode, &Payload) + Send + Sync + 'static,
    {
        self.options.after = Some(Arc::new(hook));
        self
    }

    /// Choose the encoder per request.
    #[must_use]
    pub fn encoder<F>(mut self, factory: F) -> Self
    where
        F: Fn(&dyn Sink, &Request<Bytes>) -> Arc<dyn Encoder> + Send + Sync + 'static,
    {
        self.options.encoder = Some(Arc::new(factory));
        self
    }

    /// Use the same encoder for every request.
    #[must_use]
    pub fn with_encoder<E: Encoder + 'static>(self, encoder: E) -> Self {
        let encoder: Arc<dyn Encoder> = Arc::new(encoder);
        self.encoder(move |_sink, _request| Arc::clone(&encoder))
    }

    /// Observe encode failures.
    #[must_use]
    pub fn on_err<F>(mut self, hook: F) -> Self
    where
        F: Fn(Error) + Send + Sync + 'static,
    {
        self.options.on_err = Some(Arc::new(hook));
        self
    }

    /// Generate the payload of status-only responses.
    #[must_use]
    pub fn status_data<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn Sink, &Request<Bytes>, StatusCode) -> Payload + Send + Sync + 'static,
    {
        self.options.status_data = Some(Arc::new(hook));
        self
    }

    /// Allow several responses per exchange.
    #[must_use]
    pub const fn allow_multiple(mut self, allow: bool) -> Self {
        self.options.allow_multiple = allow;
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> Options {
        self.options
    }
}

impl fmt::Debug for OptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionsBuilder").field(&self.options).finish()
    }
}

/// Handler wrapped by [`Options::handler`].
#[derive(Debug, Clone)]
pub struct Decorated<H> {
    options: Options,
    inner: H,
}

impl<H: Handler> Decorated<H> {
    /// Serve one exchange on a host sink.
    pub fn serve_http(&self, sink: &mut dyn Sink, request: &Request<Bytes>) {
        let mut exchange = Exchange::decorated(sink, request, &self.options);
        self.inner.serve(&mut exchange);
    }

    /// Options applied to the inner handler.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The wrapped handler.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Handler> Handler for Decorated<H> {
    fn serve(&self, exchange: &mut Exchange<'_>) {
        let (sink, request) = exchange.parts();
        self.serve_http(sink, request);
    }
}
