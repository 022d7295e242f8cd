//! Per-exchange context handed to handlers.

use bytes::Bytes;
use http::{Request, StatusCode};

use crate::error::MULTIPLE_RESPONSES;
use crate::options::DEFAULT_OPTIONS;
use crate::{Error, Options, Payload, ResponseContext, Result, Sink, dispatch};

/// One request/response cycle: the sink, the request, the effective
/// [`Options`] and, under a decorator, the [`ResponseContext`].
///
/// Exchanges built with [`Exchange::new`] sit outside any decorator: they use
/// default options and do not enforce the single-response rule.
pub struct Exchange<'a> {
    sink: &'a mut dyn Sink,
    request: &'a Request<Bytes>,
    options: &'a Options,
    context: Option<ResponseContext>,
}

impl<'a> Exchange<'a> {
    /// An exchange outside any decorator.
    pub fn new(sink: &'a mut dyn Sink, request: &'a Request<Bytes>) -> Self {
        Self {
            sink,
            request,
            options: &DEFAULT_OPTIONS,
            context: None,
        }
    }

    pub(crate) fn decorated(
        sink: &'a mut dyn Sink,
        request: &'a Request<Bytes>,
        options: &'a Options,
    ) -> Self {
        Self {
            sink,
            request,
            options,
            context: Some(ResponseContext::new()),
        }
    }

    /// The request being served.
    #[must_use]
    pub const fn request(&self) -> &'a Request<Bytes> {
        self.request
    }

    /// The response sink.
    #[must_use]
    pub fn sink(&self) -> &dyn Sink {
        &*self.sink
    }

    /// The response sink, for headers the handler sets itself.
    pub fn sink_mut(&mut self) -> &mut dyn Sink {
        &mut *self.sink
    }

    /// Options of the nearest enclosing decorator.
    #[must_use]
    pub const fn options(&self) -> &'a Options {
        self.options
    }

    /// Response tracking, present under a decorator.
    #[must_use]
    pub const fn context(&self) -> Option<&ResponseContext> {
        self.context.as_ref()
    }

    /// Whether a response was already emitted on this exchange.
    #[must_use]
    pub fn responded(&self) -> bool {
        self.context.is_some_and(|context| context.responded())
    }

    pub(crate) fn parts(&mut self) -> (&mut dyn Sink, &Request<Bytes>) {
        (&mut *self.sink, self.request)
    }

    /// Emit `status` and `payload` through the hook pipeline.
    ///
    /// # Panics
    ///
    /// Panics with `response: multiple responses` when a response was already
    /// emitted on this exchange and the options do not allow several. This is
    /// a bug in the handler, not a recoverable condition; use
    /// [`Exchange::try_with`] to receive it as [`Error::MultipleResponses`].
    pub fn with(&mut self, status: StatusCode, payload: impl Into<Payload>) {
        if self.try_with(status, payload).is_err() {
            panic!("{MULTIPLE_RESPONSES}");
        }
    }

    /// Emit a status-only response.
    ///
    /// The payload comes from the options' status-data generator, or is
    /// [`StatusPayload`](crate::StatusPayload).
    ///
    /// # Panics
    ///
    /// Same contract as [`Exchange::with`].
    pub fn with_status(&mut self, status: StatusCode) {
        if self.try_with_status(status).is_err() {
            panic!("{MULTIPLE_RESPONSES}");
        }
    }

    /// Like [`Exchange::with`], returning the contract violation instead of
    /// panicking.
    ///
    /// Encode failures are never returned here; they go to the `on_err` hook.
    /// The violation is detected before the sink is touched, so a rejected
    /// call writes nothing.
    pub fn try_with(&mut self, status: StatusCode, payload: impl Into<Payload>) -> Result<()> {
        self.claim()?;
        dispatch::emit(&mut *self.sink, self.request, self.options, status, payload.into());
        Ok(())
    }

    /// Like [`Exchange::with_status`], returning the contract violation
    /// instead of panicking.
    pub fn try_with_status(&mut self, status: StatusCode) -> Result<()> {
        self.claim()?;
        let payload = dispatch::status_data(&*self.sink, self.request, self.options, status);
        dispatch::emit(&mut *self.sink, self.request, self.options, status, payload);
        Ok(())
    }

    fn claim(&mut self) -> Result<()> {
        if self.options.allow_multiple {
            return Ok(());
        }
        match &mut self.context {
            Some(context) if context.responded() => Err(Error::MultipleResponses),
            Some(context) => {
                context.mark_responded();
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Exchange<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("method", self.request.method())
            .field("uri", self.request.uri())
            .field("options", self.options)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
