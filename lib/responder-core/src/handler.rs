//! Handler trait.

use std::sync::Arc;

use crate::Exchange;

/// Application handler emitting responses through an [`Exchange`].
pub trait Handler: Send + Sync {
    /// Handle one exchange.
    fn serve(&self, exchange: &mut Exchange<'_>);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, exchange: &mut Exchange<'_>) {
        (**self).serve(exchange);
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve(&self, exchange: &mut Exchange<'_>) {
        (**self).serve(exchange);
    }
}

/// Handler built from a closure, see [`handler_fn`].
#[derive(Debug, Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Turn a closure into a [`Handler`].
///
/// # Example
///
/// ```
/// use http::StatusCode;
/// use responder_core::handler_fn;
///
/// let handler = handler_fn(|exchange| exchange.with_status(StatusCode::NO_CONTENT));
/// # let _ = handler;
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Exchange<'_>) + Send + Sync,
{
    HandlerFn { f }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut Exchange<'_>) + Send + Sync,
{
    fn serve(&self, exchange: &mut Exchange<'_>) {
        (self.f)(exchange);
    }
}
