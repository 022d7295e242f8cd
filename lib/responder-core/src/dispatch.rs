//! The response pipeline.
//!
//! `before` -> encoder resolution -> status -> content type -> encode ->
//! `on_err` -> `after`.

use bytes::Bytes;
use http::{Request, StatusCode, header};
use tracing::{debug, warn};

use crate::{Encoder, Exchange, Handler, JSON, Options, Payload, Sink, StatusPayload};

/// Serve one exchange with a handler that is not decorated.
///
/// Dispatch calls made by the handler use default options and are not
/// limited to one response.
pub fn serve<H: Handler + ?Sized>(handler: &H, sink: &mut dyn Sink, request: &Request<Bytes>) {
    let mut exchange = Exchange::new(sink, request);
    handler.serve(&mut exchange);
}

/// Emit `status` and `payload` on an exchange, see [`Exchange::with`].
///
/// # Panics
///
/// Panics with `response: multiple responses` on a second response when the
/// options do not allow several.
pub fn with(exchange: &mut Exchange<'_>, status: StatusCode, payload: impl Into<Payload>) {
    exchange.with(status, payload);
}

/// Emit a status-only response on an exchange, see [`Exchange::with_status`].
///
/// # Panics
///
/// Same contract as [`with`].
pub fn with_status(exchange: &mut Exchange<'_>, status: StatusCode) {
    exchange.with_status(status);
}

pub(crate) fn status_data(
    sink: &dyn Sink,
    request: &Request<Bytes>,
    options: &Options,
    status: StatusCode,
) -> Payload {
    match &options.status_data {
        Some(generate) => generate(sink, request, status),
        None => StatusPayload::new(status).into(),
    }
}

pub(crate) fn emit(
    sink: &mut dyn Sink,
    request: &Request<Bytes>,
    options: &Options,
    status: StatusCode,
    payload: Payload,
) {
    // `after` sees what the handler passed in, not the `before` output
    let observed = options
        .after
        .as_ref()
        .map(|after| (after, status, payload.clone()));

    let (status, payload) = match &options.before {
        Some(before) => before(&mut *sink, request, status, payload),
        None => (status, payload),
    };

    let custom;
    let encoder: &dyn Encoder = match &options.encoder {
        Some(factory) => {
            custom = factory(&*sink, request);
            custom.as_ref()
        }
        None => &JSON,
    };

    debug!(
        method = %request.method(),
        uri = %request.uri(),
        status = status.as_u16(),
        "writing response"
    );

    sink.write_status(status);
    let content_type = encoder.content_type(&*sink, request);
    sink.headers_mut().insert(header::CONTENT_TYPE, content_type);

    if let Err(err) = encoder.encode(&mut *sink, request, &payload) {
        warn!(error = %err, status = status.as_u16(), "failed to encode response");
        if let Some(on_err) = &options.on_err {
            on_err(err);
        }
    }

    if let Some((after, status, payload)) = observed {
        after(&*sink, request, status, &payload);
    }
}
