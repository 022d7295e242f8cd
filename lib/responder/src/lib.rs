//! Uniform status + payload responses for HTTP handlers.
//!
//! Handlers emit a status code and a payload through an [`Exchange`]; the
//! [`Options`] decorator runs the hook pipeline around every response and a
//! pluggable [`Encoder`] serializes the payload (newline-terminated JSON by
//! default).
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use responder::{Options, Payload, StatusCode, handler_fn, service};
//!
//! let options = Options::builder()
//!     .before(|_sink, _request, status, payload| match payload.as_error() {
//!         Some(err) => (status, serde_json::json!({"error": err.to_string()}).into()),
//!         None => (status, payload),
//!     })
//!     .on_err(|err| tracing::error!(error = %err, "response encoding failed"))
//!     .build();
//!
//! let service = service(&options, handler_fn(|exchange| {
//!     match exchange.request().uri().path() {
//!         "/health" => exchange.with_status(StatusCode::OK),
//!         _ => exchange.with(StatusCode::NOT_FOUND, Payload::error("no such route")),
//!     }
//! }));
//!
//! let request = http::Request::builder().uri("/missing").body(Bytes::new()).expect("request");
//! let response = service.respond(&request);
//!
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! assert_eq!(response.body().as_ref(), b"{\"error\":\"no such route\"}\n");
//! ```
//!
//! Responding twice on one exchange is a handler bug: [`Exchange::with`]
//! panics with `response: multiple responses` unless the options allow
//! several responses. [`Exchange::try_with`] reports it as
//! [`Error::MultipleResponses`] instead.

mod layer;
pub mod middleware;
pub mod prelude;

pub use layer::{ResponderLayer, ResponderService, service};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use responder_core::{
    AfterHook, BeforeHook, BoxError, Decorated, Encoder, EncoderFactory, Error, ErrorHook,
    Exchange, Handler, HandlerFn, JSON, JSON_CONTENT_TYPE, JsonEncoder, MULTIPLE_RESPONSES,
    Options, OptionsBuilder, Payload, ResponseContext, ResponseWriter, Result, Sink,
    StatusDataHook, StatusPayload, handler_fn, serve, with, with_status,
};

// Re-export http types for status codes and headers
pub use responder_core::{StatusCode, header};
