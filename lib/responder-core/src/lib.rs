//! Core types and traits for the responder HTTP response helpers.
//!
//! Handlers emit a status and a [`Payload`]; the dispatch functions run the
//! configured hooks, pick an [`Encoder`] and write the response into a
//! [`Sink`].
//!
//! - [`Encoder`] and [`JsonEncoder`] - Payload serialization
//! - [`Sink`] and [`ResponseWriter`] - Response-writing channel
//! - [`Exchange`] - Explicit per-exchange context passed to handlers
//! - [`ResponseContext`] - Single-response tracking
//! - [`Options`] and [`OptionsBuilder`] - Hooks and the handler decorator
//! - [`Handler`] and [`handler_fn`] - Application handlers
//! - [`Error`] and [`Result`] - Error handling
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//! use responder_core::{Options, ResponseWriter, Sink, handler_fn};
//!
//! let handler = Options::default().handler(handler_fn(|exchange| {
//!     exchange.with_status(StatusCode::IM_A_TEAPOT);
//! }));
//!
//! let request = Request::builder().uri("/tea").body(Bytes::new()).expect("request");
//! let mut writer = ResponseWriter::new();
//! handler.serve_http(&mut writer, &request);
//!
//! assert_eq!(writer.status(), StatusCode::IM_A_TEAPOT);
//! assert_eq!(writer.body_text(), "{\"status\":\"I'm a teapot\",\"code\":418}\n");
//! ```

mod context;
mod dispatch;
mod encoder;
mod error;
mod exchange;
mod handler;
mod options;
mod payload;
pub mod prelude;
mod sink;
mod status;

pub use context::ResponseContext;
pub use dispatch::{serve, with, with_status};
pub use encoder::{Encoder, JSON, JSON_CONTENT_TYPE, JsonEncoder};
pub use error::{BoxError, Error, MULTIPLE_RESPONSES, Result};
pub use exchange::Exchange;
pub use handler::{Handler, HandlerFn, handler_fn};
pub use options::{
    AfterHook, BeforeHook, Decorated, EncoderFactory, ErrorHook, Options, OptionsBuilder,
    StatusDataHook,
};
pub use payload::{Payload, SerializeJson};
pub use sink::{ResponseWriter, Sink};
pub use status::StatusPayload;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
