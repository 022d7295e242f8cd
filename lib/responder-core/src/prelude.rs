//! Convenient imports for writing handlers.
//!
//! ```
//! use responder_core::prelude::*;
//! ```

pub use crate::{
    Encoder, Error, Exchange, Handler, JsonEncoder, Options, Payload, ResponseWriter, Result,
    Sink, StatusCode, StatusPayload, handler_fn,
};
