//! Convenient imports for responder.
//!
//! ```
//! use responder::prelude::*;
//! ```

pub use crate::middleware::{Layer, LoggingLayer, ServiceBuilder};
pub use crate::{
    Encoder, Error, Exchange, Handler, Options, Payload, ResponderLayer, ResponderService,
    Result, Sink, StatusCode, handler_fn, service,
};
