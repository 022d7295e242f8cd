//! Tower middleware layers for responder services.
//!
//! These layers wrap a [`ResponderService`](crate::ResponderService) (or any
//! service producing `http::Response<Bytes>`) using Tower's `Layer` trait.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `middleware-metrics` | [`MetricsLayer`] |
//! | `middleware-full` | All middleware |
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs exchanges using `tracing`
//! - [`MetricsLayer`] - Records response metrics (counters, histograms)
//!
//! # Example
//!
//! ```ignore
//! use responder::middleware::{LoggingLayer, ServiceBuilder};
//! use responder::ResponderLayer;
//!
//! let service = ServiceBuilder::new()
//!     .layer(LoggingLayer::new())
//!     .layer(ResponderLayer::new(options))
//!     .service(handler);
//! ```

mod logging;
#[cfg(feature = "middleware-metrics")]
mod metrics;

pub use logging::{LogLevel, Logging, LoggingLayer};
#[cfg(feature = "middleware-metrics")]
pub use metrics::{Metrics, MetricsLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
