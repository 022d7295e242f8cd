//! Error types for responder.

use derive_more::{Display, Error, From};

/// Boxed error type used by custom encoders and host bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fixed diagnostic carried by the multiple-responses contract violation.
pub const MULTIPLE_RESPONSES: &str = "response: multiple responses";

/// Main error type for responder operations.
///
/// [`Error::MultipleResponses`] is not a runtime condition: it means the
/// handler emitted a second response on an exchange that only allows one.
/// Hosts receiving it from [`crate::Exchange::try_with`] must abort the
/// exchange instead of retrying or rendering it.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// The sink rejected a write.
    #[display("write error: {_0}")]
    #[from]
    Io(std::io::Error),

    /// A custom encoder failed.
    #[display("encode error: {_0}")]
    #[from(skip)]
    Encode(#[error(not(source))] BoxError),

    /// Reading the request body failed.
    #[display("body error: {_0}")]
    #[from(skip)]
    Body(#[error(not(source))] BoxError),

    /// A response was already emitted on this exchange.
    #[display("response: multiple responses")]
    #[from(skip)]
    MultipleResponses,
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a custom encoder failure.
    #[must_use]
    pub fn encode(error: impl Into<BoxError>) -> Self {
        Self::Encode(error.into())
    }

    /// Wrap a request body failure.
    #[must_use]
    pub fn body(error: impl Into<BoxError>) -> Self {
        Self::Body(error.into())
    }

    /// Returns `true` for the fatal multiple-responses contract violation.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MultipleResponses)
    }

    /// Returns the wrapped error of a custom encoder failure.
    #[must_use]
    pub fn encode_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Encode(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}
