//! Per-exchange response tracking.

/// Records whether a response was already emitted on one exchange.
///
/// The decorator creates one per exchange; it never outlives the
/// [`Exchange`](crate::Exchange) that owns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseContext {
    responded: bool,
}

impl ResponseContext {
    /// A context with no response emitted yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { responded: false }
    }

    /// Whether a response was emitted.
    #[must_use]
    pub const fn responded(&self) -> bool {
        self.responded
    }

    /// Mark the exchange as responded.
    pub const fn mark_responded(&mut self) {
        self.responded = true;
    }
}
