//! Result of a data-changing screen operation.

/// What happened to a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The statement ran and succeeded.
    Written,
    /// Nothing was sent to the database (empty form, no selection, declined).
    Skipped,
    /// The statement was attempted and failed; the failure was already shown.
    Failed,
}

impl WriteOutcome {
    /// Returns whether the database changed.
    #[must_use]
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}
