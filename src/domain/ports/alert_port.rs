//! Alert sink port definition.

/// Port for user-facing error dialogs.
///
/// Implementations must show each alert once; the caller never retries.
#[cfg_attr(test, mockall::automock)]
pub trait AlertPort: Send + Sync {
    /// Queues a modal alert with a title and message.
    fn alert(&self, title: &str, message: &str);
}
