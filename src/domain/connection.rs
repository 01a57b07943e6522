/// State of the single database connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No connection has been opened, or it was closed.
    #[default]
    Disconnected,
    /// Initial connection in progress.
    Connecting,
    /// Connection open and usable.
    Connected,
    /// The connection dropped and one reconnect is in progress.
    Reconnecting,
    /// The last connect or reconnect attempt failed.
    Error,
}

impl ConnectionStatus {
    /// Whether statements can be issued.
    #[must_use]
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::Connected)
    }
}
