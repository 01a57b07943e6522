use std::time::{Duration, Instant};

/// Default lifetime of a toast once shown.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(2);

/// Severity of a toast; picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// A write went through.
    Success,
    /// Something failed.
    Error,
}

/// A transient toast message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown in the popup.
    pub message: String,
    /// When the toast was queued.
    pub created_at: Instant,
    /// When the toast first became visible; the lifetime counts from here.
    pub displayed_at: Option<Instant>,
    /// How long the toast stays visible.
    pub duration: Duration,
}

impl Notification {
    /// Creates a toast with the default lifetime.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Overrides the lifetime.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast has been visible longer than its lifetime.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the lifetime clock on first display.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}
