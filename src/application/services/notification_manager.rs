//! Toast queue.

use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::notification::DEFAULT_TOAST_DURATION;
use crate::domain::{Notification, NotificationLevel};

/// Queue of transient toasts; the front one is visible until it expires.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl NotificationManager {
    /// Creates an empty queue whose toasts live for `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            duration,
        }
    }

    /// Queues a toast.
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification::new(level, message).with_duration(self.duration);
        self.queue.push_back(notification);
    }

    /// Queues a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Advances the queue. Returns true when the visible toast changed.
    pub fn tick(&mut self) -> bool {
        let Some(front) = self.queue.front_mut() else {
            return false;
        };
        front.mark_displayed();
        if !front.is_expired() {
            return false;
        }
        self.queue.pop_front();
        if let Some(next) = self.queue.front_mut() {
            next.mark_displayed();
        }
        true
    }

    /// The visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_toast_stays_until_expired() {
        let mut manager = NotificationManager::default();

        manager.success("Record Added");
        assert!(!manager.tick());
        assert_eq!(manager.current().unwrap().message, "Record Added");
    }

    #[test]
    fn test_expired_toast_disappears() {
        let mut manager = NotificationManager::new(Duration::from_millis(10));
        manager.success("Record Deleted");
        manager.tick();

        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(1)).unwrap());

        assert!(manager.tick());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::default();
        manager.success("First");
        manager.notify(NotificationLevel::Info, "Second");

        assert_eq!(manager.current().unwrap().message, "First");

        manager.tick();
        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        manager.tick();

        let second = manager.current().unwrap();
        assert_eq!(second.message, "Second");
        assert_eq!(second.level, NotificationLevel::Info);
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }
}
