//! In-process notice bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NoticeBus`] is meant to be shared via `Arc<NoticeBus>` between the
//! controllers that publish and the views that display.

use rickdex_core::types::Timestamp;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient, dismissable message for the user.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// Short headline, e.g. `"Failed to fetch episodes"`.
    pub title: String,
    pub description: String,
    pub timestamp: Timestamp,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Error notice whose description is `message`, or `fallback` when the
    /// message is blank.
    pub fn error(title: impl Into<String>, message: &str, fallback: &str) -> Self {
        let description = if message.trim().is_empty() {
            fallback
        } else {
            message
        };
        Self::new(NoticeLevel::Error, title, description)
    }
}

// ---------------------------------------------------------------------------
// NoticeBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// Fan-out channel for [`Notice`]s.
///
/// ```rust
/// use rickdex_events::{Notice, NoticeBus, NoticeLevel};
///
/// let bus = NoticeBus::default();
/// let _rx = bus.subscribe();
///
/// bus.publish(Notice::new(NoticeLevel::Info, "Hello", "world"));
/// ```
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall behind observe `RecvError::Lagged` and
    /// lose the oldest notices.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    pub fn publish(&self, notice: Notice) {
        tracing::debug!(title = %notice.title, level = ?notice.level, "Publishing notice");
        // A send error only means nobody is listening.
        let _ = self.sender.send(notice);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NoticeBus::default();
        let mut rx = bus.subscribe();

        bus.publish(Notice::error("Failed to fetch episodes", "boom", "fallback"));

        let received = rx.recv().await.expect("should receive the notice");
        assert_eq!(received.level, NoticeLevel::Error);
        assert_eq!(received.title, "Failed to fetch episodes");
        assert_eq!(received.description, "boom");
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_notice() {
        let bus = NoticeBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Notice::new(NoticeLevel::Info, "multi", ""));

        assert_eq!(rx1.recv().await.expect("subscriber 1").title, "multi");
        assert_eq!(rx2.recv().await.expect("subscriber 2").title, "multi");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NoticeBus::default();
        bus.publish(Notice::new(NoticeLevel::Info, "orphan", ""));
    }

    #[test]
    fn blank_message_uses_fallback() {
        let notice = Notice::error("title", "   ", "Please try again.");
        assert_eq!(notice.description, "Please try again.");
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_value(Notice::new(NoticeLevel::Error, "t", "d"))
            .expect("serialization should succeed");
        assert_eq!(json["level"], "error");
    }
}
