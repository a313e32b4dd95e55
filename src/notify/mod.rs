//! Recording notification and foreground promotion.
//!
//! While capture is active the host process must be promoted to a
//! non-killable foreground state, anchored to a user-visible notification.
//! Presentation is the platform's job; this module only describes the
//! notification and the promotion calls.

use tracing::info;

/// Stable id of the recording notification.
pub const NOTIFICATION_ID: u32 = 99_118_822;

/// Channel the recording notification is posted on.
pub const CHANNEL_ID: &str = "notification_recording";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Low,
    Default,
    High,
}

/// Notification channel registration. Creating an existing channel is a no-op
/// on every platform that has channels, so this is safe to send every session.
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub importance: Importance,
}

impl ChannelSpec {
    pub fn recording() -> Self {
        Self {
            id: CHANNEL_ID,
            name: "Screencast Record",
            description: "Shown while a screen recording is in progress.",
            importance: Importance::Default,
        }
    }
}

/// The recording-in-progress notification.
#[derive(Debug, Clone)]
pub struct RecordingNotification {
    pub channel_id: &'static str,
    pub title: String,
    pub text: String,
    pub icon: &'static str,
    pub color: u32,
    pub importance: Importance,
}

impl RecordingNotification {
    pub fn recording() -> Self {
        Self {
            channel_id: CHANNEL_ID,
            title: "Recording screen".to_string(),
            text: "Tap the overlay to stop recording.".to_string(),
            icon: "ic_videocam",
            color: 0x00C8_53F5,
            importance: Importance::High,
        }
    }
}

/// Notification presentation and process-priority collaborator.
///
/// All calls are fire-and-forget; the service accepts eventual consistency of
/// OS-level notification state.
pub trait Notifier: Send + Sync {
    /// Register the notification channel. Idempotent.
    fn ensure_channel(&self, channel: &ChannelSpec);

    /// Post or update a notification.
    fn show(&self, id: u32, notification: &RecordingNotification);

    /// Promote the process to the foreground, anchored to the notification.
    fn promote_foreground(&self, id: u32);

    /// Drop the foreground promotion and let the process become reclaimable.
    fn demote_foreground(&self);

    /// Remove a notification.
    fn cancel(&self, id: u32);
}

/// Notifier that records every call in the service log.
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn ensure_channel(&self, channel: &ChannelSpec) {
        info!("Ensuring notification channel: {}", channel.id);
    }

    fn show(&self, id: u32, notification: &RecordingNotification) {
        info!(
            "Showing notification {} on channel {}: {}",
            id, notification.channel_id, notification.title
        );
    }

    fn promote_foreground(&self, id: u32) {
        info!("Moving process into the foreground with notification {}", id);
    }

    fn demote_foreground(&self) {
        info!("Leaving the foreground state");
    }

    fn cancel(&self, id: u32) {
        info!("Cancelling notification {}", id);
    }
}
