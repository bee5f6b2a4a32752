//! In-app notification model.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Unique identifier of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// An action completed.
    Success,
    /// Neutral information.
    Info,
    /// Something needs attention.
    Warning,
    /// An action failed.
    Error,
}

/// A notification shown to the user.
///
/// Notifications are only ever appended and then flipped to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the notification was raised.
    pub time: NaiveDateTime,
    /// Whether the user has seen it.
    #[serde(default)]
    pub read: bool,
}
