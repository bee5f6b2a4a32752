//! Notification commands.

use chrono::NaiveDateTime;

use crate::models::{Notification, NotificationId, NotificationKind};

use super::state::{HrState, next_id};

impl HrState {
    /// Prepends an unread notification and returns its id.
    pub fn notify(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: NaiveDateTime,
    ) -> NotificationId {
        let id = NotificationId(next_id(self.notifications.iter().map(|n| n.id.0)));
        self.notifications.insert(
            0,
            Notification {
                id,
                kind,
                title: title.into(),
                message: message.into(),
                time: now,
                read: false,
            },
        );
        id
    }

    /// Marks one notification read. Returns false if no such notification exists.
    pub fn mark_notification_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Marks every notification read, returning how many were unread.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut flipped = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            flipped += 1;
        }
        flipped
    }

    /// Number of unread notifications.
    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}
