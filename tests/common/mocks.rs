use casos_iso::view::{Notification, NotificationKind, Notifier};
use std::sync::{Arc, Mutex};

/// Notifier that keeps every notification for later assertions
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.all().into_iter().map(|n| n.kind).collect()
    }

    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
