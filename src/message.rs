//! Session message log shown to the user.

use parking_lot::Mutex;

/// Append-only list of status messages, created once per session and shared
/// by `Arc` between the services and views that write to it.
#[derive(Debug, Default)]
pub struct MessageService {
    messages: Mutex<Vec<String>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, message: impl Into<String>) {
        self.messages.lock().push(message.into());
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    /// Snapshot in insertion order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}
