//! Success notifications raised after a save or delete is confirmed by the server.
//!
//! Notifications are fire-and-forget: they are handed to listeners and never kept
//! in the store's state.

use serde::{Deserialize, Serialize};

use crate::model::JobId;

/// Event name notifications are emitted under.
pub const NOTIFICATION_EVENT: &str = "job.notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Created,
    Updated,
    Deleted,
}

/// A short, user-facing success message about one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub job_id: JobId,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, job_id: JobId) -> Self {
        let message = match kind {
            NotificationKind::Created => "Job created successfully!",
            NotificationKind::Updated => "Job updated successfully!",
            NotificationKind::Deleted => "Job deleted successfully!",
        };
        Self {
            kind,
            job_id,
            message: message.to_string(),
        }
    }
}

#[cfg(feature = "emitter")]
pub use emitter::Notifier;

#[cfg(feature = "emitter")]
mod emitter {
    use std::sync::{Mutex, PoisonError};

    use event_emitter_rs::EventEmitter;

    use super::{Notification, NOTIFICATION_EVENT};

    /// Fan-out of [`Notification`]s to registered listeners.
    ///
    /// Listeners run on the emitter's own threads, so they must not assume they
    /// are called before `notify` returns.
    pub struct Notifier {
        emitter: Mutex<EventEmitter>,
    }

    impl Default for Notifier {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Notifier {
        pub fn new() -> Self {
            Self {
                emitter: Mutex::new(EventEmitter::new()),
            }
        }

        /// Register a listener. Returns an id for [`Notifier::unsubscribe`].
        pub fn subscribe<F>(&self, listener: F) -> String
        where
            F: Fn(Notification) + Send + Sync + 'static,
        {
            self.emitter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on(NOTIFICATION_EVENT, listener)
        }

        /// Remove a listener. Returns true if it was registered.
        pub fn unsubscribe(&self, listener_id: &str) -> bool {
            self.emitter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove_listener(listener_id)
                .is_some()
        }

        pub fn notify(&self, notification: Notification) {
            let _handles = self
                .emitter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .emit(NOTIFICATION_EVENT, notification);
        }
    }
}
