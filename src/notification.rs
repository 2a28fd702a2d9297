use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// A transient, user-visible status message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Queues notifications until the host is ready to display them.
#[derive(Clone, Debug, Default)]
pub struct Inbox(Arc<Mutex<VecDeque<Notification>>>);

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        let Self(queue) = self;
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        let Self(queue) = self;
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Notifier for Inbox {
    fn notify(&self, notification: Notification) {
        let Self(queue) = self;
        queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notification)
    }
}
