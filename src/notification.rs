//! Read diagnostics.
//!
//! Non-fatal issues found while reading a drawing (entity kinds that carry
//! no primitive, geometry on layers the table never declares) are collected
//! as `Notification` items instead of aborting the conversion. The
//! aggregator forwards them to `tracing` once per drawing.

use std::fmt;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// Entity or section that the vectorizer does not turn into primitives.
    NotSupported,
    /// Non-fatal inconsistency in the drawing (e.g. a dangling layer name).
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification produced during reading.
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during a read.
///
/// Repeated messages are folded into a counter so a drawing with ten
/// thousand TEXT entities yields one line, not ten thousand.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<(Notification, usize)>,
}

impl NotificationCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let message = message.into();
        if let Some((_, count)) = self
            .items
            .iter_mut()
            .find(|(n, _)| n.notification_type == notification_type && n.message == message)
        {
            *count += 1;
            return;
        }
        self.items
            .push((Notification::new(notification_type, message), 1));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// How many times a distinct notification was raised.
    pub fn occurrences(&self, message: &str) -> usize {
        self.items
            .iter()
            .filter(|(n, _)| n.message == message)
            .map(|(_, count)| count)
            .sum()
    }

    /// Iterate over distinct notifications with their repeat counts.
    pub fn iter(&self) -> impl Iterator<Item = (&Notification, usize)> {
        self.items.iter().map(|(n, count)| (n, *count))
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|(n, _)| n.notification_type == nt)
    }

    /// Emit every notification through `tracing`, tagged with the source.
    pub fn emit(&self, source: &str) {
        for (n, count) in self.iter() {
            match n.notification_type {
                NotificationType::NotSupported => {
                    tracing::debug!(source, count, "{}", n.message)
                }
                NotificationType::Warning => tracing::warn!(source, count, "{}", n.message),
            }
        }
    }
}
