//! Recording notification sink for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::workboard::{
    domain::UserId,
    ports::{MentionNotification, NotificationError, NotificationResult, NotificationSink},
};

/// One delivery captured by [`RecordingNotificationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotification {
    /// Recipient.
    pub user: UserId,
    /// Delivered payload.
    pub notification: MentionNotification,
}

/// Notification sink that records every delivery for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationSink {
    deliveries: Arc<RwLock<Vec<RecordedNotification>>>,
}

impl RecordingNotificationSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the deliveries made so far.
    ///
    /// # Errors
    ///
    /// Returns a delivery error when the sink lock is poisoned.
    pub fn deliveries(&self) -> NotificationResult<Vec<RecordedNotification>> {
        let deliveries = self
            .deliveries
            .read()
            .map_err(|err| NotificationError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(deliveries.clone())
    }
}

#[async_trait]
impl NotificationSink for RecordingNotificationSink {
    async fn notify(
        &self,
        user: UserId,
        notification: MentionNotification,
    ) -> NotificationResult<()> {
        let mut deliveries = self
            .deliveries
            .write()
            .map_err(|err| NotificationError::delivery(std::io::Error::other(err.to_string())))?;
        deliveries.push(RecordedNotification { user, notification });
        Ok(())
    }
}
