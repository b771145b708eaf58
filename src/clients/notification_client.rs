//! Client for the notification sink actor.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    Notification, NotificationCreate, NotificationFilter, NotificationId, Recipient, Role,
};
use crate::notification_actor::{NotificationAction, NotificationError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the notification actor.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
}

impl NotificationClient {
    pub fn new(inner: ResourceClient<Notification>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, notification))]
    pub async fn create(
        &self,
        notification: NotificationCreate,
    ) -> Result<NotificationId, NotificationError> {
        debug!(?notification, "create called");
        self.inner
            .create(notification)
            .await
            .map_err(Self::map_error)
    }

    /// Persist a batch of notices as a unit: either every notice lands in
    /// its mailbox or none does. Checkout and the state machine rely on
    /// this for their write-ahead side effects.
    #[instrument(skip(self, notifications), fields(count = notifications.len()))]
    pub async fn create_batch(
        &self,
        notifications: Vec<NotificationCreate>,
    ) -> Result<Vec<NotificationId>, NotificationError> {
        debug!("Sending request");
        self.inner
            .create_group(notifications)
            .await
            .map_err(Self::map_error)
    }

    /// Flip `is_read`; rejected unless `reader` is the notification's
    /// recipient.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        id: NotificationId,
        reader: Recipient,
    ) -> Result<(), NotificationError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, NotificationAction::MarkRead { reader })
            .await
            .map_err(Self::map_error)
    }

    /// One recipient's mailbox, newest first.
    #[instrument(skip(self))]
    pub async fn list_for(
        &self,
        role: Role,
        account_id: Option<String>,
    ) -> Result<Vec<Notification>, NotificationError> {
        debug!("Sending request");
        let mut notifications = self
            .inner
            .list(NotificationFilter { role, account_id })
            .await
            .map_err(Self::map_error)?;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        Ok(notifications)
    }
}

#[async_trait]
impl ActorClient<Notification> for NotificationClient {
    type Error = NotificationError;

    fn inner(&self) -> &ResourceClient<Notification> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> NotificationError {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<NotificationError>() {
                Ok(err) => *err,
                Err(other) => NotificationError::Unavailable(other.to_string()),
            },
            FrameworkError::NotFound(id) => NotificationError::NotFound(id),
            other => NotificationError::Unavailable(other.to_string()),
        }
    }
}
