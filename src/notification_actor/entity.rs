//! ActorEntity implementation for [`Notification`].

use crate::framework::ActorEntity;
use crate::model::{
    Notification, NotificationCreate, NotificationFilter, NotificationId, Recipient,
};
use crate::notification_actor::NotificationError;
use async_trait::async_trait;
use chrono::Utc;

/// Custom actions on a notification.
#[derive(Debug, Clone)]
pub enum NotificationAction {
    /// Flip `is_read`. The caller must be the notification's recipient;
    /// anyone else is rejected without effect.
    MarkRead { reader: Recipient },
}

#[async_trait]
impl ActorEntity for Notification {
    type Id = NotificationId;
    type Create = NotificationCreate;
    type Update = ();
    type Action = NotificationAction;
    type ActionResult = ();
    type Filter = NotificationFilter;
    type Context = ();
    type Error = NotificationError;

    fn from_create_params(
        id: NotificationId,
        params: NotificationCreate,
    ) -> Result<Self, NotificationError> {
        if params.title.trim().is_empty() {
            return Err(NotificationError::Invalid(
                "notification title must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            kind: params.kind,
            title: params.title,
            body: params.body,
            recipient: params.recipient,
            is_read: false,
            related_id: params.related_id,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &NotificationFilter) -> bool {
        self.recipient.role == filter.role && self.recipient.account_id == filter.account_id
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: NotificationAction,
        _ctx: &(),
    ) -> Result<(), NotificationError> {
        match action {
            NotificationAction::MarkRead { reader } => {
                if reader != self.recipient {
                    return Err(NotificationError::RecipientMismatch(format!(
                        "{} is not addressed to this reader",
                        self.id
                    )));
                }
                self.is_read = true;
                Ok(())
            }
        }
    }
}
