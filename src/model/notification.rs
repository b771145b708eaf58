//! Notifications: the durable mailbox records written by checkout and the
//! fulfillment state machine, read and marked-read by dashboards.

use crate::model::ids::NotificationId;
use crate::model::principal::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    NewOrder,
    OrderStatusChange,
    VendorRequest,
    Other,
}

/// The mailbox a notification lands in: a role plus, for vendor- or
/// buyer-scoped notices, the specific account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub role: Role,
    pub account_id: Option<String>,
}

impl Recipient {
    pub fn buyer(account_id: impl Into<String>) -> Self {
        Self {
            role: Role::Buyer,
            account_id: Some(account_id.into()),
        }
    }

    pub fn vendor(account_id: impl Into<String>) -> Self {
        Self {
            role: Role::Vendor,
            account_id: Some(account_id.into()),
        }
    }

    /// The shared administrator mailbox.
    pub fn admins() -> Self {
        Self {
            role: Role::Admin,
            account_id: None,
        }
    }
}

/// A durable mailbox entry. Mutated only to flip `is_read`; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub recipient: Recipient,
    pub is_read: bool,
    /// Non-owning back-reference to the order or request that caused this
    /// notice.
    pub related_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a notification.
#[derive(Debug, Clone)]
pub struct NotificationCreate {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub recipient: Recipient,
    pub related_id: Option<String>,
}

/// Predicate selecting one recipient's mailbox.
#[derive(Debug, Clone)]
pub struct NotificationFilter {
    pub role: Role,
    pub account_id: Option<String>,
}
