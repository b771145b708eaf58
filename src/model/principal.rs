//! Caller identity for mutating operations.
//!
//! Roles change at runtime (vendor approval takes effect immediately), so
//! the core never caches them: every mutating call carries a `Principal`
//! freshly resolved by the identity layer.

use serde::{Deserialize, Serialize};

/// Account role as known to the identity layer at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Buyer,
    Vendor,
    Admin,
}

/// The acting account for one call: id plus current role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub account_id: String,
    pub role: Role,
}

impl Principal {
    pub fn buyer(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            role: Role::Buyer,
        }
    }

    pub fn vendor(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            role: Role::Vendor,
        }
    }

    pub fn admin(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            role: Role::Admin,
        }
    }
}
