//! Typed identifiers.
//!
//! Records owned by this core get `u32` newtype ids generated by their
//! actor and rendered as `order_7`-style strings. Buyer and vendor
//! identities are issued by the external identity layer and stay opaque
//! strings.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Identity of the account initiating a checkout, as issued by the
/// identity layer.
pub type BuyerId = String;

/// Identity of the account owning catalog products and fulfilling orders.
pub type VendorId = String;

/// Error returned when a string does not parse as a typed id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a valid {kind} id: {input}")]
pub struct ParseIdError {
    kind: &'static str,
    input: String,
}

/// Type-safe identifier for catalog products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

/// Type-safe identifier for orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

/// Type-safe identifier for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u32);

macro_rules! id_impls {
    ($ty:ident, $prefix:literal) => {
        impl From<u32> for $ty {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl FromStr for $ty {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix($prefix)
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .map(Self)
                    .ok_or_else(|| ParseIdError {
                        kind: $prefix.trim_end_matches('_'),
                        input: s.to_string(),
                    })
            }
        }
    };
}

id_impls!(ProductId, "product_");
id_impls!(OrderId, "order_");
id_impls!(NotificationId, "notification_");
