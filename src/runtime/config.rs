//! Runtime configuration.

use std::time::Duration;

/// Tunables for the order system.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Capacity of each actor's request channel.
    pub channel_capacity: usize,
    /// Bound on each external step of checkout (catalog resolution, the
    /// group commit).
    pub checkout_timeout: Duration,
    /// Shared secret the payment gateway signs callbacks with.
    pub gateway_secret: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            checkout_timeout: Duration::from_secs(5),
            gateway_secret: "insecure-dev-secret".to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads configuration from the environment, falling back to defaults:
    ///
    /// - `ORDER_DESK_CHANNEL_CAPACITY`
    /// - `ORDER_DESK_CHECKOUT_TIMEOUT_MS`
    /// - `ORDER_DESK_GATEWAY_SECRET`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let channel_capacity = std::env::var("ORDER_DESK_CHANNEL_CAPACITY")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.channel_capacity);
        let checkout_timeout = std::env::var("ORDER_DESK_CHECKOUT_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.checkout_timeout);
        let gateway_secret =
            std::env::var("ORDER_DESK_GATEWAY_SECRET").unwrap_or(defaults.gateway_secret);
        Self {
            channel_capacity,
            checkout_timeout,
            gateway_secret,
        }
    }
}
