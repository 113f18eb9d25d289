//! Server-side limits the subscription engine enforces. Follows the
//! serde-default pattern used by the rest of the server's configuration: a
//! struct of `#[serde(default = "...")]` fields backed by a `defaults` module,
//! so a partial TOML/JSON config only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::constants;
use opcua_types::service_types::CreateSubscriptionRequest;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionLimits {
    /// Per-session cap on outstanding publish-request credit.
    #[serde(default = "defaults::max_publish_request_credit")]
    pub max_publish_request_credit: u32,
    /// Floor applied to a client's requested publishing interval.
    #[serde(default = "defaults::min_publishing_interval_ms")]
    pub min_publishing_interval_ms: f64,
    /// Ceiling applied to a client's requested keep-alive count.
    #[serde(default = "defaults::max_keep_alive_count")]
    pub max_keep_alive_count: u32,
    /// Ceiling applied to a client's requested lifetime count.
    #[serde(default = "defaults::max_lifetime_count")]
    pub max_lifetime_count: u32,
    /// Maximum monitored items a single subscription may hold, 0 for no limit.
    #[serde(default = "defaults::max_monitored_items_per_sub")]
    pub max_monitored_items_per_sub: usize,
    /// Maximum entries retained per queue (`data_change_queue`/`event_queue`)
    /// before the oldest is dropped, 0 for unbounded.
    #[serde(default = "defaults::max_queued_notifications")]
    pub max_queued_notifications: usize,
}

impl SubscriptionLimits {
    /// A `CreateSubscriptionRequest` using this engine's own suggested
    /// defaults, for a caller assembling one from scratch (e.g. a server
    /// exposing a "create subscription with defaults" convenience) rather
    /// than echoing values already parsed off the wire.
    pub fn default_subscription_request(&self) -> CreateSubscriptionRequest {
        CreateSubscriptionRequest {
            requested_publishing_interval: constants::DEFAULT_PUBLISHING_INTERVAL_MS,
            requested_lifetime_count: constants::DEFAULT_LIFETIME_COUNT,
            requested_max_keep_alive_count: constants::DEFAULT_KEEP_ALIVE_COUNT,
            priority: 0,
        }
    }

    /// Revises a client's requested subscription parameters against these
    /// limits: the publishing interval is floored, the keep-alive and
    /// lifetime counts are ceilinged. `SubscriptionService::create_subscription`
    /// never calls this on its own — by default requested values pass
    /// through unchanged — this is the explicit, opt-in revision step a
    /// caller applies first if it wants clamped behavior instead.
    pub fn clamp(&self, mut request: CreateSubscriptionRequest) -> CreateSubscriptionRequest {
        request.requested_publishing_interval = request
            .requested_publishing_interval
            .max(self.min_publishing_interval_ms);
        request.requested_max_keep_alive_count =
            request.requested_max_keep_alive_count.min(self.max_keep_alive_count);
        request.requested_lifetime_count = request.requested_lifetime_count.min(self.max_lifetime_count);
        request
    }
}

impl Default for SubscriptionLimits {
    fn default() -> Self {
        Self {
            max_publish_request_credit: defaults::max_publish_request_credit(),
            min_publishing_interval_ms: defaults::min_publishing_interval_ms(),
            max_keep_alive_count: defaults::max_keep_alive_count(),
            max_lifetime_count: defaults::max_lifetime_count(),
            max_monitored_items_per_sub: defaults::max_monitored_items_per_sub(),
            max_queued_notifications: defaults::max_queued_notifications(),
        }
    }
}

mod defaults {
    use crate::constants;

    pub fn max_publish_request_credit() -> u32 {
        constants::MAX_PUBLISH_REQUEST_CREDIT
    }
    pub fn min_publishing_interval_ms() -> f64 {
        constants::MIN_PUBLISHING_INTERVAL_MS
    }
    pub fn max_keep_alive_count() -> u32 {
        constants::MAX_KEEP_ALIVE_COUNT
    }
    pub fn max_lifetime_count() -> u32 {
        constants::MAX_LIFETIME_COUNT
    }
    pub fn max_monitored_items_per_sub() -> usize {
        constants::DEFAULT_MAX_MONITORED_ITEMS_PER_SUB
    }
    pub fn max_queued_notifications() -> usize {
        constants::DEFAULT_MAX_QUEUED_NOTIFICATIONS
    }
}
