use crate::NodeId;

/// Parameters of a `CreateSubscription` call. Mirrors the client's
/// requested values; the engine's revision policy (identity, or clamped
/// against server limits) lives in `opcua-server`, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSubscriptionRequest {
    pub requested_publishing_interval: f64,
    pub requested_lifetime_count: u32,
    pub requested_max_keep_alive_count: u32,
    pub priority: u8,
}

/// The server-assigned, immutable-after-creation facts about a subscription.
/// Returned from `create_subscription` and echoed in diagnostics.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SubscriptionData {
    pub subscription_id: u32,
    pub revised_publishing_interval: f64,
    pub revised_lifetime_count: u32,
    pub revised_max_keep_alive_count: u32,
    pub session_token: NodeId,
}
