use super::NotificationMessage;
use crate::{DateTimeUtc, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionAcknowledgement {
    pub subscription_id: u32,
    pub sequence_number: u32,
}

/// A client poll. Carries no payload of its own beyond the acknowledgements
/// it piggybacks; the credit it grants is tracked separately by
/// [`crate::StatusCode`]-returning calls on `SubscriptionService`.
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    pub subscription_acknowledgements: Vec<SubscriptionAcknowledgement>,
}

/// What a subscription hands its publish callback (and what `not_acknowledged`
/// retains for republish) each time it emits.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub subscription_id: u32,
    pub publish_time: DateTimeUtc,
    pub available_sequence_numbers: Vec<u32>,
    pub message: NotificationMessage,
    pub statuses: Vec<StatusCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepublishRequest {
    pub subscription_id: u32,
    pub retransmit_sequence_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepublishResponse {
    pub service_result: StatusCode,
    pub notification_message: Option<NotificationMessage>,
}
