use thiserror::Error;

/// Result status of an OPC UA operation.
///
/// The full specification defines several hundred codes; this crate only
/// carries the ones the subscription engine actually produces or consumes.
/// Unknown codes encountered on the wire (were this a full client/server)
/// would need a catch-all variant, but nothing in this engine constructs one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum StatusCode {
    #[error("Good")]
    Good,
    #[error("BadSubscriptionIdInvalid")]
    BadSubscriptionIdInvalid,
    #[error("BadMonitoredItemIdInvalid")]
    BadMonitoredItemIdInvalid,
    #[error("BadNodeAttributesInvalid")]
    BadNodeAttributesInvalid,
    #[error("BadMessageNotAvailable")]
    BadMessageNotAvailable,
    #[error("BadTooManyPublishRequests")]
    BadTooManyPublishRequests,
    #[error("BadTooManyMonitoredItems")]
    BadTooManyMonitoredItems,
}

impl StatusCode {
    pub fn is_good(self) -> bool {
        matches!(self, StatusCode::Good)
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Good
    }
}
