use crate::{DateTimeUtc, StatusCode, Variant};

/// A value together with its status and timestamps, as returned from a
/// `Read` and carried in every data-change notification.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataValue {
    pub value: Option<Variant>,
    pub status: Option<StatusCode>,
    pub source_timestamp: Option<DateTimeUtc>,
    pub server_timestamp: Option<DateTimeUtc>,
}

impl DataValue {
    pub fn new_now(value: impl Into<Variant>) -> Self {
        let now = chrono::Utc::now();
        Self {
            value: Some(value.into()),
            status: Some(StatusCode::Good),
            source_timestamp: Some(now),
            server_timestamp: Some(now),
        }
    }

    pub fn new_at(value: impl Into<Variant>, timestamp: DateTimeUtc) -> Self {
        Self {
            value: Some(value.into()),
            status: Some(StatusCode::Good),
            source_timestamp: Some(timestamp),
            server_timestamp: Some(timestamp),
        }
    }
}
