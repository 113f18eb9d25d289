use super::EventFieldList;
use crate::{DataValue, DateTimeUtc};

/// One data-change entry within a [`DataChangeNotification`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemNotification {
    pub client_handle: u32,
    pub value: DataValue,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataChangeNotification {
    pub monitored_items: Vec<MonitoredItemNotification>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventNotificationList {
    pub events: Vec<EventFieldList>,
}

/// Reserved for forward compatibility: the data model carries this variant,
/// but this engine never constructs one (status-change emission is out of
/// scope for this engine).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChangeNotification {
    pub status: crate::StatusCode,
}

/// The tagged union of notification payloads a single publish can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationData {
    DataChange(DataChangeNotification),
    Event(EventNotificationList),
    StatusChange(StatusChangeNotification),
}

/// The notification envelope sent (and replayed) for one publish.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub sequence_id: u32,
    pub publish_time: DateTimeUtc,
    pub data: Vec<NotificationData>,
}

impl NotificationMessage {
    pub fn keep_alive(sequence_id: u32, publish_time: DateTimeUtc) -> Self {
        Self {
            sequence_id,
            publish_time,
            data: Vec::new(),
        }
    }
}
