//! Request/response and notification structures for the Subscription,
//! MonitoredItem and Publish services. Field names follow the OPC UA
//! Binary specification's naming where it reads naturally in Rust.

mod event;
mod monitored_item;
mod notification;
mod publish;
mod subscription;

pub use event::{BrowsePath, Event, EventFieldList, EventFilter, SimpleAttributeOperand};
pub use monitored_item::{
    MonitoredItemCreateRequest, MonitoredItemCreateResult, MonitoringFilter,
    MonitoringParameters, ReadValueId,
};
pub use notification::{
    DataChangeNotification, EventNotificationList, MonitoredItemNotification, NotificationData,
    NotificationMessage, StatusChangeNotification,
};
pub use publish::{PublishRequest, PublishResult, RepublishRequest, RepublishResponse,
    SubscriptionAcknowledgement};
pub use subscription::{CreateSubscriptionRequest, SubscriptionData};
