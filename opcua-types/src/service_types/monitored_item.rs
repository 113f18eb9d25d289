use crate::service_types::EventFilter;
use crate::{AttributeId, MonitoringMode, NodeId, StatusCode};

/// Identifies the node/attribute pair a monitored item samples.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadValueId {
    pub node_id: NodeId,
    pub attribute_id: AttributeId,
}

/// The filter attached to a monitored item. Data-change items carry no
/// filter in this engine (deadband filtering is out of scope); event items
/// carry the select-clause list the event-field projector (C1) consumes.
/// `WhereClause` evaluation is not modeled: every event reaching a
/// subscribed node is considered a match.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitoringFilter {
    None,
    Event(EventFilter),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitoringParameters {
    pub client_handle: u32,
    pub sampling_interval: f64,
    pub queue_size: u32,
    pub discard_oldest: bool,
    pub filter: MonitoringFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemCreateRequest {
    pub item_to_monitor: ReadValueId,
    pub monitoring_mode: MonitoringMode,
    pub requested_parameters: MonitoringParameters,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredItemCreateResult {
    pub status_code: StatusCode,
    pub monitored_item_id: u32,
    pub revised_sampling_interval: f64,
    pub revised_queue_size: u32,
}
