//! C2: a record of one client subscription to one (node, attribute) pair.

use opcua_types::service_types::MonitoringFilter;
use opcua_types::{AttributeId, MonitoringMode, NodeId};

#[derive(Debug, Clone)]
pub struct MonitoredItem {
    pub monitored_item_id: u32,
    pub client_handle: u32,
    pub node: NodeId,
    pub attribute: AttributeId,
    pub mode: MonitoringMode,
    /// 0 if this item is an event subscription (no address-space callback).
    pub address_space_callback_handle: u32,
    pub filter: MonitoringFilter,
    pub queue_size: u32,
}
