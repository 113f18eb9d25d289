use std::collections::HashMap;

use crate::{AttributeId, DateTimeUtc, NodeId, Variant};

/// One segment of a browse path used by a `SimpleAttributeOperand`. Real
/// browse paths are sequences of `QualifiedName`; this engine only ever
/// compares path segments by their plain text, so a `String` is enough.
pub type BrowsePath = Vec<String>;

/// A single select-clause entry: either a direct attribute read (empty
/// path) or a reference through a (possibly well-known) browse path.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleAttributeOperand {
    pub browse_path: BrowsePath,
    pub attribute_id: AttributeId,
}

impl SimpleAttributeOperand {
    pub fn attribute(attribute_id: AttributeId) -> Self {
        Self {
            browse_path: Vec::new(),
            attribute_id,
        }
    }

    pub fn browse(path: impl IntoIterator<Item = impl Into<String>>, attribute_id: AttributeId) -> Self {
        Self {
            browse_path: path.into_iter().map(Into::into).collect(),
            attribute_id,
        }
    }
}

/// An event filter. `WhereClause` evaluation is explicitly out of scope for
/// this engine (every event reaching a subscribed node is emitted); only
/// the select-clause projection is implemented.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventFilter {
    pub select_clauses: Vec<SimpleAttributeOperand>,
}

/// The projected field values for one event, in the same order as the
/// filter's select clauses. This is what actually gets queued and later
/// sent to the client inside an `EventNotificationList`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFieldList {
    pub client_handle: u32,
    pub event_fields: Vec<Variant>,
}

/// An event as raised by the address space (or a test). Carries the small
/// set of fields every event has (the "base event type" in OPC UA Part 5)
/// plus a bag of additional, type-specific properties addressable by browse
/// path for the projector's fallback case.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Opaque, client-visible identifier. Empty until the service fills it
    /// in via the event-id generator (C5).
    pub event_id: Vec<u8>,
    pub event_type: NodeId,
    pub source_node: NodeId,
    pub source_name: String,
    pub message: String,
    pub severity: u16,
    pub time: DateTimeUtc,
    pub receive_time: DateTimeUtc,
    pub local_time: Option<DateTimeUtc>,
    /// Type-specific properties, keyed by their full browse path.
    pub properties: HashMap<BrowsePath, Variant>,
}

impl Event {
    /// The value for one of the nine base-event-type fields by name, or the
    /// attribute directly requested (only `Value` makes sense for an event
    /// with an empty browse path, and resolves to the same thing `Message`
    /// would for a plain event).
    pub fn well_known_field(&self, name: &str) -> Option<Variant> {
        match name {
            "EventID" => Some(Variant::ByteString(self.event_id.clone())),
            "EventType" => Some(Variant::NodeId(Box::new(self.event_type.clone()))),
            "SourceNode" => Some(Variant::NodeId(Box::new(self.source_node.clone()))),
            "SourceName" => Some(Variant::String(self.source_name.clone())),
            "Message" => Some(Variant::String(self.message.clone())),
            "Severity" => Some(Variant::UInt32(self.severity as u32)),
            "Time" => Some(Variant::String(self.time.to_rfc3339())),
            "ReceiveTime" => Some(Variant::String(self.receive_time.to_rfc3339())),
            "LocalTime" => self
                .local_time
                .as_ref()
                .map(|t| Variant::String(t.to_rfc3339())),
            _ => None,
        }
    }

    /// The value for `clause.attribute` directly (used for an empty browse path).
    pub fn attribute_value(&self, attribute: AttributeId) -> Variant {
        match attribute {
            AttributeId::Value => Variant::String(self.message.clone()),
            _ => Variant::Empty,
        }
    }

    /// Fallback resolution for any browse path that isn't one of the nine
    /// well-known base-event-type fields: a direct lookup in `properties`.
    pub fn get_value(&self, path: &[String]) -> Variant {
        self.properties
            .get(path)
            .cloned()
            .unwrap_or(Variant::Empty)
    }
}
