//! C1: projects an event through an `EventFilter`'s select clauses into the
//! ordered field list a client actually receives.

use opcua_types::service_types::{Event, EventFilter};
use opcua_types::Variant;

const WELL_KNOWN_FIELDS: &[&str] = &[
    "EventID",
    "EventType",
    "SourceNode",
    "SourceName",
    "Message",
    "Severity",
    "LocalTime",
    "ReceiveTime",
    "Time",
];

/// Produces one value per select clause, in clause order. `WhereClause`
/// evaluation is not performed here or anywhere in this engine: every event
/// reaching a subscribed node is projected and emitted.
pub fn project(filter: &EventFilter, event: &Event) -> Vec<Variant> {
    filter
        .select_clauses
        .iter()
        .map(|clause| {
            if clause.browse_path.is_empty() {
                return event.attribute_value(clause.attribute_id);
            }
            let head = clause.browse_path[0].as_str();
            if WELL_KNOWN_FIELDS.contains(&head) {
                event.well_known_field(head).unwrap_or(Variant::Empty)
            } else {
                event.get_value(&clause.browse_path)
            }
        })
        .collect()
}
