//! The address space is an external collaborator: this crate only ever reads
//! attribute values and registers/unregisters data-change callbacks against
//! it. Treating it as a pluggable trait object, rather than a concrete struct
//! baked into the subscription engine, lets the engine be embedded in any
//! server that owns a real node tree.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use opcua_core::sync::RwLock;
use opcua_types::{AttributeId, DataValue, NodeId};

/// Invoked with `(node, attribute, value)` whenever the backing store's value
/// changes. May be called from any thread.
pub type DataChangeCallback = Box<dyn Fn(&NodeId, AttributeId, &DataValue) + Send + Sync>;

/// The entire surface this engine requires of the address space it sits in
/// front of.
pub trait AddressSpaceBackend: Send + Sync {
    /// Synchronous read. A failed lookup yields a `DataValue` carrying a bad
    /// status code, never an `Err` — this mirrors the OPC UA Read service,
    /// which never fails at the single-attribute level.
    fn read(&self, node: &NodeId, attribute: AttributeId) -> DataValue;

    /// Registers `callback` to fire on every future write to `(node, attribute)`.
    /// Returns 0 on failure; a non-zero handle must later be passed to
    /// `delete_data_change_callback`.
    fn add_data_change_callback(
        &self,
        node: &NodeId,
        attribute: AttributeId,
        callback: DataChangeCallback,
    ) -> u32;

    /// Unregisters a previously-installed callback. Idempotent: unregistering
    /// a handle twice, or one that never existed, is a no-op.
    fn delete_data_change_callback(&self, handle: u32);
}

struct Registered {
    node: NodeId,
    attribute: AttributeId,
    callback: DataChangeCallback,
}

/// Reference implementation used by this crate's own tests: a map of
/// `(NodeId, AttributeId) -> DataValue` plus a registry of callback closures
/// invoked synchronously whenever a value is written through [`Self::write`].
#[derive(Default)]
pub struct InMemoryAddressSpace {
    values: RwLock<HashMap<(NodeId, AttributeId), DataValue>>,
    callbacks: RwLock<HashMap<u32, Registered>>,
    next_handle: AtomicU32,
}

impl InMemoryAddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&self, node: &NodeId, attribute: AttributeId, value: DataValue) {
        self.values.write().insert((node.clone(), attribute), value);
    }

    /// Writes a new value and synchronously fires every callback registered
    /// against `(node, attribute)`.
    pub fn write(&self, node: &NodeId, attribute: AttributeId, value: DataValue) {
        self.set_value(node, attribute, value.clone());
        let callbacks = self.callbacks.read();
        for registered in callbacks.values() {
            if &registered.node == node && registered.attribute == attribute {
                (registered.callback)(node, attribute, &value);
            }
        }
    }
}

impl AddressSpaceBackend for InMemoryAddressSpace {
    fn read(&self, node: &NodeId, attribute: AttributeId) -> DataValue {
        self.values
            .read()
            .get(&(node.clone(), attribute))
            .cloned()
            .unwrap_or_else(|| DataValue::new_now(opcua_types::Variant::Empty))
    }

    fn add_data_change_callback(
        &self,
        node: &NodeId,
        attribute: AttributeId,
        callback: DataChangeCallback,
    ) -> u32 {
        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed) + 1;
        self.callbacks.write().insert(
            handle,
            Registered {
                node: node.clone(),
                attribute,
                callback,
            },
        );
        handle
    }

    fn delete_data_change_callback(&self, handle: u32) {
        self.callbacks.write().remove(&handle);
    }
}
