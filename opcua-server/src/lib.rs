//! The subscription and monitored-item engine: the part of an OPC UA server
//! responsible for maintaining client-requested live views over an address
//! space, accumulating notifications, and delivering them in response to
//! client publish polls.
//!
//! This crate treats the address space, the wire codec, and session/channel
//! authentication as external collaborators (see [`address_space`]); it owns
//! only the subscription/monitored-item state machine itself.

pub mod address_space;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod subscriptions;

pub use subscriptions::{InternalSubscription, MonitoredItem, SubscriptionService};

#[cfg(any(test, feature = "console-logging"))]
pub fn init_console_logger() {
    use std::sync::Once;
    static START: Once = Once::new();
    START.call_once(|| {
        let _ = env_logger::try_init();
    });
}
