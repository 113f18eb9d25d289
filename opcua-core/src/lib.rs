//! Shared locking and random-id helpers used across the subscription engine.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod handle;
pub mod random;

/// Common synchronous locks. The engine locks in one order only (service,
/// then subscription; see `opcua-server::subscriptions::service`) so a
/// `parking_lot::RwLock` is enough, no deadlock detection required, but
/// `trace_read_lock!`/`trace_write_lock!` below still help when a lock site
/// is suspected of holding too long across a callback.
pub mod sync {
    pub type RwLock<T> = parking_lot::RwLock<T>;
    pub type Mutex<T> = parking_lot::Mutex<T>;
}

/// Check the `OPCUA_TRACE_LOCKS` environment variable. When set to anything
/// other than "0", `trace_read_lock!`/`trace_write_lock!` log at `trace!`
/// before and after acquiring their lock. Useful when hunting a lock held
/// across a callback invocation, which would violate the "callbacks run
/// outside locks" rule.
pub fn trace_locks() -> bool {
    static ENABLED: AtomicBool = AtomicBool::new(false);
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let enabled = std::env::var("OPCUA_TRACE_LOCKS")
            .map(|v| v != "0")
            .unwrap_or(false);
        ENABLED.store(enabled, Ordering::Relaxed);
    });
    ENABLED.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! trace_read_lock {
    ( $x:expr ) => {{
        if $crate::trace_locks() {
            log::trace!(
                "{:?}, {} read locking at {}:{}",
                std::thread::current().id(),
                stringify!($x),
                file!(),
                line!()
            );
        }
        let v = $x.read();
        if $crate::trace_locks() {
            log::trace!("{:?}, {} read lock acquired", std::thread::current().id(), stringify!($x));
        }
        v
    }};
}

#[macro_export]
macro_rules! trace_write_lock {
    ( $x:expr ) => {{
        if $crate::trace_locks() {
            log::trace!(
                "{:?}, {} write locking at {}:{}",
                std::thread::current().id(),
                stringify!($x),
                file!(),
                line!()
            );
        }
        let v = $x.write();
        if $crate::trace_locks() {
            log::trace!("{:?}, {} write lock acquired", std::thread::current().id(), stringify!($x));
        }
        v
    }};
}
