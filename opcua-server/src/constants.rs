//! Default values for server limits. Mirrors the style of tuning knobs a
//! production server config layer would expose, trimmed to what the
//! subscription engine actually consults.

/// Hard cap on outstanding publish-request credit per session.
pub const MAX_PUBLISH_REQUEST_CREDIT: u32 = 100;

pub const DEFAULT_PUBLISHING_INTERVAL_MS: f64 = 1_000.0;
pub const MIN_PUBLISHING_INTERVAL_MS: f64 = 100.0;
pub const DEFAULT_KEEP_ALIVE_COUNT: u32 = 3;
pub const MAX_KEEP_ALIVE_COUNT: u32 = 10_000;
pub const DEFAULT_LIFETIME_COUNT: u32 = DEFAULT_KEEP_ALIVE_COUNT * 3;
pub const MAX_LIFETIME_COUNT: u32 = MAX_KEEP_ALIVE_COUNT * 3;

pub const DEFAULT_MONITORED_ITEM_CAPACITY: usize = 16;
pub const DEFAULT_MAX_MONITORED_ITEMS_PER_SUB: usize = 1_000;
pub const DEFAULT_MAX_QUEUED_NOTIFICATIONS: usize = 100;
