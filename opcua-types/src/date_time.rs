/// Timestamps throughout this engine are UTC, matching how the rest of the
/// server family represents `DateTime`.
pub type DateTimeUtc = chrono::DateTime<chrono::Utc>;
