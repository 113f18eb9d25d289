//! Counters tracking subscription/monitored-item churn and publish activity.
//! Exposed for a server's own diagnostics address-space nodes to sample; this
//! crate does not map them onto any particular `NodeId` itself.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct SubscriptionDiagnostics {
    cumulated_subscription_count: AtomicU64,
    current_subscription_count: AtomicU64,
    cumulated_monitored_item_count: AtomicU64,
    current_monitored_item_count: AtomicU64,
    publish_request_count: AtomicU64,
    publish_count: AtomicU64,
    keep_alive_count: AtomicU64,
    republish_count: AtomicU64,
    rejected_publish_request_count: AtomicU64,
}

impl SubscriptionDiagnostics {
    pub fn inc_subscription_count(&self) {
        self.cumulated_subscription_count.fetch_add(1, Ordering::Relaxed);
        self.current_subscription_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec_subscription_count(&self) {
        self.current_subscription_count.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn inc_monitored_item_count(&self, by: u64) {
        self.cumulated_monitored_item_count.fetch_add(by, Ordering::Relaxed);
        self.current_monitored_item_count.fetch_add(by, Ordering::Relaxed);
    }

    pub fn dec_monitored_item_count(&self, by: u64) {
        self.current_monitored_item_count.fetch_sub(by, Ordering::Relaxed);
    }

    pub fn inc_publish_request_count(&self) {
        self.publish_request_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected_publish_request_count(&self) {
        self.rejected_publish_request_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_publish_count(&self) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_keep_alive_count(&self) {
        self.keep_alive_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_republish_count(&self) {
        self.republish_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn current_subscription_count(&self) -> u64 {
        self.current_subscription_count.load(Ordering::Relaxed)
    }

    pub fn current_monitored_item_count(&self) -> u64 {
        self.current_monitored_item_count.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> SubscriptionDiagnosticsSummary {
        SubscriptionDiagnosticsSummary {
            cumulated_subscription_count: self.cumulated_subscription_count.load(Ordering::Relaxed),
            current_subscription_count: self.current_subscription_count.load(Ordering::Relaxed),
            cumulated_monitored_item_count: self.cumulated_monitored_item_count.load(Ordering::Relaxed),
            current_monitored_item_count: self.current_monitored_item_count.load(Ordering::Relaxed),
            publish_request_count: self.publish_request_count.load(Ordering::Relaxed),
            publish_count: self.publish_count.load(Ordering::Relaxed),
            keep_alive_count: self.keep_alive_count.load(Ordering::Relaxed),
            republish_count: self.republish_count.load(Ordering::Relaxed),
            rejected_publish_request_count: self.rejected_publish_request_count.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of [`SubscriptionDiagnostics`], cheap to clone and log.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct SubscriptionDiagnosticsSummary {
    pub cumulated_subscription_count: u64,
    pub current_subscription_count: u64,
    pub cumulated_monitored_item_count: u64,
    pub current_monitored_item_count: u64,
    pub publish_request_count: u64,
    pub publish_count: u64,
    pub keep_alive_count: u64,
    pub republish_count: u64,
    pub rejected_publish_request_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_count_tracks_both_cumulative_and_current() {
        let diagnostics = SubscriptionDiagnostics::default();
        diagnostics.inc_subscription_count();
        diagnostics.inc_subscription_count();
        diagnostics.dec_subscription_count();

        assert_eq!(diagnostics.current_subscription_count(), 1);
        let summary = diagnostics.summary();
        assert_eq!(summary.cumulated_subscription_count, 2);
        assert_eq!(summary.current_subscription_count, 1);
    }

    #[test]
    fn monitored_item_count_tracks_both_cumulative_and_current() {
        let diagnostics = SubscriptionDiagnostics::default();
        diagnostics.inc_monitored_item_count(3);
        diagnostics.dec_monitored_item_count(1);

        assert_eq!(diagnostics.current_monitored_item_count(), 2);
        assert_eq!(diagnostics.summary().cumulated_monitored_item_count, 3);
    }

    #[test]
    fn publish_keep_alive_republish_and_rejection_counters_are_independent() {
        let diagnostics = SubscriptionDiagnostics::default();
        diagnostics.inc_publish_count();
        diagnostics.inc_publish_count();
        diagnostics.inc_keep_alive_count();
        diagnostics.inc_republish_count();
        diagnostics.inc_publish_request_count();
        diagnostics.inc_rejected_publish_request_count();

        let summary = diagnostics.summary();
        assert_eq!(summary.publish_count, 2);
        assert_eq!(summary.keep_alive_count, 1);
        assert_eq!(summary.republish_count, 1);
        assert_eq!(summary.publish_request_count, 1);
        assert_eq!(summary.rejected_publish_request_count, 1);
    }
}
