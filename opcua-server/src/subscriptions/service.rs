//! C4: the global registry of subscriptions, per-session publish-request
//! credit, and `TriggerEvent` fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;

use opcua_core::sync::RwLock;
use opcua_types::service_types::{
    CreateSubscriptionRequest, Event, MonitoredItemCreateRequest, MonitoredItemCreateResult,
    PublishRequest, PublishResult, RepublishRequest, RepublishResponse, SubscriptionData,
};
use opcua_types::{NodeId, StatusCode};

use crate::address_space::AddressSpaceBackend;
use crate::config::SubscriptionLimits;
use crate::diagnostics::SubscriptionDiagnostics;
use crate::subscriptions::subscription::{InternalSubscription, PublishCallback};
use crate::subscriptions::PublishCredit;

struct Registry {
    subscriptions: HashMap<u32, Arc<InternalSubscription>>,
    publish_request_credits: HashMap<NodeId, u32>,
    last_subscription_id: u32,
}

/// Global registry of subscriptions plus per-session publish-request credit.
/// Locks are acquired service-then-subscription, never the reverse; the one
/// exception — a subscription's tick calling back into
/// [`PublishCredit::pop_publish_request`] — only ever touches
/// `publish_request_credits`, which this struct protects with its own lock
/// acquired without the subscription's lock held, so no cycle exists.
pub struct SubscriptionService {
    registry: RwLock<Registry>,
    address_space: Arc<dyn AddressSpaceBackend>,
    limits: SubscriptionLimits,
    diagnostics: Arc<SubscriptionDiagnostics>,
    debug: bool,
}

impl SubscriptionService {
    pub fn new(address_space: Arc<dyn AddressSpaceBackend>, limits: SubscriptionLimits, debug: bool) -> Arc<Self> {
        Arc::new(Self {
            registry: RwLock::new(Registry {
                subscriptions: HashMap::new(),
                publish_request_credits: HashMap::new(),
                last_subscription_id: 0,
            }),
            address_space,
            limits,
            diagnostics: Arc::new(SubscriptionDiagnostics::default()),
            debug,
        })
    }

    pub fn diagnostics(&self) -> &SubscriptionDiagnostics {
        &self.diagnostics
    }

    pub fn create_subscription(
        self: &Arc<Self>,
        session_token: NodeId,
        request: CreateSubscriptionRequest,
        callback: PublishCallback,
    ) -> SubscriptionData {
        let subscription_id = {
            let mut registry = opcua_core::trace_write_lock!(self.registry);
            registry.last_subscription_id = registry.last_subscription_id.wrapping_add(1).max(1);
            registry.last_subscription_id
        };

        let subscription = InternalSubscription::new(
            subscription_id,
            session_token,
            request.requested_publishing_interval,
            request.requested_lifetime_count,
            request.requested_max_keep_alive_count,
            self.limits.max_queued_notifications,
            self.limits.max_monitored_items_per_sub,
            self.debug,
            Arc::clone(&self.diagnostics),
        );
        let data = subscription.data();

        {
            let mut registry = opcua_core::trace_write_lock!(self.registry);
            registry.subscriptions.insert(subscription_id, Arc::clone(&subscription));
        }

        let credit: Arc<dyn PublishCredit> = Arc::clone(self) as Arc<dyn PublishCredit>;
        subscription.start(credit, callback);

        data
    }

    pub fn delete_subscriptions(&self, ids: &[u32]) -> Vec<StatusCode> {
        ids.iter().map(|&id| self.delete_subscription(id)).collect()
    }

    fn delete_subscription(&self, id: u32) -> StatusCode {
        let subscription = {
            let mut registry = opcua_core::trace_write_lock!(self.registry);
            registry.subscriptions.remove(&id)
        };
        match subscription {
            Some(subscription) => {
                subscription.stop(&*self.address_space);
                StatusCode::Good
            }
            None => StatusCode::BadSubscriptionIdInvalid,
        }
    }

    pub fn delete_all_subscriptions(&self) {
        let ids: Vec<u32> = {
            let registry = opcua_core::trace_read_lock!(self.registry);
            registry.subscriptions.keys().copied().collect()
        };
        let _ = self.delete_subscriptions(&ids);
    }

    pub fn create_monitored_items(
        &self,
        subscription_id: u32,
        items: &[MonitoredItemCreateRequest],
    ) -> Vec<MonitoredItemCreateResult> {
        let subscription = {
            let registry = opcua_core::trace_read_lock!(self.registry);
            registry.subscriptions.get(&subscription_id).cloned()
        };
        match subscription {
            Some(subscription) => items
                .iter()
                .cloned()
                .map(|req| subscription.create_monitored_item(&*self.address_space, req))
                .collect(),
            None => vec![
                MonitoredItemCreateResult {
                    status_code: StatusCode::BadSubscriptionIdInvalid,
                    monitored_item_id: 0,
                    revised_sampling_interval: 0.0,
                    revised_queue_size: 0,
                };
                items.len()
            ],
        }
    }

    pub fn delete_monitored_items(&self, subscription_id: u32, ids: &[u32]) -> Vec<StatusCode> {
        let subscription = {
            let registry = opcua_core::trace_read_lock!(self.registry);
            registry.subscriptions.get(&subscription_id).cloned()
        };
        match subscription {
            Some(subscription) => subscription.delete_monitored_items_ids(&*self.address_space, ids),
            None => vec![StatusCode::BadSubscriptionIdInvalid; ids.len()],
        }
    }

    /// Increments the session's publish-request credit, clamped at
    /// `limits.max_publish_request_credit`. Once a session is already at the
    /// cap, this returns `Err(BadTooManyPublishRequests)` instead of
    /// silently dropping the request. Acknowledgements
    /// carried by the request are still processed regardless of whether the
    /// credit increment itself succeeds.
    pub fn publish(&self, session: &NodeId, request: PublishRequest) -> Result<(), StatusCode> {
        let credit_result = {
            let mut registry = opcua_core::trace_write_lock!(self.registry);
            let credit = registry.publish_request_credits.entry(session.clone()).or_insert(0);
            if *credit >= self.limits.max_publish_request_credit {
                Err(StatusCode::BadTooManyPublishRequests)
            } else {
                *credit += 1;
                Ok(())
            }
        };

        let subscriptions: HashMap<u32, Arc<InternalSubscription>> = {
            let registry = opcua_core::trace_read_lock!(self.registry);
            registry.subscriptions.clone()
        };
        for ack in &request.subscription_acknowledgements {
            if let Some(subscription) = subscriptions.get(&ack.subscription_id) {
                subscription.acknowledge(ack.sequence_number);
            }
        }

        self.diagnostics.inc_publish_request_count();
        if credit_result.is_err() {
            self.diagnostics.inc_rejected_publish_request_count();
        }
        credit_result
    }

    pub fn republish(&self, params: &RepublishRequest) -> RepublishResponse {
        let subscription = {
            let registry = opcua_core::trace_read_lock!(self.registry);
            registry.subscriptions.get(&params.subscription_id).cloned()
        };
        match subscription {
            Some(subscription) => subscription.republish(params),
            None => RepublishResponse {
                service_result: StatusCode::BadSubscriptionIdInvalid,
                notification_message: None,
            },
        }
    }

    /// Fan-out: delivers `event` to every subscription with a matching
    /// event-item on `node`. If `event.event_id` is empty, a fresh one is
    /// generated first (C5) so every recipient sees the same id.
    pub fn trigger_event(&self, node: &NodeId, mut event: Event) {
        if event.event_id.is_empty() {
            event.event_id = opcua_core::random::event_id();
        }
        let registry = opcua_core::trace_read_lock!(self.registry);
        for subscription in registry.subscriptions.values() {
            subscription.trigger_event(node, &event);
        }
    }
}

impl PublishCredit for SubscriptionService {
    fn pop_publish_request(&self, session: &NodeId) -> bool {
        let mut registry = opcua_core::trace_write_lock!(self.registry);
        match registry.publish_request_credits.get_mut(session) {
            Some(credit) if *credit > 0 => {
                *credit -= 1;
                true
            }
            Some(_) => {
                warn!("session {} has no publish-request credit", session);
                false
            }
            None => {
                warn!("session {} is unknown to the publish-request credit ledger", session);
                false
            }
        }
    }
}
