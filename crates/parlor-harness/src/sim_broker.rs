//! In-memory broker simulation.
//!
//! Topic-exact publish/subscribe with per-client mailboxes. Deliveries
//! include the publisher's own echo when it is subscribed, matching broker
//! behavior. A publish log is kept for test assertions.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex},
};

use parlor_app::LinkDelivery;

/// In-memory pub/sub broker shared by simulated clients.
///
/// Clones share the same broker. Uses `lock().expect()`, which panics if
/// the mutex is poisoned - acceptable for test/simulation code.
#[derive(Clone, Default)]
pub struct SimBroker {
    inner: Arc<Mutex<SimBrokerInner>>,
}

#[derive(Default)]
struct SimBrokerInner {
    /// Pending deliveries per attached client.
    mailboxes: HashMap<String, VecDeque<LinkDelivery>>,

    /// Subscribed client IDs per topic.
    subscriptions: HashMap<String, HashSet<String>>,

    /// Every publish in order, for assertions.
    log: Vec<(String, Vec<u8>)>,
}

impl SimBroker {
    /// Create a new empty broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a client: create its mailbox and deliver the accept ack.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn attach(&self, client_id: &str) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        let mailbox = inner.mailboxes.entry(client_id.to_string()).or_default();
        mailbox.push_back(LinkDelivery::ConnAck { code: 0 });
    }

    /// Detach a client, dropping its mailbox and subscriptions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn detach(&self, client_id: &str) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        inner.mailboxes.remove(client_id);
        for subscribers in inner.subscriptions.values_mut() {
            subscribers.remove(client_id);
        }
    }

    /// Subscribe a client to a topic. Idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn subscribe(&self, client_id: &str, topic: &str) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        inner
            .subscriptions
            .entry(topic.to_string())
            .or_default()
            .insert(client_id.to_string());
    }

    /// Unsubscribe a client from a topic. Idempotent.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn unsubscribe(&self, client_id: &str, topic: &str) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        if let Some(subscribers) = inner.subscriptions.get_mut(topic) {
            subscribers.remove(client_id);
        }
    }

    /// Publish a payload: every subscriber's mailbox gets a copy, the
    /// publisher's included when it is subscribed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn publish(&self, topic: &str, payload: &[u8]) {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        inner.log.push((topic.to_string(), payload.to_vec()));

        let subscribers: Vec<String> = inner
            .subscriptions
            .get(topic)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        for client_id in subscribers {
            if let Some(mailbox) = inner.mailboxes.get_mut(&client_id) {
                mailbox.push_back(LinkDelivery::Message {
                    topic: topic.to_string(),
                    payload: payload.to_vec(),
                });
            }
        }
    }

    /// Pop the next pending delivery for a client.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn drain(&self, client_id: &str) -> Option<LinkDelivery> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");
        inner.mailboxes.get_mut(client_id)?.pop_front()
    }

    /// Whether a client has pending deliveries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn has_pending(&self, client_id: &str) -> bool {
        let inner = self.inner.lock().expect("Mutex poisoned");
        inner.mailboxes.get(client_id).is_some_and(|mailbox| !mailbox.is_empty())
    }

    /// Client IDs currently subscribed to a topic, for assertions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn subscribers(&self, topic: &str) -> Vec<String> {
        let inner = self.inner.lock().expect("Mutex poisoned");
        let mut subscribers: Vec<String> = inner
            .subscriptions
            .get(topic)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        subscribers.sort_unstable();
        subscribers
    }

    /// Every publish so far, in order, for assertions.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. Acceptable for test code.
    #[allow(clippy::expect_used)]
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.inner.lock().expect("Mutex poisoned").log.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_echoes_to_the_subscribed_publisher() {
        let broker = SimBroker::new();
        broker.attach("alice");
        broker.subscribe("alice", "parlor/lobby");

        broker.publish("parlor/lobby", b"hi");

        // ConnAck first, then the echo.
        assert!(matches!(broker.drain("alice"), Some(LinkDelivery::ConnAck { code: 0 })));
        assert!(matches!(
            broker.drain("alice"),
            Some(LinkDelivery::Message { topic, .. }) if topic == "parlor/lobby"
        ));
    }

    #[test]
    fn unsubscribed_clients_miss_deliveries() {
        let broker = SimBroker::new();
        broker.attach("alice");
        broker.subscribe("alice", "parlor/lobby");
        broker.unsubscribe("alice", "parlor/lobby");

        broker.publish("parlor/lobby", b"hi");

        let _ack = broker.drain("alice");
        assert!(broker.drain("alice").is_none());
    }

    #[test]
    fn topics_are_exact_matches() {
        let broker = SimBroker::new();
        broker.attach("alice");
        broker.subscribe("alice", "parlor/lobby");

        broker.publish("parlor/den", b"hi");

        let _ack = broker.drain("alice");
        assert!(!broker.has_pending("alice"));
    }
}
