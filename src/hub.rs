//! Per-recipient notification fan-out. Each recipient id maps to one
//! broadcast channel; every live websocket session for that recipient
//! holds a receiver. Publishing is fire-and-forget: no subscribers means
//! the event is dropped, and the REST listing remains the durable path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Default)]
pub struct NotificationHub {
    channels: Arc<Mutex<HashMap<i32, broadcast::Sender<String>>>>,
}

impl NotificationHub {
    /// Subscribe a session to a recipient's topic.
    pub fn subscribe(&self, recipient_id: i32) -> broadcast::Receiver<String> {
        let mut channels = self.channels.lock().expect("hub lock poisoned");
        channels
            .entry(recipient_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Publish a serialized notification to a recipient's topic. Best
    /// effort: a topic with no live sessions swallows the event.
    pub fn publish(&self, recipient_id: i32, payload: String) {
        let mut channels = self.channels.lock().expect("hub lock poisoned");
        if let Some(sender) = channels.get(&recipient_id) {
            if sender.send(payload).is_err() {
                // Last subscriber is gone; drop the channel.
                channels.remove(&recipient_id);
            }
        } else {
            tracing::debug!(
                topic = %devnet_service::notification::topic(recipient_id),
                "no live sessions, dropping event"
            );
        }
    }

    /// Remove the topic entry if no session is subscribed anymore. Called
    /// on every session exit so disconnects never leak channels.
    pub fn prune(&self, recipient_id: i32) {
        let mut channels = self.channels.lock().expect("hub lock poisoned");
        if let Some(sender) = channels.get(&recipient_id) {
            if sender.receiver_count() == 0 {
                channels.remove(&recipient_id);
            }
        }
    }

    #[cfg(test)]
    fn topic_count(&self) -> usize {
        self.channels.lock().expect("hub lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_subscriber() {
        let hub = NotificationHub::default();
        let mut rx = hub.subscribe(1);
        hub.publish(1, "hello".to_owned());
        assert_eq!(rx.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn topics_are_recipient_scoped() {
        let hub = NotificationHub::default();
        let mut rx_one = hub.subscribe(1);
        let mut rx_two = hub.subscribe(2);
        hub.publish(2, "for two".to_owned());
        assert_eq!(rx_two.recv().await.unwrap(), "for two");
        assert!(rx_one.try_recv().is_err());
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let hub = NotificationHub::default();
        hub.publish(7, "nobody home".to_owned());
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn prune_drops_abandoned_topics() {
        let hub = NotificationHub::default();
        let rx = hub.subscribe(3);
        assert_eq!(hub.topic_count(), 1);
        drop(rx);
        hub.prune(3);
        assert_eq!(hub.topic_count(), 0);
    }

    #[tokio::test]
    async fn fan_out_reaches_every_session() {
        let hub = NotificationHub::default();
        let mut rx_a = hub.subscribe(5);
        let mut rx_b = hub.subscribe(5);
        hub.publish(5, "event".to_owned());
        assert_eq!(rx_a.recv().await.unwrap(), "event");
        assert_eq!(rx_b.recv().await.unwrap(), "event");
    }
}
