//! Event bus abstract Trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::RwLock;

/// Cart contents changed; payload is the cart or `null`
pub const CART_DATA_TOPIC: &str = "cart/data";
/// Mini cart was opened by the user
pub const CART_VIEW_TOPIC: &str = "shopping-cart/view";

const CHANNEL_CAPACITY: usize = 16;

/// Live subscription to one topic
pub struct Subscription {
    replay: Option<Value>,
    receiver: broadcast::Receiver<Value>,
}

impl Subscription {
    #[must_use]
    pub fn new(replay: Option<Value>, receiver: broadcast::Receiver<Value>) -> Self {
        Self { replay, receiver }
    }

    /// Next payload; the replayed value of an eager subscription comes first.
    ///
    /// Returns `None` once the topic is closed.
    pub async fn next(&mut self) -> Option<Value> {
        if let Some(value) = self.replay.take() {
            return Some(value);
        }
        loop {
            match self.receiver.recv().await {
                Ok(value) => return Some(value),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("Event subscriber lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

/// Publish/subscribe bus shared with other storefront components
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Subscribe to a topic
    ///
    /// # Arguments
    /// * `topic` - Topic name
    /// * `eager` - Replay the last published payload, if any
    async fn subscribe(&self, topic: &str, eager: bool) -> Subscription;

    /// Publish a payload to every subscriber of a topic
    async fn publish(&self, topic: &str, payload: Value);
}

struct Topic {
    sender: broadcast::Sender<Value>,
    last: Option<Value>,
}

impl Topic {
    fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender, last: None }
    }
}

/// In-memory event bus
///
/// Default implementation, available on all platforms.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    topics: Arc<RwLock<HashMap<String, Topic>>>,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last payload published on a topic
    pub async fn last(&self, topic: &str) -> Option<Value> {
        self.topics
            .read()
            .await
            .get(topic)
            .and_then(|t| t.last.clone())
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn subscribe(&self, topic: &str, eager: bool) -> Subscription {
        let mut topics = self.topics.write().await;
        let entry = topics.entry(topic.to_string()).or_insert_with(Topic::new);
        let replay = if eager { entry.last.clone() } else { None };
        Subscription::new(replay, entry.sender.subscribe())
    }

    async fn publish(&self, topic: &str, payload: Value) {
        let mut topics = self.topics.write().await;
        let entry = topics.entry(topic.to_string()).or_insert_with(Topic::new);
        entry.last = Some(payload.clone());
        // No receivers is not an error: eager subscribers get the replay.
        let _ = entry.sender.send(payload);
    }
}
