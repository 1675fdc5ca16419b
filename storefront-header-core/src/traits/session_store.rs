//! Session-scoped key/value storage Trait

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::HeaderResult;

/// Session storage shared with the rest of the storefront.
///
/// No locking across read-modify-write: last writer wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a value
    ///
    /// # Arguments
    /// * `key` - Storage key
    async fn get(&self, key: &str) -> HeaderResult<Option<String>>;

    /// Set a value
    ///
    /// # Arguments
    /// * `key` - Storage key
    /// * `value` - New value
    async fn set(&self, key: &str, value: &str) -> HeaderResult<()>;
}

/// In-memory session storage
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> HeaderResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> HeaderResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
