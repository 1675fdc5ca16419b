//! Page metadata and placeholder lookup Trait

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::HeaderResult;

/// Placeholder texts keyed by dotted path (e.g. `Global.Search`)
pub type Placeholders = HashMap<String, String>;

/// Page metadata lookup (`<meta name=...>` values)
pub trait MetadataSource: Send + Sync {
    /// Get a metadata value
    ///
    /// # Arguments
    /// * `key` - Metadata name (e.g. `nav`, `mini-cart`)
    fn get(&self, key: &str) -> Option<String>;
}

/// Placeholder text lookup
#[async_trait]
pub trait PlaceholderSource: Send + Sync {
    async fn fetch(&self) -> HeaderResult<Placeholders>;
}

/// Fixed metadata and placeholders
///
/// Default implementation, available on all platforms.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    metadata: HashMap<String, String>,
    placeholders: Placeholders,
}

impl StaticMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.insert(key.into(), value.into());
        self
    }
}

impl MetadataSource for StaticMetadata {
    fn get(&self, key: &str) -> Option<String> {
        self.metadata
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
    }
}

#[async_trait]
impl PlaceholderSource for StaticMetadata {
    async fn fetch(&self) -> HeaderResult<Placeholders> {
        Ok(self.placeholders.clone())
    }
}
