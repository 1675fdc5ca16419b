//! Remote component rendering Trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::HeaderResult;

/// Handle to a mounted component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHandle {
    /// Host-assigned mount ID
    pub id: String,
    /// Component name
    pub component: String,
}

/// Mounts remote UI components into header regions
#[async_trait]
pub trait ComponentRenderer: Send + Sync {
    /// Render a component
    ///
    /// # Arguments
    /// * `target` - Region to mount into (e.g. `search-bar-result`)
    /// * `component` - Component name (e.g. `SearchResults`)
    /// * `props` - Component props
    async fn render(
        &self,
        target: &str,
        component: &str,
        props: serde_json::Value,
    ) -> HeaderResult<ComponentHandle>;
}
