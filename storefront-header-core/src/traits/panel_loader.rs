//! One-time panel initialization Trait

use async_trait::async_trait;

use crate::error::HeaderResult;

/// Expensive one-time initialization of a panel.
///
/// The loading coordinator guarantees `load` is called at most once per panel.
#[async_trait]
pub trait PanelLoader: Send + Sync {
    async fn load(&self) -> HeaderResult<()>;
}
