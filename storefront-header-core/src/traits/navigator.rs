//! Page navigation Trait

use async_trait::async_trait;

use crate::error::HeaderResult;

/// Full-page navigation performed by the host
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Navigate to a URL (absolute or site-relative)
    async fn navigate(&self, url: &str) -> HeaderResult<()>;

    /// Reload the current page
    async fn reload(&self) -> HeaderResult<()>;
}
