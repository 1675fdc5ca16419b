//! Content fragment retrieval Trait

use async_trait::async_trait;

use crate::error::HeaderResult;
use crate::types::Fragment;

/// Fetches and parses a named content fragment.
///
/// Used by nav assembly and by the mini cart's one-time loader.
#[async_trait]
pub trait FragmentLoader: Send + Sync {
    /// Load a fragment
    ///
    /// # Arguments
    /// * `path` - Site path of the fragment (e.g. `/nav`)
    async fn load(&self, path: &str) -> HeaderResult<Fragment>;
}
