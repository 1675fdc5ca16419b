//! One-time loaders for the cart and search panels

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::error::{HeaderError, HeaderResult};
use crate::services::HeaderContext;
use crate::traits::{ComponentHandle, PanelLoader, Placeholders};
use crate::types::{FragmentNode, PageLocation};
use crate::utils::links::{product_link, root_link};

/// Metadata key overriding the mini cart fragment path
pub const MINI_CART_META: &str = "mini-cart";
/// Region the search results component mounts into
pub const SEARCH_RESULTS_TARGET: &str = "search-bar-result";
/// Region the search input component mounts into
pub const SEARCH_FORM_TARGET: &str = "search-bar-form";
/// Placeholder key of the search input's placeholder text
pub const SEARCH_PLACEHOLDER_KEY: &str = "Global.Search";
/// Placeholder key of the "view all results" button label
pub const SEARCH_VIEW_ALL_KEY: &str = "Global.SearchViewAll";
/// Product fields the results component substitutes into `productRoute`
const PRODUCT_ROUTE_FIELDS: (&str, &str) = ("{urlKey}", "{sku}");

/// Content mounted into a panel by its loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountedContent {
    Fragment(FragmentNode),
    Component(ComponentHandle),
}

/// Shared mount point of a panel
pub type PanelMount = Arc<RwLock<Vec<MountedContent>>>;

/// Resolve a fragment path from metadata, falling back to a default
pub(crate) fn metadata_path(
    ctx: &HeaderContext,
    location: &PageLocation,
    key: &str,
    default: &str,
) -> String {
    match ctx.metadata().get(key) {
        Some(reference) => location.resolve_path(&reference).unwrap_or_else(|e| {
            log::warn!("Ignoring `{key}` metadata: {e}");
            default.to_string()
        }),
        None => default.to_string(),
    }
}

/// Fetches the mini cart fragment and mounts its first block
pub struct MiniCartLoader {
    ctx: Arc<HeaderContext>,
    location: PageLocation,
    mount: PanelMount,
}

impl MiniCartLoader {
    #[must_use]
    pub fn new(ctx: Arc<HeaderContext>, location: PageLocation, mount: PanelMount) -> Self {
        Self {
            ctx,
            location,
            mount,
        }
    }
}

#[async_trait]
impl PanelLoader for MiniCartLoader {
    async fn load(&self) -> HeaderResult<()> {
        let path = metadata_path(
            &self.ctx,
            &self.location,
            MINI_CART_META,
            &self.ctx.config().mini_cart_path,
        );
        let fragment = self.ctx.fragment_loader().load(&path).await?;
        let block = fragment
            .blocks
            .into_iter()
            .next()
            .ok_or_else(|| {
                HeaderError::MissingAnchor(format!("mini cart fragment {path} is empty"))
            })?;

        self.mount.write().await.push(MountedContent::Fragment(block));
        log::info!("Mini cart loaded from {path}");
        Ok(())
    }
}

/// Renders the search results popover and the search input
pub struct SearchPanelLoader {
    ctx: Arc<HeaderContext>,
    labels: Placeholders,
    mount: PanelMount,
}

impl SearchPanelLoader {
    #[must_use]
    pub fn new(ctx: Arc<HeaderContext>, labels: Placeholders, mount: PanelMount) -> Self {
        Self { ctx, labels, mount }
    }
}

#[async_trait]
impl PanelLoader for SearchPanelLoader {
    async fn load(&self) -> HeaderResult<()> {
        let config = self.ctx.config();
        let renderer = self.ctx.component_renderer();

        let (url_key, sku) = PRODUCT_ROUTE_FIELDS;
        let results_props = json!({
            "skeletonCount": config.search_page_size,
            "scope": "popover",
            "viewAllLabel": self.labels.get(SEARCH_VIEW_ALL_KEY),
            "viewAllHref": root_link(&config.root_prefix, "/search"),
            "productRoute": product_link(&config.root_prefix, url_key, sku),
        });
        let input_props = json!({
            "name": "search",
            "placeholder": self.labels.get(SEARCH_PLACEHOLDER_KEY),
        });

        let (results, input) = futures::try_join!(
            renderer.render(SEARCH_RESULTS_TARGET, "SearchResults", results_props),
            renderer.render(SEARCH_FORM_TARGET, "Input", input_props),
        )?;

        let mut mount = self.mount.write().await;
        mount.push(MountedContent::Component(results));
        mount.push(MountedContent::Component(input));
        log::info!("Search panel components mounted");
        Ok(())
    }
}
