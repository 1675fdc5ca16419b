//! Header behaviour services

mod header;
mod loading_coordinator;
mod nav_expansion;
mod panel_loaders;
mod panel_store;
mod region_switch;
mod viewport_oracle;

pub use header::{EventResponse, Header, NAV_META, WISHLIST_META};
pub use loading_coordinator::LoadingCoordinator;
pub use nav_expansion::{
    NavEffect, NavEvent, NavExpansionController, CLOSE_NAVIGATION_LABEL, OPEN_NAVIGATION_LABEL,
};
pub use panel_loaders::{
    MiniCartLoader, MountedContent, PanelMount, SearchPanelLoader, MINI_CART_META,
    SEARCH_FORM_TARGET, SEARCH_PLACEHOLDER_KEY, SEARCH_RESULTS_TARGET,
};
pub use panel_store::PanelVisibilityStore;
pub use region_switch::{
    rewrite_locale_url, RegionSwitchOutcome, RegionSwitchService, CONFIG_KEY, COUNTRY_CODE_KEY,
    EXPIRY_KEY,
};
pub use viewport_oracle::ViewportOracle;

use std::sync::Arc;

use crate::config::HeaderConfig;
use crate::traits::{
    ComponentRenderer, EventBus, FragmentLoader, MetadataSource, Navigator, PlaceholderSource,
    SessionStore,
};

/// Header context - holds configuration and every collaborator
///
/// The platform layer creates this context and injects its own adapters.
pub struct HeaderContext {
    config: HeaderConfig,
    fragment_loader: Arc<dyn FragmentLoader>,
    component_renderer: Arc<dyn ComponentRenderer>,
    metadata: Arc<dyn MetadataSource>,
    placeholders: Arc<dyn PlaceholderSource>,
    event_bus: Arc<dyn EventBus>,
    session_store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl HeaderContext {
    /// Create the header context
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: HeaderConfig,
        fragment_loader: Arc<dyn FragmentLoader>,
        component_renderer: Arc<dyn ComponentRenderer>,
        metadata: Arc<dyn MetadataSource>,
        placeholders: Arc<dyn PlaceholderSource>,
        event_bus: Arc<dyn EventBus>,
        session_store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            fragment_loader,
            component_renderer,
            metadata,
            placeholders,
            event_bus,
            session_store,
            navigator,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    #[must_use]
    pub fn fragment_loader(&self) -> &Arc<dyn FragmentLoader> {
        &self.fragment_loader
    }

    #[must_use]
    pub fn component_renderer(&self) -> &Arc<dyn ComponentRenderer> {
        &self.component_renderer
    }

    #[must_use]
    pub fn metadata(&self) -> &Arc<dyn MetadataSource> {
        &self.metadata
    }

    #[must_use]
    pub fn placeholders(&self) -> &Arc<dyn PlaceholderSource> {
        &self.placeholders
    }

    #[must_use]
    pub fn event_bus(&self) -> &Arc<dyn EventBus> {
        &self.event_bus
    }

    #[must_use]
    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }
}
