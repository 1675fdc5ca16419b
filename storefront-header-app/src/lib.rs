//! Platform-agnostic bootstrap for the storefront site header.
//!
//! Provides `HeaderApp` (assembled header plus its background tasks),
//! `HeaderAppBuilder` (adapter injection), and `HeaderHooks` (callbacks for
//! collaborators that extend the header once it is built).

use std::sync::Arc;

use storefront_header_core::config::HeaderConfig;
use storefront_header_core::error::{HeaderError, HeaderResult};
use storefront_header_core::services::{Header, HeaderContext, RegionSwitchService};
use storefront_header_core::traits::{
    ComponentRenderer, EventBus, FragmentLoader, InMemoryEventBus, InMemorySessionStore,
    MetadataSource, Navigator, PlaceholderSource, SessionStore, StaticMetadata, CART_DATA_TOPIC,
};
use storefront_header_core::types::PageLocation;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;

/// Collaborator hooks for the startup sequence.
///
/// Auth and other widgets implement this to mount themselves into the nav
/// (`Header::append_to_nav_sections`) and keep a handle for
/// `Header::close_navigation`. Use `NoopHeaderHooks` if nothing needs to hook in.
#[async_trait::async_trait]
pub trait HeaderHooks: Send + Sync {
    /// Called once the header is assembled and its cart listener is running.
    async fn on_assembled(&self, _header: &Arc<Header>) {}

    /// Called when assembly fails; the header is not rendered.
    async fn on_assembly_failed(&self, _error: &HeaderError) {}
}

/// No-op hooks for hosts without header collaborators.
pub struct NoopHeaderHooks;

#[async_trait::async_trait]
impl HeaderHooks for NoopHeaderHooks {}

/// Platform-agnostic header application.
///
/// Every host constructs this once per page via `HeaderAppBuilder`.
pub struct HeaderApp {
    /// Header context (holds all collaborator adapters)
    pub ctx: Arc<HeaderContext>,
    /// Country selector service
    pub region_switch: RegionSwitchService,
    location: PageLocation,
    initial_width: u32,
    header: OnceCell<Arc<Header>>,
    cart_listener: Mutex<Option<JoinHandle<()>>>,
}

impl HeaderApp {
    /// Run the startup sequence: assemble → cart listener → hooks.
    ///
    /// Calling it again returns the already assembled header.
    pub async fn run_startup(&self, hooks: &dyn HeaderHooks) -> HeaderResult<Arc<Header>> {
        if let Some(header) = self.header.get() {
            return Ok(Arc::clone(header));
        }

        let header = match Header::assemble(
            Arc::clone(&self.ctx),
            self.location.clone(),
            self.initial_width,
        )
        .await
        {
            Ok(header) => Arc::new(header),
            Err(e) => {
                log::error!("Failed to assemble header: {e}");
                hooks.on_assembly_failed(&e).await;
                return Err(e);
            }
        };
        let header = Arc::clone(self.header.get_or_init(|| async { header }).await);

        self.start_cart_listener(&header).await;
        hooks.on_assembled(&header).await;
        log::info!("Header ready");
        Ok(header)
    }

    /// Subscribe eagerly to cart data so a cart published before startup is
    /// picked up immediately.
    async fn start_cart_listener(&self, header: &Arc<Header>) {
        let mut listener = self.cart_listener.lock().await;
        if listener.is_some() {
            return;
        }
        let subscription = self.ctx.event_bus().subscribe(CART_DATA_TOPIC, true).await;
        let header = Arc::clone(header);
        *listener = Some(tokio::spawn(async move {
            header.follow_cart_events(subscription).await;
        }));
    }

    /// Assembled header, once startup succeeded
    #[must_use]
    pub fn header(&self) -> Option<&Arc<Header>> {
        self.header.get()
    }

    /// Stop background tasks
    pub async fn shutdown(&self) {
        if let Some(handle) = self.cart_listener.lock().await.take() {
            handle.abort();
            log::debug!("Cart listener stopped");
        }
    }
}

/// Builder for constructing `HeaderApp` with platform-specific adapters.
///
/// # Required adapters
/// - `fragment_loader` - how content fragments are fetched
/// - `component_renderer` - how remote components are mounted
/// - `navigator` - how the page navigates
/// - `location` - the current page URL
///
/// # Optional
/// - `config` - defaults to `HeaderConfig::default()`
/// - `metadata` / `placeholders` - default to an empty `StaticMetadata`
/// - `event_bus` - defaults to `InMemoryEventBus`
/// - `session_store` - defaults to `InMemorySessionStore`
/// - `viewport_width` - defaults to the breakpoint (wide layout)
pub struct HeaderAppBuilder {
    config: Option<HeaderConfig>,
    fragment_loader: Option<Arc<dyn FragmentLoader>>,
    component_renderer: Option<Arc<dyn ComponentRenderer>>,
    metadata: Option<Arc<dyn MetadataSource>>,
    placeholders: Option<Arc<dyn PlaceholderSource>>,
    event_bus: Option<Arc<dyn EventBus>>,
    session_store: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    location: Option<PageLocation>,
    viewport_width: Option<u32>,
}

impl HeaderAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            fragment_loader: None,
            component_renderer: None,
            metadata: None,
            placeholders: None,
            event_bus: None,
            session_store: None,
            navigator: None,
            location: None,
            viewport_width: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: HeaderConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn fragment_loader(mut self, loader: Arc<dyn FragmentLoader>) -> Self {
        self.fragment_loader = Some(loader);
        self
    }

    #[must_use]
    pub fn component_renderer(mut self, renderer: Arc<dyn ComponentRenderer>) -> Self {
        self.component_renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn metadata(mut self, metadata: Arc<dyn MetadataSource>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    #[must_use]
    pub fn placeholders(mut self, placeholders: Arc<dyn PlaceholderSource>) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    #[must_use]
    pub fn event_bus(mut self, bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(bus);
        self
    }

    #[must_use]
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    #[must_use]
    pub fn location(mut self, location: PageLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn viewport_width(mut self, width_px: u32) -> Self {
        self.viewport_width = Some(width_px);
        self
    }

    /// Build the `HeaderApp`.
    ///
    /// # Errors
    /// Returns `HeaderError::Validation` if required adapters are missing or
    /// the config is unusable.
    pub fn build(self) -> HeaderResult<HeaderApp> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let fragment_loader = self.fragment_loader.ok_or_else(|| {
            HeaderError::Validation("fragment_loader is required".to_string())
        })?;
        let component_renderer = self.component_renderer.ok_or_else(|| {
            HeaderError::Validation("component_renderer is required".to_string())
        })?;
        let navigator = self
            .navigator
            .ok_or_else(|| HeaderError::Validation("navigator is required".to_string()))?;
        let location = self
            .location
            .ok_or_else(|| HeaderError::Validation("location is required".to_string()))?;

        let metadata = self
            .metadata
            .unwrap_or_else(|| Arc::new(StaticMetadata::new()));
        let placeholders = self
            .placeholders
            .unwrap_or_else(|| Arc::new(StaticMetadata::new()));
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| Arc::new(InMemoryEventBus::new()));
        let session_store = self
            .session_store
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let initial_width = self.viewport_width.unwrap_or(config.breakpoint_px);

        let ctx = Arc::new(HeaderContext::new(
            config,
            fragment_loader,
            component_renderer,
            metadata,
            placeholders,
            event_bus,
            session_store,
            navigator,
        ));
        let region_switch = RegionSwitchService::new(Arc::clone(&ctx));

        Ok(HeaderApp {
            ctx,
            region_switch,
            location,
            initial_width,
            header: OnceCell::new(),
            cart_listener: Mutex::new(None),
        })
    }
}

impl Default for HeaderAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
