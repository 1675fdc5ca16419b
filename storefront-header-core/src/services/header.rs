//! Header assembly and event routing

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::HeaderResult;
use crate::services::panel_loaders::metadata_path;
use crate::services::{
    HeaderContext, LoadingCoordinator, MiniCartLoader, NavEvent, NavExpansionController,
    PanelMount, SearchPanelLoader, ViewportOracle,
};
use crate::traits::{Placeholders, Subscription, CART_VIEW_TOPIC};
use crate::types::{
    CartData, FocusTarget, FragmentNode, HeaderEvent, HeaderProjection, NavSection,
    PageLocation, PanelId, PanelProjection, SearchQuery, SubmenuItem, VisibilityTransition,
};
use crate::utils::links::{root_link, search_link};

/// Metadata key overriding the nav fragment path
pub const NAV_META: &str = "nav";
/// Metadata key overriding the wishlist page path
pub const WISHLIST_META: &str = "wishlist";

/// Host-facing result of one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Element the host should focus
    pub focus: Option<FocusTarget>,
    /// Panel transitions the event caused
    pub panels: Vec<VisibilityTransition>,
}

impl EventResponse {
    fn focus(focus: Option<FocusTarget>) -> Self {
        Self {
            focus,
            panels: Vec::new(),
        }
    }
}

/// Assembled site header
///
/// Owns the nav controller, the panel coordinator and the viewport oracle.
/// The DOM is produced by [`Header::render`].
pub struct Header {
    ctx: Arc<HeaderContext>,
    location: PageLocation,
    viewport: ViewportOracle,
    nav: Mutex<NavExpansionController>,
    coordinator: LoadingCoordinator,
    cart_mount: PanelMount,
    search_mount: PanelMount,
    brand: Option<FragmentNode>,
    tools: Option<FragmentNode>,
    cart_badge: Mutex<Option<u32>>,
    cart_button_hidden: bool,
    nav_extensions: Mutex<Vec<FragmentNode>>,
}

impl Header {
    /// Fetch the nav fragment and build the header.
    ///
    /// # Arguments
    /// * `ctx` - Header context
    /// * `location` - Current page
    /// * `width_px` - Initial viewport width
    pub async fn assemble(
        ctx: Arc<HeaderContext>,
        location: PageLocation,
        width_px: u32,
    ) -> HeaderResult<Self> {
        let config = ctx.config();
        let nav_path = metadata_path(&ctx, &location, NAV_META, &config.nav_path);
        let fragment = ctx.fragment_loader().load(&nav_path).await?;

        let mut blocks = fragment.blocks.into_iter();
        let brand = blocks.next();
        let sections = blocks
            .next()
            .map(|block| parse_sections(&block))
            .unwrap_or_default();
        let tools = blocks.next();
        log::info!("Nav assembled from {nav_path}: {} sections", sections.len());

        let labels = match ctx.placeholders().fetch().await {
            Ok(labels) => labels,
            Err(e) => {
                e.log("Failed to fetch placeholders");
                Placeholders::new()
            }
        };

        let cart_button_hidden = config
            .excluded_cart_paths
            .iter()
            .any(|path| path == location.path());

        let viewport = ViewportOracle::new(width_px, config.breakpoint_px);
        let nav = NavExpansionController::new(sections, viewport.mode());

        let cart_mount = PanelMount::default();
        let search_mount = PanelMount::default();
        let cart_loader = Arc::new(MiniCartLoader::new(
            Arc::clone(&ctx),
            location.clone(),
            Arc::clone(&cart_mount),
        ));
        let search_loader = Arc::new(SearchPanelLoader::new(
            Arc::clone(&ctx),
            labels,
            Arc::clone(&search_mount),
        ));
        let coordinator = LoadingCoordinator::new()
            .with_loader(PanelId::Cart, cart_loader)
            .with_loader(PanelId::Search, search_loader);

        Ok(Self {
            ctx,
            location,
            viewport,
            nav: Mutex::new(nav),
            coordinator,
            cart_mount,
            search_mount,
            brand,
            tools,
            cart_badge: Mutex::new(None),
            cart_button_hidden,
            nav_extensions: Mutex::new(Vec::new()),
        })
    }

    /// Route one input event
    pub async fn handle_event(&self, event: HeaderEvent) -> HeaderResult<EventResponse> {
        match event {
            HeaderEvent::MouseEnterSection { index } => {
                self.nav_event(NavEvent::MouseEnter(index)).await
            }
            HeaderEvent::MouseLeaveNav => self.nav_event(NavEvent::MouseLeaveNav).await,
            HeaderEvent::SectionClick {
                index,
                target_is_link,
            } => {
                self.nav_event(NavEvent::SectionClick {
                    index,
                    target_is_link,
                })
                .await
            }
            HeaderEvent::KeyDown { key, focused } => {
                self.nav_event(NavEvent::KeyDown { key, focused }).await
            }
            HeaderEvent::FocusOutNav => self.nav_event(NavEvent::FocusOutNav).await,
            HeaderEvent::HamburgerClick => self.nav_event(NavEvent::HamburgerClick).await,
            HeaderEvent::ViewportResized { width } => {
                if self.viewport.set_width(width) {
                    self.nav.lock().await.sync_mode(self.viewport.mode());
                }
                Ok(EventResponse::default())
            }
            HeaderEvent::CartButtonClick => self.toggle_cart().await,
            HeaderEvent::SearchButtonClick => self.toggle_search().await,
            HeaderEvent::WishlistButtonClick => {
                let config = self.ctx.config();
                let path =
                    metadata_path(&self.ctx, &self.location, WISHLIST_META, &config.wishlist_path);
                self.ctx
                    .navigator()
                    .navigate(&root_link(&config.root_prefix, &path))
                    .await?;
                Ok(EventResponse::default())
            }
            HeaderEvent::DocumentClick { target } => {
                let mut response = EventResponse::default();
                for panel in self.coordinator.panels_to_close(&target).await {
                    log::debug!("Closing {panel} panel on outside click");
                    response
                        .panels
                        .push(self.coordinator.request_visibility(panel, Some(false)).await);
                }
                Ok(response)
            }
            HeaderEvent::SearchSubmit { query } => {
                let query = query.trim();
                if !query.is_empty() {
                    let url = search_link(&self.ctx.config().root_prefix, query);
                    self.ctx.navigator().navigate(&url).await?;
                }
                Ok(EventResponse::default())
            }
        }
    }

    async fn nav_event(&self, event: NavEvent) -> HeaderResult<EventResponse> {
        let mode = self.viewport.mode();
        let effect = self.nav.lock().await.handle(event, mode)?;
        Ok(EventResponse::focus(effect.focus))
    }

    async fn toggle_cart(&self) -> HeaderResult<EventResponse> {
        let show = !self.coordinator.state(PanelId::Cart).await.visible;
        let transition = self
            .coordinator
            .request_visibility(PanelId::Cart, Some(show))
            .await;
        if show && transition.visible {
            self.ctx.event_bus().publish(CART_VIEW_TOPIC, Value::Null).await;
        }
        Ok(EventResponse {
            focus: None,
            panels: vec![transition],
        })
    }

    async fn toggle_search(&self) -> HeaderResult<EventResponse> {
        self.nav_event(NavEvent::SearchButtonClick).await?;
        let show = !self.coordinator.state(PanelId::Search).await.visible;
        let transition = self
            .coordinator
            .request_visibility(PanelId::Search, Some(show))
            .await;
        Ok(EventResponse {
            focus: show.then_some(FocusTarget::SearchInput),
            panels: vec![transition],
        })
    }

    /// Cart data changed; `None` means there is no cart.
    ///
    /// The mini cart prewarm runs in the background, so the badge follows
    /// every payload even while the fragment is still loading.
    pub async fn on_cart_data(&self, data: Option<CartData>) {
        *self.cart_badge.lock().await = data.as_ref().and_then(CartData::badge_count);
        if data.is_some() && self.coordinator.prewarm(PanelId::Cart).await.is_some() {
            log::debug!("Mini cart prewarm started");
        }
    }

    /// Consume `cart/data` payloads until the topic closes
    pub async fn follow_cart_events(&self, mut subscription: Subscription) {
        while let Some(payload) = subscription.next().await {
            let data = if payload.is_null() {
                None
            } else {
                match serde_json::from_value::<CartData>(payload) {
                    Ok(data) => Some(data),
                    Err(e) => {
                        log::warn!("Ignoring malformed cart payload: {e}");
                        continue;
                    }
                }
            };
            self.on_cart_data(data).await;
        }
        log::debug!("Cart event subscription closed");
    }

    /// Map the search input value to a popover query
    #[must_use]
    pub fn search_query(&self, phrase: &str) -> Option<SearchQuery> {
        let config = self.ctx.config();
        SearchQuery::from_phrase(
            phrase,
            config.search_min_phrase_len,
            config.search_page_size,
        )
    }

    /// Close the narrow-layout menu; no-op in the wide layout
    pub async fn close_navigation(&self) {
        let mode = self.viewport.mode();
        if let Err(e) = self.nav.lock().await.handle(NavEvent::CloseNavigation, mode) {
            e.log("Failed to close navigation");
        }
    }

    /// Append a collaborator element (e.g. the auth widget) to the nav sections region
    pub async fn append_to_nav_sections(&self, node: FragmentNode) {
        self.nav_extensions.lock().await.push(node);
    }

    /// Current nav sections
    pub async fn nav_sections(&self) -> Vec<NavSection> {
        self.nav.lock().await.sections().to_vec()
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportOracle {
        &self.viewport
    }

    #[must_use]
    pub fn brand(&self) -> Option<&FragmentNode> {
        self.brand.as_ref()
    }

    #[must_use]
    pub fn tools(&self) -> Option<&FragmentNode> {
        self.tools.as_ref()
    }

    /// Toggle the auto-close override of a panel
    pub async fn set_suppress_auto_close(&self, panel: PanelId, suppress: bool) {
        self.coordinator.set_suppress_auto_close(panel, suppress).await;
    }

    /// Attribute snapshot of the whole header
    pub async fn render(&self) -> HeaderProjection {
        let mut panels = Vec::with_capacity(PanelId::ALL.len());
        for panel in PanelId::ALL {
            let state = self.coordinator.state(panel).await;
            let mounted = match panel {
                PanelId::Cart => self.cart_mount.read().await.len(),
                PanelId::Search => self.search_mount.read().await.len(),
            };
            panels.push(PanelProjection {
                panel,
                shown: state.visible,
                busy: state.is_busy(),
                mounted,
            });
        }

        let cart_badge = *self.cart_badge.lock().await;
        let nav_extensions = self.nav_extensions.lock().await.len();
        let nav = self.nav.lock().await;
        HeaderProjection {
            nav_expanded: nav.menu_open(),
            nav_wrapper_active: nav.menu_open(),
            hamburger_label: nav.hamburger_label().to_string(),
            overlay_shown: nav.overlay_visible(),
            body_scroll_locked: nav.body_scroll_locked(),
            sections: nav.project_sections(),
            panels,
            cart_badge,
            cart_button_hidden: self.cart_button_hidden,
            nav_extensions,
        }
    }
}

/// Nav sections from `.default-content-wrapper > ul > li`
fn parse_sections(block: &FragmentNode) -> Vec<NavSection> {
    let wrapper = if block.has_class("default-content-wrapper") {
        Some(block)
    } else {
        block.find(&|node| node.has_class("default-content-wrapper"))
    };
    let Some(list) = wrapper.and_then(|w| w.children_with_tag("ul").next()) else {
        log::warn!("Nav sections block has no list");
        return Vec::new();
    };

    list.children_with_tag("li").map(parse_section).collect()
}

fn parse_section(item: &FragmentNode) -> NavSection {
    let mut label = item.text.clone().unwrap_or_default();
    for child in item.children.iter().filter(|c| c.tag != "ul") {
        label.push_str(&child.text_content());
    }
    let label = label.trim().to_string();

    match item.children_with_tag("ul").next() {
        Some(sublist) => {
            let items = sublist
                .children_with_tag("li")
                .map(|entry| SubmenuItem {
                    label: entry.text_content(),
                    href: entry
                        .find_tag("a")
                        .and_then(|a| a.href.clone())
                        .or_else(|| entry.href.clone()),
                })
                .collect();
            NavSection::with_submenu(label, items)
        }
        None => NavSection::new(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeaderConfig;
    use crate::error::HeaderError;
    use crate::test_utils::{
        build_context, mini_cart_fragment, nav_fragment, test_context, wait_until,
        FailingPlaceholders, TestContext,
    };
    use crate::traits::StaticMetadata;
    use crate::types::{ClickRegion, ClickTarget, Key, LoadOutcome, SUBMENU_BACK_LABEL};
    use serde_json::json;
    use tokio::sync::broadcast;
    use tokio::task::JoinHandle;

    const WIDE: u32 = 1200;
    const NARROW: u32 = 600;

    async fn header_at(href: &str, width: u32) -> (Header, TestContext) {
        let test = test_context(StaticMetadata::new().with_placeholder("Global.Search", "Search"));
        test.fragments.insert("/nav", nav_fragment()).await;
        test.fragments.insert("/mini-cart", mini_cart_fragment()).await;
        let location = PageLocation::parse(href).unwrap();
        let header = Header::assemble(Arc::clone(&test.ctx), location, width)
            .await
            .unwrap();
        (header, test)
    }

    async fn build_header(width: u32) -> (Header, TestContext) {
        header_at("https://shop.example.com/en/women", width).await
    }

    fn click_elsewhere(in_header: bool) -> HeaderEvent {
        HeaderEvent::DocumentClick {
            target: ClickTarget::new(ClickRegion::Elsewhere, in_header),
        }
    }

    /// Wait for the mini cart load to finish
    async fn wait_for_cart(header: &Header) {
        wait_until(move || async move {
            let view = header.render().await;
            view.panel(PanelId::Cart)
                .is_some_and(|cart| cart.mounted == 1 && !cart.busy)
        })
        .await;
    }

    fn spawn_event(header: &Arc<Header>, event: HeaderEvent) -> JoinHandle<EventResponse> {
        let header = Arc::clone(header);
        tokio::spawn(async move { header.handle_event(event).await.unwrap() })
    }

    async fn mini_cart_fetches(test: &TestContext) -> usize {
        test.fragments
            .requested()
            .await
            .iter()
            .filter(|p| *p == "/mini-cart")
            .count()
    }

    #[tokio::test]
    async fn assembles_sections_from_nav_fragment() {
        let (header, test) = build_header(WIDE).await;

        let sections = header.nav_sections().await;
        let labels: Vec<_> = sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Women", "Men", "Sale"]);

        let women = sections[0].submenu.as_ref().unwrap();
        assert_eq!(women.title, "Women");
        assert_eq!(women.back_label, SUBMENU_BACK_LABEL);
        assert_eq!(women.items.len(), 2);
        assert_eq!(women.items[1].label, "Shoes");
        assert_eq!(women.items[1].href.as_deref(), Some("/women/shoes"));
        assert!(sections[1].has_submenu());
        assert!(!sections[2].has_submenu());

        assert!(header.brand().is_some());
        assert!(header.tools().is_some());
        assert_eq!(test.fragments.requested().await, vec!["/nav".to_string()]);
    }

    #[tokio::test]
    async fn nav_metadata_overrides_fragment_path() {
        let test = test_context(StaticMetadata::new().with_meta("nav", "/fragments/nav-en"));
        test.fragments.insert("/fragments/nav-en", nav_fragment()).await;
        let location = PageLocation::parse("https://shop.example.com/en/").unwrap();

        let header = Header::assemble(Arc::clone(&test.ctx), location, WIDE)
            .await
            .unwrap();
        assert_eq!(header.nav_sections().await.len(), 3);
    }

    #[tokio::test]
    async fn missing_nav_fragment_fails_assembly() {
        let test = test_context(StaticMetadata::new());
        let location = PageLocation::parse("https://shop.example.com/").unwrap();

        let result = Header::assemble(Arc::clone(&test.ctx), location, WIDE).await;
        assert!(matches!(result, Err(HeaderError::FragmentLoad { .. })));
    }

    #[tokio::test]
    async fn placeholder_failure_falls_back_to_empty_labels() {
        let test = build_context(
            HeaderConfig::default(),
            StaticMetadata::new(),
            Arc::new(FailingPlaceholders),
        );
        test.fragments.insert("/nav", nav_fragment()).await;
        let location = PageLocation::parse("https://shop.example.com/").unwrap();
        let header = Header::assemble(Arc::clone(&test.ctx), location, WIDE)
            .await
            .unwrap();

        header
            .handle_event(HeaderEvent::SearchButtonClick)
            .await
            .unwrap();
        let renders = test.renderer.renders().await;
        let input = renders.iter().find(|r| r.component == "Input").unwrap();
        assert!(input.props["placeholder"].is_null());
    }

    #[tokio::test]
    async fn hover_moves_expansion_between_sections() {
        let (header, _test) = build_header(WIDE).await;

        header
            .handle_event(HeaderEvent::MouseEnterSection { index: 0 })
            .await
            .unwrap();
        let view = header.render().await;
        assert!(view.sections[0].aria_expanded);
        assert!(view.overlay_shown);

        header
            .handle_event(HeaderEvent::MouseEnterSection { index: 1 })
            .await
            .unwrap();
        let view = header.render().await;
        assert!(!view.sections[0].aria_expanded);
        assert!(view.sections[1].aria_expanded);
        assert!(view.overlay_shown);

        header
            .handle_event(HeaderEvent::MouseLeaveNav)
            .await
            .unwrap();
        let view = header.render().await;
        assert!(view.sections.iter().all(|s| !s.aria_expanded));
        assert!(!view.overlay_shown);
    }

    #[tokio::test]
    async fn cart_toggles_reuse_single_load() {
        let (header, test) = build_header(WIDE).await;

        let first = header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();
        assert!(first.panels[0].visible);
        assert_eq!(first.panels[0].load, Some(LoadOutcome::Loaded));

        header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();
        header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();

        let view = header.render().await;
        let cart = view.panel(PanelId::Cart).unwrap();
        assert!(cart.shown);
        assert!(!cart.busy);
        assert_eq!(cart.mounted, 1);
        assert_eq!(mini_cart_fetches(&test).await, 1);
    }

    #[tokio::test]
    async fn cart_shows_busy_while_loading() {
        let (header, test) = build_header(WIDE).await;
        let header = Arc::new(header);
        let gate = test.fragments.gate("/mini-cart").await;

        let click = spawn_event(&header, HeaderEvent::CartButtonClick);
        gate.wait_started().await;

        let view = header.render().await;
        let cart = view.panel(PanelId::Cart).unwrap();
        assert!(cart.busy);
        assert!(!cart.shown);
        assert_eq!(cart.mounted, 0);

        gate.release();
        assert!(click.await.unwrap().panels[0].visible);
        let view = header.render().await;
        let cart = view.panel(PanelId::Cart).unwrap();
        assert!(!cart.busy);
        assert!(cart.shown);
        assert_eq!(cart.mounted, 1);
    }

    #[tokio::test]
    async fn outside_click_during_cart_load_keeps_cart_closed() {
        let (header, test) = build_header(WIDE).await;
        let header = Arc::new(header);
        let gate = test.fragments.gate("/mini-cart").await;

        let click = spawn_event(&header, HeaderEvent::CartButtonClick);
        gate.wait_started().await;

        let response = header.handle_event(click_elsewhere(false)).await.unwrap();
        let cart = response
            .panels
            .iter()
            .find(|t| t.panel == PanelId::Cart)
            .unwrap();
        assert!(cart.deferred);

        gate.release();
        assert!(!click.await.unwrap().panels[0].visible);

        let view = header.render().await;
        let cart = view.panel(PanelId::Cart).unwrap();
        assert!(!cart.shown);
        assert!(!cart.busy);
        assert_eq!(cart.mounted, 1);
        // The show never took effect, so no view event either.
        assert_eq!(test.bus.last(CART_VIEW_TOPIC).await, None);
    }

    #[tokio::test]
    async fn cart_clicks_during_load_apply_last_intent() {
        let (header, test) = build_header(WIDE).await;
        let header = Arc::new(header);
        let gate = test.fragments.gate("/mini-cart").await;

        // Show, then close by clicking elsewhere, then show again, all mid-load.
        let first = spawn_event(&header, HeaderEvent::CartButtonClick);
        gate.wait_started().await;
        let hide = header.handle_event(click_elsewhere(false)).await.unwrap();
        let queued = hide.panels.iter().find(|t| t.panel == PanelId::Cart).unwrap();
        assert!(queued.deferred);
        let again = header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();
        assert!(again.panels[0].deferred);
        assert!(!header.render().await.panel(PanelId::Cart).unwrap().shown);

        gate.release();
        let first = first.await.unwrap();
        assert!(first.panels[0].visible);
        assert_eq!(first.panels[0].load, Some(LoadOutcome::Loaded));

        let view = header.render().await;
        let cart = view.panel(PanelId::Cart).unwrap();
        assert!(cart.shown);
        assert!(!cart.busy);
        assert_eq!(header.coordinator.state(PanelId::Cart).await.pending_intent, None);
        assert_eq!(mini_cart_fetches(&test).await, 1);
        assert_eq!(test.bus.last(CART_VIEW_TOPIC).await, Some(Value::Null));
    }

    #[tokio::test]
    async fn cart_show_publishes_view_event() {
        let (header, test) = build_header(WIDE).await;
        assert_eq!(test.bus.last(CART_VIEW_TOPIC).await, None);

        header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();
        assert_eq!(test.bus.last(CART_VIEW_TOPIC).await, Some(Value::Null));
    }

    #[tokio::test]
    async fn cart_button_hidden_on_checkout() {
        let (header, _test) = header_at("https://shop.example.com/checkout", WIDE).await;
        assert!(header.render().await.cart_button_hidden);

        let (header, _test) = build_header(WIDE).await;
        assert!(!header.render().await.cart_button_hidden);
    }

    #[tokio::test]
    async fn cart_data_sets_badge_and_prewarms() {
        let (header, test) = build_header(WIDE).await;

        header.on_cart_data(Some(CartData { total_quantity: 3 })).await;
        assert_eq!(header.render().await.cart_badge, Some(3));
        wait_for_cart(&header).await;
        assert!(!header.render().await.panel(PanelId::Cart).unwrap().shown);

        header.on_cart_data(Some(CartData { total_quantity: 0 })).await;
        assert_eq!(header.render().await.cart_badge, None);
        assert_eq!(mini_cart_fetches(&test).await, 1);
    }

    #[tokio::test]
    async fn no_cart_does_not_prewarm() {
        let (header, test) = build_header(WIDE).await;
        header.on_cart_data(None).await;

        assert_eq!(header.render().await.cart_badge, None);
        assert!(!test
            .fragments
            .requested()
            .await
            .contains(&"/mini-cart".to_string()));
    }

    #[tokio::test]
    async fn follows_cart_events_until_closed() {
        let (header, _test) = build_header(WIDE).await;
        let (sender, receiver) = broadcast::channel(8);
        let subscription = Subscription::new(Some(json!({"totalQuantity": 2})), receiver);

        sender.send(json!("not a cart")).unwrap();
        sender.send(Value::Null).unwrap();
        sender.send(json!({"totalQuantity": 5})).unwrap();
        drop(sender);

        header.follow_cart_events(subscription).await;
        assert_eq!(header.render().await.cart_badge, Some(5));
    }

    #[tokio::test]
    async fn badge_follows_cart_data_while_mini_cart_loads() {
        let (header, test) = build_header(WIDE).await;
        let gate = test.fragments.gate("/mini-cart").await;
        let (sender, receiver) = broadcast::channel(8);
        let subscription = Subscription::new(Some(json!({"totalQuantity": 1})), receiver);
        sender.send(json!({"totalQuantity": 5})).unwrap();
        drop(sender);

        // Returns while the fragment is still held at the gate.
        header.follow_cart_events(subscription).await;
        let view = header.render().await;
        assert_eq!(view.cart_badge, Some(5));
        assert!(view.panel(PanelId::Cart).unwrap().busy);

        gate.release();
        wait_for_cart(&header).await;
        assert_eq!(mini_cart_fetches(&test).await, 1);
    }

    #[tokio::test]
    async fn search_button_collapses_nav_and_focuses_input() {
        let (header, test) = build_header(WIDE).await;
        header
            .handle_event(HeaderEvent::MouseEnterSection { index: 0 })
            .await
            .unwrap();

        let response = header
            .handle_event(HeaderEvent::SearchButtonClick)
            .await
            .unwrap();
        assert_eq!(response.focus, Some(FocusTarget::SearchInput));
        assert!(response.panels[0].visible);

        let view = header.render().await;
        assert!(!view.overlay_shown);
        assert!(view.panel(PanelId::Search).unwrap().shown);
        assert_eq!(view.panel(PanelId::Search).unwrap().mounted, 2);
        assert_eq!(test.renderer.renders().await.len(), 2);

        let response = header
            .handle_event(HeaderEvent::SearchButtonClick)
            .await
            .unwrap();
        assert_eq!(response.focus, None);
        assert!(!response.panels[0].visible);
        assert_eq!(test.renderer.renders().await.len(), 2);
    }

    #[tokio::test]
    async fn outside_click_closes_open_panels() {
        let (header, test) = build_header(WIDE).await;
        header
            .handle_event(HeaderEvent::SearchButtonClick)
            .await
            .unwrap();

        let inside = HeaderEvent::DocumentClick {
            target: ClickTarget::new(ClickRegion::Panel(PanelId::Search), true),
        };
        let response = header.handle_event(inside).await.unwrap();
        // Only the (already hidden) cart is addressed.
        assert_eq!(response.panels.len(), 1);
        assert_eq!(response.panels[0].panel, PanelId::Cart);
        assert!(!response.panels[0].visible);
        assert_eq!(response.panels[0].load, None);
        assert!(header.render().await.panel(PanelId::Search).unwrap().shown);

        let response = header.handle_event(click_elsewhere(false)).await.unwrap();
        assert_eq!(response.panels.len(), 2);
        assert!(response.panels.iter().all(|t| !t.visible && !t.deferred));
        assert!(!header.render().await.panel(PanelId::Search).unwrap().shown);
        // Closing a hidden panel never loads it.
        assert_eq!(mini_cart_fetches(&test).await, 0);
    }

    #[tokio::test]
    async fn suppressed_cart_survives_clicks_inside_header() {
        let (header, _test) = build_header(WIDE).await;
        header.handle_event(HeaderEvent::CartButtonClick).await.unwrap();
        header.set_suppress_auto_close(PanelId::Cart, true).await;

        header.handle_event(click_elsewhere(true)).await.unwrap();
        assert!(header.render().await.panel(PanelId::Cart).unwrap().shown);

        header.handle_event(click_elsewhere(false)).await.unwrap();
        assert!(!header.render().await.panel(PanelId::Cart).unwrap().shown);
    }

    #[tokio::test]
    async fn mode_flip_resets_mobile_menu() {
        let (header, _test) = build_header(NARROW).await;

        header
            .handle_event(HeaderEvent::HamburgerClick)
            .await
            .unwrap();
        let view = header.render().await;
        assert!(view.nav_expanded);
        assert!(view.nav_wrapper_active);
        assert!(view.overlay_shown);
        assert!(view.body_scroll_locked);
        assert_eq!(view.hamburger_label, "Close navigation");
        assert!(view.sections.iter().all(|s| s.tabindex.is_none()));

        // Same mode: nothing changes.
        header
            .handle_event(HeaderEvent::ViewportResized { width: 700 })
            .await
            .unwrap();
        assert!(header.render().await.nav_expanded);

        header
            .handle_event(HeaderEvent::ViewportResized { width: WIDE })
            .await
            .unwrap();
        let view = header.render().await;
        assert!(!view.nav_expanded);
        assert!(!view.overlay_shown);
        assert!(!view.body_scroll_locked);
        assert_eq!(view.hamburger_label, "Open navigation");
        assert_eq!(view.sections[0].tabindex, Some(0));
        assert_eq!(view.sections[2].tabindex, None);
    }

    #[tokio::test]
    async fn escape_in_narrow_menu_focuses_hamburger() {
        let (header, _test) = build_header(NARROW).await;
        header
            .handle_event(HeaderEvent::HamburgerClick)
            .await
            .unwrap();

        let response = header
            .handle_event(HeaderEvent::KeyDown {
                key: Key::Escape,
                focused: None,
            })
            .await
            .unwrap();
        assert_eq!(response.focus, Some(FocusTarget::Hamburger));
        assert!(!header.render().await.nav_expanded);
    }

    #[tokio::test]
    async fn close_navigation_only_acts_in_narrow_mode() {
        let (header, _test) = build_header(NARROW).await;
        header
            .handle_event(HeaderEvent::HamburgerClick)
            .await
            .unwrap();
        header.close_navigation().await;
        assert!(!header.render().await.nav_expanded);

        let (header, _test) = build_header(WIDE).await;
        header
            .handle_event(HeaderEvent::MouseEnterSection { index: 0 })
            .await
            .unwrap();
        header.close_navigation().await;
        assert!(header.render().await.overlay_shown);
    }

    #[tokio::test]
    async fn out_of_range_section_is_rejected() {
        let (header, _test) = build_header(WIDE).await;
        let result = header
            .handle_event(HeaderEvent::MouseEnterSection { index: 9 })
            .await;
        assert_eq!(result, Err(HeaderError::SectionOutOfRange(9)));
    }

    #[tokio::test]
    async fn wishlist_and_search_navigate() {
        let (header, test) = build_header(WIDE).await;

        header
            .handle_event(HeaderEvent::WishlistButtonClick)
            .await
            .unwrap();
        header
            .handle_event(HeaderEvent::SearchSubmit {
                query: " red shoes ".to_string(),
            })
            .await
            .unwrap();
        header
            .handle_event(HeaderEvent::SearchSubmit {
                query: "   ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            test.navigator.navigations().await,
            vec!["/wishlist".to_string(), "/search?q=red%20shoes".to_string()]
        );
    }

    #[tokio::test]
    async fn wishlist_metadata_is_resolved_against_page() {
        let config = HeaderConfig {
            root_prefix: "/en".to_string(),
            ..HeaderConfig::default()
        };
        let metadata =
            StaticMetadata::new().with_meta("wishlist", "https://shop.example.com/saved");
        let test = build_context(config, metadata.clone(), Arc::new(metadata));
        test.fragments.insert("/nav", nav_fragment()).await;
        let location = PageLocation::parse("https://shop.example.com/en/women").unwrap();
        let header = Header::assemble(Arc::clone(&test.ctx), location, WIDE)
            .await
            .unwrap();

        header
            .handle_event(HeaderEvent::WishlistButtonClick)
            .await
            .unwrap();
        assert_eq!(test.navigator.navigations().await, vec!["/en/saved".to_string()]);
    }

    #[tokio::test]
    async fn extensions_appended_to_nav_are_projected() {
        let (header, _test) = build_header(WIDE).await;
        header
            .append_to_nav_sections(FragmentNode::element("div").with_class("auth-combine"))
            .await;
        assert_eq!(header.render().await.nav_extensions, 1);
    }

    #[tokio::test]
    async fn search_query_uses_configured_limits() {
        let (header, _test) = build_header(WIDE).await;
        assert_eq!(header.search_query("ab"), None);
        assert_eq!(header.search_query(""), Some(SearchQuery::Clear));
        assert_eq!(
            header.search_query("boots"),
            Some(SearchQuery::Search {
                phrase: "boots".to_string(),
                page_size: 4
            })
        );
    }

    #[test]
    fn section_label_skips_nested_list() {
        let item = FragmentNode::element("li")
            .with_text("Kids ")
            .with_child(FragmentNode::element("ul").with_child(
                FragmentNode::element("li").with_text("Toys"),
            ));
        let section = parse_section(&item);
        assert_eq!(section.label, "Kids");
        assert_eq!(section.submenu.unwrap().items[0].href, None);
    }
}
