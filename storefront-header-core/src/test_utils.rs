//! Test helpers: Mock adapters and context builders

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Notify, RwLock};

use crate::config::HeaderConfig;
use crate::error::{HeaderError, HeaderResult};
use crate::services::HeaderContext;
use crate::traits::{
    ComponentHandle, ComponentRenderer, FragmentLoader, InMemoryEventBus, InMemorySessionStore,
    Navigator, PanelLoader, PlaceholderSource, Placeholders, StaticMetadata,
};
use crate::types::{Fragment, FragmentNode};

// ===== Gate =====

/// Holds an async call open until released
#[derive(Default)]
pub struct Gate {
    started: Notify,
    open: Notify,
}

impl Gate {
    /// Wait until a call has reached the gate
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the (current or next) call through
    pub fn release(&self) {
        self.open.notify_one();
    }

    async fn pass(&self) {
        self.started.notify_one();
        self.open.notified().await;
    }
}

/// Let spawned tasks run until `done` holds
pub async fn wait_until<F, Fut>(mut done: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if done().await {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

// ===== GatedLoader =====

/// Panel loader that blocks until released
pub struct GatedLoader {
    gate: Gate,
    calls: AtomicUsize,
    failure: Option<String>,
}

impl GatedLoader {
    pub fn new() -> Self {
        Self {
            gate: Gate::default(),
            calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Loader that fails with `message` once released
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Wait until `load` has been entered
    pub async fn wait_started(&self) {
        self.gate.wait_started().await;
    }

    /// Let the (current or next) `load` call finish
    pub fn release(&self) {
        self.gate.release();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PanelLoader for GatedLoader {
    async fn load(&self) -> HeaderResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.pass().await;
        match &self.failure {
            Some(message) => Err(HeaderError::FragmentLoad {
                path: "/mini-cart".to_string(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

// ===== MockFragmentLoader =====

#[derive(Default)]
pub struct MockFragmentLoader {
    fragments: RwLock<HashMap<String, Fragment>>,
    gates: RwLock<HashMap<String, Arc<Gate>>>,
    requested: RwLock<Vec<String>>,
}

impl MockFragmentLoader {
    pub async fn insert(&self, path: &str, fragment: Fragment) {
        self.fragments
            .write()
            .await
            .insert(path.to_string(), fragment);
    }

    /// Hold every load of `path` at the returned gate
    pub async fn gate(&self, path: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates
            .write()
            .await
            .insert(path.to_string(), Arc::clone(&gate));
        gate
    }

    /// Paths requested so far, in order
    pub async fn requested(&self) -> Vec<String> {
        self.requested.read().await.clone()
    }
}

#[async_trait]
impl FragmentLoader for MockFragmentLoader {
    async fn load(&self, path: &str) -> HeaderResult<Fragment> {
        self.requested.write().await.push(path.to_string());
        let gate = self.gates.read().await.get(path).cloned();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        self.fragments
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| HeaderError::FragmentLoad {
                path: path.to_string(),
                message: "404 Not Found".to_string(),
            })
    }
}

// ===== MockComponentRenderer =====

#[derive(Debug, Clone)]
pub struct RenderRecord {
    pub target: String,
    pub component: String,
    pub props: Value,
}

#[derive(Default)]
pub struct MockComponentRenderer {
    renders: RwLock<Vec<RenderRecord>>,
    failing: RwLock<HashSet<String>>,
}

impl MockComponentRenderer {
    pub async fn renders(&self) -> Vec<RenderRecord> {
        self.renders.read().await.clone()
    }

    /// Make every render of `component` fail
    pub async fn fail_component(&self, component: &str) {
        self.failing.write().await.insert(component.to_string());
    }
}

#[async_trait]
impl ComponentRenderer for MockComponentRenderer {
    async fn render(
        &self,
        target: &str,
        component: &str,
        props: Value,
    ) -> HeaderResult<ComponentHandle> {
        if self.failing.read().await.contains(component) {
            return Err(HeaderError::ComponentRender {
                component: component.to_string(),
                message: "module failed to load".to_string(),
            });
        }
        let mut renders = self.renders.write().await;
        renders.push(RenderRecord {
            target: target.to_string(),
            component: component.to_string(),
            props,
        });
        Ok(ComponentHandle {
            id: format!("{component}-{}", renders.len()),
            component: component.to_string(),
        })
    }
}

// ===== MockNavigator =====

#[derive(Default)]
pub struct MockNavigator {
    navigations: RwLock<Vec<String>>,
    reloads: AtomicUsize,
}

impl MockNavigator {
    pub async fn navigations(&self) -> Vec<String> {
        self.navigations.read().await.clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Navigator for MockNavigator {
    async fn navigate(&self, url: &str) -> HeaderResult<()> {
        self.navigations.write().await.push(url.to_string());
        Ok(())
    }

    async fn reload(&self) -> HeaderResult<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ===== FailingPlaceholders =====

pub struct FailingPlaceholders;

#[async_trait]
impl PlaceholderSource for FailingPlaceholders {
    async fn fetch(&self) -> HeaderResult<Placeholders> {
        Err(HeaderError::Placeholder(
            "placeholders.json returned 500".to_string(),
        ))
    }
}

// ===== Context =====

/// Header context plus handles to its mocks
pub struct TestContext {
    pub ctx: Arc<HeaderContext>,
    pub fragments: Arc<MockFragmentLoader>,
    pub renderer: Arc<MockComponentRenderer>,
    pub navigator: Arc<MockNavigator>,
    pub session: InMemorySessionStore,
    pub bus: InMemoryEventBus,
}

pub fn test_context(metadata: StaticMetadata) -> TestContext {
    let placeholders = Arc::new(metadata.clone());
    build_context(HeaderConfig::default(), metadata, placeholders)
}

pub fn build_context(
    config: HeaderConfig,
    metadata: StaticMetadata,
    placeholders: Arc<dyn PlaceholderSource>,
) -> TestContext {
    let fragments = Arc::new(MockFragmentLoader::default());
    let renderer = Arc::new(MockComponentRenderer::default());
    let navigator = Arc::new(MockNavigator::default());
    let session = InMemorySessionStore::new();
    let bus = InMemoryEventBus::new();

    let ctx = Arc::new(HeaderContext::new(
        config,
        fragments.clone(),
        renderer.clone(),
        Arc::new(metadata),
        placeholders,
        Arc::new(bus.clone()),
        Arc::new(session.clone()),
        navigator.clone(),
    ));

    TestContext {
        ctx,
        fragments,
        renderer,
        navigator,
        session,
        bus,
    }
}

// ===== Fragments =====

fn link(label: &str, href: &str) -> FragmentNode {
    FragmentNode::element("li").with_child(
        FragmentNode::element("a")
            .with_text(label)
            .with_href(href),
    )
}

/// Nav fragment with brand, sections and tools blocks.
///
/// Sections: "Women" and "Men" with submenus, "Sale" without.
pub fn nav_fragment() -> Fragment {
    let brand = FragmentNode::element("div")
        .with_class("section")
        .with_child(FragmentNode::element("a").with_text("Shop").with_href("/"));

    let women = FragmentNode::element("li").with_text("Women").with_child(
        FragmentNode::element("ul")
            .with_child(link("Dresses", "/women/dresses"))
            .with_child(link("Shoes", "/women/shoes")),
    );
    let men = FragmentNode::element("li")
        .with_child(FragmentNode::element("p").with_text("Men"))
        .with_child(FragmentNode::element("ul").with_child(link("Shirts", "/men/shirts")));
    let sale = FragmentNode::element("li").with_text("Sale");

    let sections = FragmentNode::element("div").with_class("section").with_child(
        FragmentNode::element("div")
            .with_class("default-content-wrapper")
            .with_child(
                FragmentNode::element("ul")
                    .with_child(women)
                    .with_child(men)
                    .with_child(sale),
            ),
    );

    let tools = FragmentNode::element("div").with_class("section");

    Fragment::new(vec![brand, sections, tools])
}

/// Mini cart fragment with a single block
pub fn mini_cart_fragment() -> Fragment {
    Fragment::new(vec![
        FragmentNode::element("div").with_class("commerce-mini-cart"),
    ])
}
