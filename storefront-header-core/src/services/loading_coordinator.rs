//! Loading-state coordinator
//!
//! Runs each panel's expensive initialization exactly once and makes sure
//! visibility requests issued while it is in flight are neither lost nor
//! applied out of order.
//!
//! All panel state sits behind one lock. The lock is held only for the
//! synchronous check-and-mark steps and is released before awaiting a loader,
//! so a request arriving mid-load observes `loading == true` and is queued in
//! the panel's pending slot (last request wins).
//!
//! A load runs on its own task together with its completion step. Dropping
//! the caller that started it never leaves a panel stuck in `loading`.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::services::PanelVisibilityStore;
use crate::traits::PanelLoader;
use crate::types::{
    ClickTarget, LoadOutcome, PanelId, PanelState, VisibilityRequest, VisibilityTransition,
};

/// What started a pass through the coordinator
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// User (or collaborator) visibility request
    Request(VisibilityRequest),
    /// Background pre-warm, no visibility intent
    Prewarm,
}

impl Trigger {
    fn request(self) -> Option<VisibilityRequest> {
        match self {
            Self::Request(request) => Some(request),
            Self::Prewarm => None,
        }
    }
}

/// Decision taken under the lock
enum Decision {
    Done(VisibilityTransition),
    Load(Arc<dyn PanelLoader>),
}

/// Outcome of a pass: settled immediately, or a load task was started
enum Step {
    Done(VisibilityTransition),
    Started(JoinHandle<VisibilityTransition>),
}

/// Loading-state coordinator
pub struct LoadingCoordinator {
    store: Arc<Mutex<PanelVisibilityStore>>,
    loaders: HashMap<PanelId, Arc<dyn PanelLoader>>,
}

impl LoadingCoordinator {
    /// Create a coordinator with no loaders; panels without a loader are
    /// toggled directly.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(PanelVisibilityStore::new())),
            loaders: HashMap::new(),
        }
    }

    /// Register the one-time loader of a panel
    #[must_use]
    pub fn with_loader(mut self, panel: PanelId, loader: Arc<dyn PanelLoader>) -> Self {
        self.loaders.insert(panel, loader);
        self
    }

    /// Request a visibility change.
    ///
    /// `desired` of `None` toggles. While the panel is loading the request is
    /// queued and the returned transition is `deferred`.
    pub async fn request_visibility(
        &self,
        panel: PanelId,
        desired: Option<bool>,
    ) -> VisibilityTransition {
        let trigger = Trigger::Request(VisibilityRequest::from(desired));
        match self.start(panel, trigger).await {
            Step::Done(transition) => transition,
            Step::Started(task) => self.join(panel, task).await,
        }
    }

    /// Start the panel's loader ahead of any user request.
    ///
    /// Returns without waiting for the load. The handle resolves once the
    /// load has completed; `None` means no load was started (already loaded,
    /// already loading, or no loader registered). Visibility is left as is
    /// unless a request arrives during the load.
    pub async fn prewarm(&self, panel: PanelId) -> Option<JoinHandle<VisibilityTransition>> {
        match self.start(panel, Trigger::Prewarm).await {
            Step::Done(_) => None,
            Step::Started(task) => Some(task),
        }
    }

    /// Snapshot of a panel's state
    pub async fn state(&self, panel: PanelId) -> PanelState {
        self.store.lock().await.state(panel).clone()
    }

    /// Panels a document click should close
    pub async fn panels_to_close(&self, click: &ClickTarget) -> Vec<PanelId> {
        self.store.lock().await.panels_to_close(click)
    }

    /// Toggle the auto-close override of a panel
    pub async fn set_suppress_auto_close(&self, panel: PanelId, suppress: bool) {
        self.store
            .lock()
            .await
            .set_suppress_auto_close(panel, suppress);
    }

    async fn start(&self, panel: PanelId, trigger: Trigger) -> Step {
        match self.begin(panel, trigger).await {
            Decision::Done(transition) => Step::Done(transition),
            Decision::Load(loader) => {
                let store = Arc::clone(&self.store);
                Step::Started(tokio::spawn(async move {
                    let outcome = run_loader(panel, loader.as_ref()).await;
                    let visible = complete(&store, panel, &outcome, trigger).await;
                    VisibilityTransition {
                        panel,
                        visible,
                        deferred: false,
                        load: Some(outcome),
                    }
                }))
            }
        }
    }

    async fn join(
        &self,
        panel: PanelId,
        task: JoinHandle<VisibilityTransition>,
    ) -> VisibilityTransition {
        match task.await {
            Ok(transition) => transition,
            Err(e) => {
                log::error!("{panel} panel load task did not finish: {e}");
                VisibilityTransition {
                    panel,
                    visible: self.store.lock().await.is_visible(panel),
                    deferred: false,
                    load: None,
                }
            }
        }
    }

    /// Check-and-mark step. Deciding to load and setting `loading` happen in
    /// one critical section, which is what makes the loader run at most once.
    async fn begin(&self, panel: PanelId, trigger: Trigger) -> Decision {
        let mut store = self.store.lock().await;

        let (loading, loaded, visible) = {
            let state = store.state(panel);
            (state.loading, state.loaded, state.visible)
        };

        if loading {
            if let Some(request) = trigger.request() {
                log::debug!("{panel} panel is loading, queueing {request:?}");
                store.state_mut(panel).pending_intent = Some(request);
            }
            return Decision::Done(VisibilityTransition {
                panel,
                visible,
                deferred: true,
                load: None,
            });
        }

        let wants_load = !loaded
            && match trigger {
                Trigger::Prewarm => true,
                Trigger::Request(request) => request.resolve(visible),
            };
        let loader = if wants_load {
            self.loaders.get(&panel).cloned()
        } else {
            None
        };

        if let Some(loader) = loader {
            store.state_mut(panel).loading = true;
            return Decision::Load(loader);
        }

        let visible = match trigger {
            Trigger::Request(request) => store.apply(panel, request),
            Trigger::Prewarm => visible,
        };
        Decision::Done(VisibilityTransition {
            panel,
            visible,
            deferred: false,
            load: None,
        })
    }
}

impl Default for LoadingCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a loader to its outcome. A panicking loader counts as a failed load.
async fn run_loader(panel: PanelId, loader: &dyn PanelLoader) -> LoadOutcome {
    log::debug!("Loading {panel} panel");
    match AssertUnwindSafe(loader.load()).catch_unwind().await {
        Ok(Ok(())) => LoadOutcome::Loaded,
        Ok(Err(e)) => {
            e.log(&format!("Failed to load {panel} panel"));
            LoadOutcome::Failed(e.to_string())
        }
        Err(_) => {
            log::error!("{panel} panel loader panicked");
            LoadOutcome::Failed(format!("{panel} panel loader panicked"))
        }
    }
}

/// Unconditional completion: the panel becomes `loaded` whatever the
/// outcome, then the pending request (or the original one) is applied.
async fn complete(
    store: &Mutex<PanelVisibilityStore>,
    panel: PanelId,
    outcome: &LoadOutcome,
    trigger: Trigger,
) -> bool {
    let mut store = store.lock().await;

    let pending = {
        let state = store.state_mut(panel);
        state.loading = false;
        state.loaded = true;
        state.last_load_error = match outcome {
            LoadOutcome::Loaded => None,
            LoadOutcome::Failed(message) => Some(message.clone()),
        };
        state.pending_intent.take()
    };

    match pending.or(trigger.request()) {
        Some(request) => store.apply(panel, request),
        None => store.is_visible(panel),
    }
}
