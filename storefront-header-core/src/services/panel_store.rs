//! Per-panel visibility state and the outside-click rule

use crate::types::{ClickTarget, PanelId, PanelState, VisibilityRequest};

/// Single source of truth for panel state
#[derive(Debug, Clone, Default)]
pub struct PanelVisibilityStore {
    cart: PanelState,
    search: PanelState,
}

impl PanelVisibilityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, panel: PanelId) -> &PanelState {
        match panel {
            PanelId::Cart => &self.cart,
            PanelId::Search => &self.search,
        }
    }

    pub(crate) fn state_mut(&mut self, panel: PanelId) -> &mut PanelState {
        match panel {
            PanelId::Cart => &mut self.cart,
            PanelId::Search => &mut self.search,
        }
    }

    #[must_use]
    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.state(panel).visible
    }

    /// Set visibility; returns whether anything changed
    pub fn set_visible(&mut self, panel: PanelId, show: bool) -> bool {
        let state = self.state_mut(panel);
        if state.visible == show {
            return false;
        }
        state.visible = show;
        true
    }

    /// Apply a request and return the resulting visibility
    pub fn apply(&mut self, panel: PanelId, request: VisibilityRequest) -> bool {
        let show = request.resolve(self.is_visible(panel));
        self.set_visible(panel, show);
        show
    }

    /// Keep the panel open on clicks elsewhere in the header (e.g. while an
    /// undo affordance is showing in the mini cart)
    pub fn set_suppress_auto_close(&mut self, panel: PanelId, suppress: bool) {
        self.state_mut(panel).suppress_auto_close = suppress;
    }

    /// Panels a document click should close.
    ///
    /// A panel closes when the click is outside both its region and its
    /// trigger control; with `suppress_auto_close` set the click must also be
    /// outside the header. Evaluated against current state on every click.
    #[must_use]
    pub fn panels_to_close(&self, click: &ClickTarget) -> Vec<PanelId> {
        PanelId::ALL
            .into_iter()
            .filter(|&panel| {
                let outside = click.is_outside(panel);
                if self.state(panel).suppress_auto_close {
                    outside && !click.in_header
                } else {
                    outside
                }
            })
            .collect()
    }
}
