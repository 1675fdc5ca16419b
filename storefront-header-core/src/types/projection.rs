//! Attribute snapshot of the header, rendered from state

use serde::Serialize;

use super::panel::PanelId;

/// Render output for one nav section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProjection {
    pub label: String,
    /// Carries the `nav-drop` class
    pub nav_drop: bool,
    pub aria_expanded: bool,
    /// Narrow-layout `active` class
    pub active: bool,
    /// `tabindex` attribute; present on drop sections in the wide layout only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tabindex: Option<i32>,
}

/// Render output for one panel and its trigger control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelProjection {
    pub panel: PanelId,
    /// `nav-tools-panel--show` class
    pub shown: bool,
    /// `aria-busy` on the trigger control
    pub busy: bool,
    /// Number of fragments/components mounted into the panel
    pub mounted: usize,
}

/// Full render output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderProjection {
    /// `aria-expanded` on the nav element (mobile menu open)
    pub nav_expanded: bool,
    /// `active` class on the nav wrapper
    pub nav_wrapper_active: bool,
    /// `aria-label` of the hamburger button
    pub hamburger_label: String,
    /// `show` class on the overlay
    pub overlay_shown: bool,
    /// `overflow-y: hidden` on the body
    pub body_scroll_locked: bool,
    pub sections: Vec<SectionProjection>,
    pub panels: Vec<PanelProjection>,
    /// `data-count` on the cart control
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_badge: Option<u32>,
    /// Cart control hidden on excluded pages
    pub cart_button_hidden: bool,
    /// Elements collaborators appended into the nav sections region
    pub nav_extensions: usize,
}

impl HeaderProjection {
    #[must_use]
    pub fn panel(&self, panel: PanelId) -> Option<&PanelProjection> {
        self.panels.iter().find(|p| p.panel == panel)
    }
}
