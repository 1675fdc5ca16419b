//! User input events routed through the header

use serde::{Deserialize, Serialize};

use super::panel::PanelId;

/// Keyboard keys the header reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.code` value
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "Enter" | "NumpadEnter" => Self::Enter,
            "Space" => Self::Space,
            "Escape" => Self::Escape,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Where a document click landed, relative to the panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "panel", rename_all = "camelCase")]
pub enum ClickRegion {
    /// Inside a panel's own region
    Panel(PanelId),
    /// On the control that toggles a panel
    Trigger(PanelId),
    /// Anywhere else
    Elsewhere,
}

/// Hit-test result of a document click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickTarget {
    pub region: ClickRegion,
    /// Target is a descendant of the header element
    pub in_header: bool,
}

impl ClickTarget {
    #[must_use]
    pub fn new(region: ClickRegion, in_header: bool) -> Self {
        Self { region, in_header }
    }

    /// Target is outside both `panel` and its trigger control
    #[must_use]
    pub fn is_outside(&self, panel: PanelId) -> bool {
        !matches!(
            self.region,
            ClickRegion::Panel(p) | ClickRegion::Trigger(p) if p == panel
        )
    }
}

/// Element the host should move focus to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "index", rename_all = "camelCase")]
pub enum FocusTarget {
    Section(usize),
    Hamburger,
    SearchInput,
}

/// Input event delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HeaderEvent {
    /// Pointer entered a nav section
    MouseEnterSection { index: usize },
    /// Pointer left the nav without re-entering a descendant
    MouseLeaveNav,
    /// Click on a nav section
    SectionClick { index: usize, target_is_link: bool },
    /// Key pressed; `focused` is the nav section holding focus, if any
    KeyDown { key: Key, focused: Option<usize> },
    /// Focus moved to an element outside the nav
    FocusOutNav,
    /// Window width changed
    ViewportResized { width: u32 },
    HamburgerClick,
    CartButtonClick,
    SearchButtonClick,
    WishlistButtonClick,
    /// Click anywhere in the document
    DocumentClick { target: ClickTarget },
    /// Search form submitted
    SearchSubmit { query: String },
}
