//! Flyout panel types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lazily initialized flyout panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelId {
    /// Mini cart
    Cart,
    /// Search popover
    Search,
}

impl PanelId {
    /// All panels, in header order
    pub const ALL: [Self; 2] = [Self::Cart, Self::Search];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested visibility change.
///
/// `Toggle` is what an absent desired state means, so a queued toggle and a
/// queued hide stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityRequest {
    Show,
    Hide,
    Toggle,
}

impl VisibilityRequest {
    /// Resolve the request against the current visibility
    #[must_use]
    pub fn resolve(self, currently_visible: bool) -> bool {
        match self {
            Self::Show => true,
            Self::Hide => false,
            Self::Toggle => !currently_visible,
        }
    }
}

impl From<Option<bool>> for VisibilityRequest {
    fn from(desired: Option<bool>) -> Self {
        match desired {
            Some(true) => Self::Show,
            Some(false) => Self::Hide,
            None => Self::Toggle,
        }
    }
}

/// Per-panel state.
///
/// Invariants: `loading` and `loaded` are never both true, and
/// `pending_intent` is only set while `loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    /// One-time initialization finished (successfully or not)
    pub loaded: bool,
    /// One-time initialization in flight
    pub loading: bool,
    /// Currently shown
    pub visible: bool,
    /// Latest request received while loading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_intent: Option<VisibilityRequest>,
    /// Error reported by the loader, if it failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_load_error: Option<String>,
    /// Outside clicks within the header leave the panel open
    pub suppress_auto_close: bool,
}

impl PanelState {
    /// Whether the trigger control shows a busy indicator
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.loading
    }
}

/// How a one-time loader finished.
///
/// Completion is unconditional: both variants leave the panel `loaded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Result of a visibility request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityTransition {
    pub panel: PanelId,
    /// Visibility after the request was handled
    pub visible: bool,
    /// Request was queued behind an in-flight load
    pub deferred: bool,
    /// Outcome of the load this request started, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadOutcome>,
}
