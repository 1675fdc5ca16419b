//! Navigation section types

use serde::{Deserialize, Serialize};

/// Heading of the back link shown at the top of every submenu
pub const SUBMENU_BACK_LABEL: &str = "All Categories";

/// Link inside a submenu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Drop-down attached to a nav section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submenu {
    /// Submenu heading (the section label)
    pub title: String,
    /// Back link label used in the narrow layout
    pub back_label: String,
    pub items: Vec<SubmenuItem>,
}

/// Top-level navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSection {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submenu: Option<Submenu>,
    /// Narrow-layout "active" class, independent of expansion
    #[serde(default)]
    pub active: bool,
}

impl NavSection {
    /// Section without a drop-down
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            submenu: None,
            active: false,
        }
    }

    /// Section with a drop-down built from `items`
    #[must_use]
    pub fn with_submenu(label: impl Into<String>, items: Vec<SubmenuItem>) -> Self {
        let label = label.into();
        Self {
            submenu: Some(Submenu {
                title: label.clone(),
                back_label: SUBMENU_BACK_LABEL.to_string(),
                items,
            }),
            label,
            active: false,
        }
    }

    /// Drop-capable sections participate in expansion
    #[must_use]
    pub fn has_submenu(&self) -> bool {
        self.submenu.is_some()
    }
}
