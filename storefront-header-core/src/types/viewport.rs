//! Viewport mode types

use serde::{Deserialize, Serialize};

/// Width (px) separating the narrow and wide layouts
pub const DEFAULT_BREAKPOINT_PX: u32 = 900;

/// Responsive layout regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    /// Desktop layout (`width >= breakpoint`)
    Wide,
    /// Mobile/tablet layout
    Narrow,
}

impl ViewportMode {
    /// Derive the mode from a viewport width
    #[must_use]
    pub fn from_width(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px >= breakpoint_px {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    #[must_use]
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }

    #[must_use]
    pub fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}
