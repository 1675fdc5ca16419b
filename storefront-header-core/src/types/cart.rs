//! Cart event payload

use serde::{Deserialize, Serialize};

/// Payload published on the `cart/data` topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    #[serde(default)]
    pub total_quantity: u32,
}

impl CartData {
    /// Badge count to show on the cart control
    #[must_use]
    pub fn badge_count(&self) -> Option<u32> {
        (self.total_quantity > 0).then_some(self.total_quantity)
    }
}
