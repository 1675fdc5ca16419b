//! Header configuration

use serde::{Deserialize, Serialize};

use crate::error::{HeaderError, HeaderResult};
use crate::types::DEFAULT_BREAKPOINT_PX;

/// Runtime configuration for the header.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    /// Viewport width (px) at and above which the layout is wide
    pub breakpoint_px: u32,
    /// Page paths on which the cart control is hidden
    pub excluded_cart_paths: Vec<String>,
    /// Results requested per search, also the skeleton count
    pub search_page_size: u32,
    /// Shortest phrase that triggers a search
    pub search_min_phrase_len: usize,
    /// Nav fragment path used when the `nav` metadata is absent
    pub nav_path: String,
    /// Mini cart fragment path used when the `mini-cart` metadata is absent
    pub mini_cart_path: String,
    /// Wishlist page path used when the `wishlist` metadata is absent
    pub wishlist_path: String,
    /// Prefix prepended to every storefront link
    pub root_prefix: String,
    /// Lifetime of the session config written by the region switch
    pub config_expiry_secs: i64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            excluded_cart_paths: vec!["/checkout".to_string()],
            search_page_size: 4,
            search_min_phrase_len: 3,
            nav_path: "/nav".to_string(),
            mini_cart_path: "/mini-cart".to_string(),
            wishlist_path: "/wishlist".to_string(),
            root_prefix: String::new(),
            config_expiry_secs: 7200,
        }
    }
}

impl HeaderConfig {
    /// Parse a config from JSON, filling absent fields with defaults
    pub fn from_json(json: &str) -> HeaderResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| HeaderError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the header cannot operate with
    pub fn validate(&self) -> HeaderResult<()> {
        if self.breakpoint_px == 0 {
            return Err(HeaderError::Validation(
                "breakpointPx must be greater than zero".to_string(),
            ));
        }
        if self.search_page_size == 0 {
            return Err(HeaderError::Validation(
                "searchPageSize must be greater than zero".to_string(),
            ));
        }
        if self.config_expiry_secs <= 0 {
            return Err(HeaderError::Validation(
                "configExpirySecs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
