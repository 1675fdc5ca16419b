//! Country selector handling
//!
//! Switching region rewrites the commerce headers of the session config and
//! moves the page to the region's locale. The session config is updated with
//! a plain read-modify-write; the navigation or reload that follows makes
//! every other reader pick up the new value.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use url::Url;

use crate::error::{HeaderError, HeaderResult};
use crate::services::HeaderContext;
use crate::types::{PageLocation, Region};

/// Session key holding the selected region code
pub const COUNTRY_CODE_KEY: &str = "countryCode";
/// Session key holding the storefront config JSON
pub const CONFIG_KEY: &str = "config";
/// Config field holding the config expiry (unix seconds)
pub const EXPIRY_KEY: &str = ":expiry";

const STORE_HEADERS_PATH: [&str; 4] = ["public", "default", "headers", "cs"];
const STORE_VIEW_CODE_HEADER: &str = "Magento-Store-View-Code";
const SOURCE_LOCALE_HEADER: &str = "AC-Source-Locale";
const PRICE_BOOK_HEADER: &str = "AC-Price-Book-ID";

/// How the page was refreshed after a switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSwitchOutcome {
    /// Moved to the locale-rewritten URL
    Navigated(String),
    /// URL had no locale marker; reloaded in place
    Reloaded,
}

/// Region switch service
pub struct RegionSwitchService {
    ctx: Arc<HeaderContext>,
}

impl RegionSwitchService {
    #[must_use]
    pub fn new(ctx: Arc<HeaderContext>) -> Self {
        Self { ctx }
    }

    /// Region stored in the session, used as the selector's initial option
    pub async fn selected_region(&self) -> HeaderResult<Option<Region>> {
        let code = self.ctx.session_store().get(COUNTRY_CODE_KEY).await?;
        Ok(code.as_deref().and_then(|code| {
            let region = Region::from_code(code);
            if region.is_none() {
                log::debug!("Unknown stored country code: {code}");
            }
            region
        }))
    }

    /// Switch to `region` and refresh the page.
    ///
    /// # Arguments
    /// * `region` - Selected region
    /// * `location` - Current page
    pub async fn switch(
        &self,
        region: Region,
        location: &PageLocation,
    ) -> HeaderResult<RegionSwitchOutcome> {
        let session = self.ctx.session_store();

        let mut config = match session.get(CONFIG_KEY).await? {
            Some(raw) => serde_json::from_str::<Value>(&raw)
                .map_err(|e| HeaderError::Serialization(format!("session config: {e}")))?,
            None => json!({}),
        };
        apply_store_headers(&mut config, region)?;

        let expiry = chrono::Utc::now().timestamp() + self.ctx.config().config_expiry_secs;
        root_object(&mut config)?.insert(EXPIRY_KEY.to_string(), json!(expiry));

        session.set(COUNTRY_CODE_KEY, region.code()).await?;
        let raw = serde_json::to_string(&config)
            .map_err(|e| HeaderError::Serialization(e.to_string()))?;
        session.set(CONFIG_KEY, &raw).await?;
        log::info!("Region switched to {region}");

        let navigator = self.ctx.navigator();
        match rewrite_locale_url(location.url(), region) {
            Some(url) => {
                let url = url.to_string();
                navigator.navigate(&url).await?;
                Ok(RegionSwitchOutcome::Navigated(url))
            }
            None => {
                navigator.reload().await?;
                Ok(RegionSwitchOutcome::Reloaded)
            }
        }
    }
}

/// Rewrite the locale markers of a URL path for `region`.
///
/// The first `/xx/` segment and every `-xx` suffix move to the region's
/// locale. Returns `None` when nothing changed.
#[must_use]
pub fn rewrite_locale_url(url: &Url, region: Region) -> Option<Url> {
    let (from, to) = match region {
        Region::Eu => ("en", "de"),
        Region::Us | Region::UsVip => ("de", "en"),
    };

    let path = url.path();
    let rewritten = path
        .replacen(&format!("/{from}/"), &format!("/{to}/"), 1)
        .replace(&format!("-{from}"), &format!("-{to}"));
    if rewritten == path {
        return None;
    }

    let mut url = url.clone();
    url.set_path(&rewritten);
    Some(url)
}

fn root_object(config: &mut Value) -> HeaderResult<&mut Map<String, Value>> {
    config
        .as_object_mut()
        .ok_or_else(|| HeaderError::Serialization("session config is not an object".to_string()))
}

fn apply_store_headers(config: &mut Value, region: Region) -> HeaderResult<()> {
    let mut object = root_object(config)?;
    for key in STORE_HEADERS_PATH {
        object = object
            .entry(key)
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .ok_or_else(|| HeaderError::Serialization(format!("config `{key}` is not an object")))?;
    }

    let headers = region.store_headers();
    object.insert(STORE_VIEW_CODE_HEADER.to_string(), json!(headers.store_view_code));
    object.insert(SOURCE_LOCALE_HEADER.to_string(), json!(headers.source_locale));
    object.insert(PRICE_BOOK_HEADER.to_string(), json!(headers.price_book_id));
    Ok(())
}
