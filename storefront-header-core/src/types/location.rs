//! Current page location

use url::Url;

use crate::error::{HeaderError, HeaderResult};

/// Absolute URL of the page hosting the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    pub fn parse(href: &str) -> HeaderResult<Self> {
        let url = Url::parse(href).map_err(|e| HeaderError::InvalidUrl(format!("{href}: {e}")))?;
        Ok(Self { url })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Resolve a metadata value (absolute or relative URL) to a path on this site
    pub fn resolve_path(&self, reference: &str) -> HeaderResult<String> {
        self.url
            .join(reference)
            .map(|resolved| resolved.path().to_string())
            .map_err(|e| HeaderError::InvalidUrl(format!("{reference}: {e}")))
    }
}
