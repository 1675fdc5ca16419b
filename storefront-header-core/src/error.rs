//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Header layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum HeaderError {
    /// Content fragment could not be fetched or parsed
    #[error("Fragment load failed: {path} - {message}")]
    FragmentLoad { path: String, message: String },

    /// Remote component failed to mount
    #[error("Component render failed: {component} - {message}")]
    ComponentRender { component: String, message: String },

    /// Expected element missing from fetched markup
    #[error("Missing anchor: {0}")]
    MissingAnchor(String),

    /// Placeholder lookup failed
    #[error("Placeholder error: {0}")]
    Placeholder(String),

    /// Session storage error
    #[error("Session storage error: {0}")]
    Session(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// URL could not be parsed or resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Host refused a navigation or reload
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Event referenced a nav section that does not exist
    #[error("Nav section out of range: {0}")]
    SectionOutOfRange(usize),
}

impl HeaderError {
    /// Whether it is expected behavior (bad input, absent optional markup),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingAnchor(_)
            | Self::InvalidUrl(_)
            | Self::Validation(_)
            | Self::SectionOutOfRange(_) => true,
            Self::FragmentLoad { .. }
            | Self::ComponentRender { .. }
            | Self::Placeholder(_)
            | Self::Session(_)
            | Self::Serialization(_)
            | Self::Navigation(_) => false,
        }
    }

    /// Log the error at the level `is_expected` selects.
    pub(crate) fn log(&self, context: &str) {
        if self.is_expected() {
            log::warn!("{context}: {self}");
        } else {
            log::error!("{context}: {self}");
        }
    }
}

/// Header layer Result type alias
pub type HeaderResult<T> = std::result::Result<T, HeaderError>;
