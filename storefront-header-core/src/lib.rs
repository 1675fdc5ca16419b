//! Storefront Header Core Library
//!
//! Provides the interaction logic behind a storefront site header, including:
//! - Lazily loaded flyout panels (cart, search) and their loading coordinator
//! - The responsive navigation expansion state machine
//! - Region switching (session config and locale URL rewrite)
//!
//! State lives in memory and the DOM is treated as a projection of it
//! (`Header::render`). Every side effect the header needs from its host
//! (fragment fetch, component rendering, session storage, navigation) goes
//! through the traits in [`traits`].

pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::HeaderConfig;
pub use error::{HeaderError, HeaderResult};
pub use services::{Header, HeaderContext};
pub use traits::{
    ComponentRenderer, EventBus, FragmentLoader, MetadataSource, Navigator, PanelLoader,
    PlaceholderSource, SessionStore,
};
