//! Collaborator abstraction trait definitions

mod component_renderer;
mod event_bus;
mod fragment_loader;
mod metadata;
mod navigator;
mod panel_loader;
mod session_store;

pub use component_renderer::{ComponentHandle, ComponentRenderer};
pub use event_bus::{EventBus, InMemoryEventBus, Subscription, CART_DATA_TOPIC, CART_VIEW_TOPIC};
pub use fragment_loader::FragmentLoader;
pub use metadata::{MetadataSource, PlaceholderSource, Placeholders, StaticMetadata};
pub use navigator::Navigator;
pub use panel_loader::PanelLoader;
pub use session_store::{InMemorySessionStore, SessionStore};
