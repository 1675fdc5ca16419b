//! Type definition module

mod cart;
mod event;
mod fragment;
mod location;
mod nav;
mod panel;
mod projection;
mod region;
mod search;
mod viewport;

pub use cart::CartData;
pub use event::{ClickRegion, ClickTarget, FocusTarget, HeaderEvent, Key};
pub use fragment::{Fragment, FragmentNode};
pub use location::PageLocation;
pub use nav::{NavSection, Submenu, SubmenuItem, SUBMENU_BACK_LABEL};
pub use panel::{LoadOutcome, PanelId, PanelState, VisibilityRequest, VisibilityTransition};
pub use projection::{HeaderProjection, PanelProjection, SectionProjection};
pub use region::{Region, StoreHeaders};
pub use search::SearchQuery;
pub use viewport::{ViewportMode, DEFAULT_BREAKPOINT_PX};
