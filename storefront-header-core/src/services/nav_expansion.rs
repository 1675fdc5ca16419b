//! Nav section expansion state machine
//!
//! Expansion is group-exclusive: the controller stores at most one expanded
//! index, so two sections can never be expanded together. The overlay is not
//! stored at all; it is derived from expansion and the mobile menu.

use crate::error::{HeaderError, HeaderResult};
use crate::types::{FocusTarget, Key, NavSection, SectionProjection, ViewportMode};

/// Hamburger label while the mobile menu is closed
pub const OPEN_NAVIGATION_LABEL: &str = "Open navigation";
/// Hamburger label while the mobile menu is open
pub const CLOSE_NAVIGATION_LABEL: &str = "Close navigation";

/// Input handled by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    MouseEnter(usize),
    MouseLeaveNav,
    SectionClick { index: usize, target_is_link: bool },
    KeyDown { key: Key, focused: Option<usize> },
    FocusOutNav,
    HamburgerClick,
    SearchButtonClick,
    /// Collaborator asked to close the navigation (e.g. after login)
    CloseNavigation,
}

/// Side effects the host must perform after a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavEffect {
    pub focus: Option<FocusTarget>,
}

impl NavEffect {
    fn focus(target: FocusTarget) -> Self {
        Self {
            focus: Some(target),
        }
    }
}

/// Nav section expansion controller
#[derive(Debug, Clone)]
pub struct NavExpansionController {
    sections: Vec<NavSection>,
    expanded: Option<usize>,
    menu_open: bool,
    /// Mode the state was last synchronised with
    mode: ViewportMode,
}

impl NavExpansionController {
    #[must_use]
    pub fn new(sections: Vec<NavSection>, mode: ViewportMode) -> Self {
        Self {
            sections,
            expanded: None,
            menu_open: false,
            mode,
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    #[must_use]
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    #[must_use]
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Overlay visibility, derived from state
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.expanded.is_some() || (self.mode.is_narrow() && self.menu_open)
    }

    /// Body scroll is locked while the mobile menu covers the page
    #[must_use]
    pub fn body_scroll_locked(&self) -> bool {
        self.mode.is_narrow() && self.menu_open
    }

    #[must_use]
    pub fn hamburger_label(&self) -> &'static str {
        if self.menu_open {
            CLOSE_NAVIGATION_LABEL
        } else {
            OPEN_NAVIGATION_LABEL
        }
    }

    /// Re-synchronise with the live viewport mode.
    ///
    /// A mode flip resets everything to the new mode's default: all sections
    /// collapsed, `active` cleared, menu closed. Returns `true` on a flip.
    pub fn sync_mode(&mut self, mode: ViewportMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("Nav resynchronised for {mode:?} layout");
        self.mode = mode;
        self.reset();
        true
    }

    /// Apply an event under the live viewport mode
    pub fn handle(&mut self, event: NavEvent, mode: ViewportMode) -> HeaderResult<NavEffect> {
        self.sync_mode(mode);

        match event {
            NavEvent::MouseEnter(index) => {
                self.check_index(index)?;
                if mode.is_wide() {
                    self.collapse_all();
                    if self.sections[index].has_submenu() {
                        self.expanded = Some(index);
                    }
                }
            }
            NavEvent::MouseLeaveNav => {
                if mode.is_wide() {
                    self.collapse_all();
                }
            }
            NavEvent::SectionClick {
                index,
                target_is_link,
            } => {
                self.check_index(index)?;
                if mode.is_narrow() && !target_is_link {
                    let section = &mut self.sections[index];
                    section.active = !section.active;
                }
            }
            NavEvent::KeyDown { key, focused } => return self.handle_key(key, focused),
            NavEvent::FocusOutNav => {
                if mode.is_wide() {
                    self.collapse_all();
                } else if self.menu_open {
                    self.close_menu();
                }
            }
            NavEvent::HamburgerClick => {
                if mode.is_narrow() {
                    if self.menu_open {
                        self.close_menu();
                    } else {
                        self.open_menu();
                    }
                }
            }
            NavEvent::SearchButtonClick => {
                if mode.is_wide() {
                    self.collapse_all();
                }
            }
            NavEvent::CloseNavigation => {
                if mode.is_narrow() && self.menu_open {
                    self.close_menu();
                }
            }
        }
        Ok(NavEffect::default())
    }

    fn handle_key(&mut self, key: Key, focused: Option<usize>) -> HeaderResult<NavEffect> {
        match key {
            Key::Enter | Key::Space => {
                let Some(index) = focused else {
                    return Ok(NavEffect::default());
                };
                self.check_index(index)?;
                if self.sections[index].has_submenu() {
                    let was_expanded = self.is_expanded(index);
                    self.collapse_all();
                    if !was_expanded {
                        self.expanded = Some(index);
                    }
                }
                Ok(NavEffect::default())
            }
            Key::Escape => {
                if self.mode.is_narrow() && self.menu_open {
                    self.close_menu();
                    return Ok(NavEffect::focus(FocusTarget::Hamburger));
                }
                if let Some(index) = self.expanded {
                    self.collapse_all();
                    return Ok(NavEffect::focus(FocusTarget::Section(index)));
                }
                Ok(NavEffect::default())
            }
            Key::Other => Ok(NavEffect::default()),
        }
    }

    /// Render each section's attributes
    #[must_use]
    pub fn project_sections(&self) -> Vec<SectionProjection> {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let nav_drop = section.has_submenu();
                SectionProjection {
                    label: section.label.clone(),
                    nav_drop,
                    aria_expanded: self.is_expanded(index),
                    active: section.active,
                    tabindex: (nav_drop && self.mode.is_wide()).then_some(0),
                }
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> HeaderResult<()> {
        if index < self.sections.len() {
            Ok(())
        } else {
            Err(HeaderError::SectionOutOfRange(index))
        }
    }

    fn collapse_all(&mut self) {
        self.expanded = None;
    }

    fn clear_active(&mut self) {
        for section in &mut self.sections {
            section.active = false;
        }
    }

    fn open_menu(&mut self) {
        self.collapse_all();
        self.clear_active();
        self.menu_open = true;
    }

    fn close_menu(&mut self) {
        self.collapse_all();
        self.clear_active();
        self.menu_open = false;
    }

    fn reset(&mut self) {
        self.close_menu();
    }
}
