//! Live wide/narrow viewport signal

use tokio::sync::watch;

use crate::types::ViewportMode;

/// Tracks the viewport mode and notifies subscribers when it flips.
///
/// Reads are synchronous; callers re-read on every event instead of caching,
/// since the mode can change between two events of one interaction.
pub struct ViewportOracle {
    breakpoint_px: u32,
    sender: watch::Sender<ViewportMode>,
}

impl ViewportOracle {
    #[must_use]
    pub fn new(width_px: u32, breakpoint_px: u32) -> Self {
        let (sender, _) = watch::channel(ViewportMode::from_width(width_px, breakpoint_px));
        Self {
            breakpoint_px,
            sender,
        }
    }

    /// Current mode
    #[must_use]
    pub fn mode(&self) -> ViewportMode {
        *self.sender.borrow()
    }

    #[must_use]
    pub fn is_wide(&self) -> bool {
        self.mode().is_wide()
    }

    /// Feed a new viewport width; returns `true` when the mode changed
    pub fn set_width(&self, width_px: u32) -> bool {
        let next = ViewportMode::from_width(width_px, self.breakpoint_px);
        let changed = self.sender.send_if_modified(|mode| {
            if *mode == next {
                false
            } else {
                *mode = next;
                true
            }
        });
        if changed {
            log::debug!("Viewport mode changed to {next:?} at {width_px}px");
        }
        changed
    }

    /// Change notifications; only mode flips wake the receiver
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewportMode> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_changes_within_a_mode_do_not_notify() {
        let oracle = ViewportOracle::new(1200, 900);
        let rx = oracle.subscribe();

        assert!(!oracle.set_width(1000));
        assert!(!rx.has_changed().unwrap());

        assert!(oracle.set_width(600));
        assert!(rx.has_changed().unwrap());
        assert_eq!(oracle.mode(), ViewportMode::Narrow);
    }
}
