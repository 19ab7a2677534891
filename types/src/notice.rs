//! Dismissable notice overlay state.

/// Visibility of the notice modal.
///
/// Dismissal is exactly-once: the first call hides the modal and reports
/// it, every later call is a no-op. Showing an already-visible modal is
/// equally inert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoticeModal {
    visible: bool,
}

impl NoticeModal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the modal. Returns whether this call did the hiding.
    pub fn dismiss(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
