//! Navigation panel state machine and scroll-spy.
//!
//! The collapsible navigation rail has exactly two states, and the visible
//! panel and its toggle control must never disagree about which one holds.
//! The scroll-spy derives the single highlighted link from the measured
//! document geometry; it never stores geometry of its own.

use crate::section::{SectionBounds, SectionId};

/// Visibility of the collapsible navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, PanelState::Open)
    }
}

/// One entry in the navigation panel.
///
/// Links that anchor to a section carry its id; links without an anchor
/// (plain page links) are never highlighted by the scroll-spy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    label: String,
    fragment: Option<SectionId>,
}

impl NavLink {
    #[must_use]
    pub fn to_section(label: impl Into<String>, section: SectionId) -> Self {
        Self {
            label: label.into(),
            fragment: Some(section),
        }
    }

    #[must_use]
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fragment: None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&SectionId> {
        self.fragment.as_ref()
    }
}

/// Navigation panel state plus the scroll-spy result.
///
/// All operations are total: they accept any input, mutate state, and
/// never fail. Absent links or sections degrade to "nothing highlighted".
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    panel: PanelState,
    /// Expanded flag mirrored onto the toggle control. Updated in lockstep
    /// with `panel` on every transition.
    toggle_expanded: bool,
    links: Vec<NavLink>,
    /// Keyboard cursor within the open panel.
    selected: usize,
    active: Option<SectionId>,
}

impl NavMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Panel visibility
    // ------------------------------------------------------------------

    /// Invert the panel state and mirror the new value onto the toggle.
    pub fn toggle_visibility(&mut self) {
        self.apply_visibility(!self.panel.is_open());
    }

    /// Write an explicit visibility. Idempotent.
    pub fn set_visibility(&mut self, visible: bool) {
        self.apply_visibility(visible);
    }

    /// A link was activated: an open panel closes, a closed one stays put.
    pub fn on_link_activated(&mut self) {
        if self.panel.is_open() {
            self.set_visibility(false);
        }
    }

    fn apply_visibility(&mut self, visible: bool) {
        self.panel = if visible {
            PanelState::Open
        } else {
            PanelState::Closed
        };
        self.toggle_expanded = visible;
    }

    #[must_use]
    pub fn panel(&self) -> PanelState {
        self.panel
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.panel.is_open()
    }

    /// Expanded state as shown on the toggle control.
    #[must_use]
    pub fn toggle_expanded(&self) -> bool {
        self.toggle_expanded
    }

    // ------------------------------------------------------------------
    // Links and selection
    // ------------------------------------------------------------------

    /// Replace the link list (on page change). The cursor snaps back into
    /// range and the highlight is recomputed by the next layout pass.
    pub fn set_links(&mut self, links: Vec<NavLink>) {
        self.links = links;
        self.selected = 0;
        self.active = None;
    }

    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.links.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.links.len();
    }

    pub fn select_prev(&mut self) {
        if self.links.is_empty() {
            return;
        }
        self.selected = self.selected.checked_sub(1).unwrap_or(self.links.len() - 1);
    }

    // ------------------------------------------------------------------
    // Scroll-spy
    // ------------------------------------------------------------------

    /// Recompute which section is active for the current scroll position.
    ///
    /// The probe row is `scroll_offset + header_height + 1`: one row past
    /// the bottom edge of the fixed header. A section matches when the
    /// probe falls inside its half-open interval `[top, top + height)`.
    /// Sections are scanned in document order and the last match wins, so
    /// with overlapping bounds the later section takes the highlight. No
    /// match clears it.
    pub fn recompute_active_section(
        &mut self,
        scroll_offset: u16,
        header_height: u16,
        sections: &[SectionBounds],
    ) {
        let probe = u32::from(scroll_offset) + u32::from(header_height) + 1;
        let mut active = None;
        for section in sections {
            if section.contains(probe) {
                active = Some(section.id().clone());
            }
        }
        self.active = active;
    }

    /// Id of the currently active section, if the probe row hit one.
    #[must_use]
    pub fn active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    /// Index of the single highlighted link: the first link whose fragment
    /// names the active section. `None` when no section is active or no
    /// link anchors to it.
    #[must_use]
    pub fn highlighted_link(&self) -> Option<usize> {
        let active = self.active.as_ref()?;
        self.links
            .iter()
            .position(|link| link.fragment() == Some(active))
    }
}
