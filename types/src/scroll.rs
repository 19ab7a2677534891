//! Bounded vertical scrolling for the document pane.
//!
//! Offsets are terminal rows into the laid-out document. Content and
//! viewport heights are re-measured by the renderer every frame, so the
//! offset is re-clamped on every layout update rather than trusted.

/// Scroll position over the rendered document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocScroll {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl DocScroll {
    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[must_use]
    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    #[must_use]
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// Largest offset that still shows a full viewport (or the remainder).
    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    /// Fraction of the scrollable range consumed, for the scrollbar.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max == 0 {
            return 0.0;
        }
        f32::from(self.offset) / f32::from(max)
    }

    /// Adopt freshly measured dimensions and re-clamp the offset.
    pub fn update_layout(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Back to the top with no remembered dimensions (page change).
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Move by whole rows, positive scrolling down.
    pub fn scroll_lines(&mut self, delta: i16) {
        if delta == 0 || !self.is_scrollable() {
            return;
        }
        let next = (i32::from(self.offset) + i32::from(delta)).clamp(0, i32::from(self.max_offset()));
        self.offset = next as u16;
    }

    /// Move by viewport-sized steps.
    pub fn scroll_pages(&mut self, delta_pages: i16) {
        if delta_pages == 0 || self.viewport_height == 0 {
            return;
        }
        let delta = i32::from(self.viewport_height) * i32::from(delta_pages);
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        self.offset = next as u16;
    }

    /// Jump so `row` sits at the top of the viewport, clamped to bounds.
    pub fn scroll_to(&mut self, row: u16) {
        self.offset = row.min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }
}
