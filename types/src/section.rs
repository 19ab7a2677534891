//! Section identity and measured geometry.
//!
//! A page is a sequence of sections. The renderer measures where each
//! section lands in the laid-out document every frame, so bounds here are
//! always a snapshot of the current layout, never a cached guess.

use std::fmt;

/// Identifier of a page section, derived from its heading text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    /// Wrap an already-slugged identifier.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive an identifier from heading text (`"Work History"` -> `work-history`).
    #[must_use]
    pub fn from_heading(text: &str) -> Self {
        Self(slugify(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Lowercase slug: alphanumeric runs joined by single hyphens.
/// Accented letters survive (Spanish headings keep their identity).
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Vertical extent of one section in the rendered document.
///
/// `top` is measured from the top of the document (not the viewport), in
/// terminal rows. The occupied interval is half-open: `[top, top + height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    id: SectionId,
    top: u16,
    height: u16,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: SectionId, top: u16, height: u16) -> Self {
        Self { id, top, height }
    }

    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    #[must_use]
    pub fn top(&self) -> u16 {
        self.top
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Whether `row` falls inside the half-open interval `[top, top + height)`.
    ///
    /// Row math runs in `u32` so `top + height` cannot wrap; a zero-height
    /// section contains nothing.
    #[must_use]
    pub fn contains(&self, row: u32) -> bool {
        let top = u32::from(self.top);
        row >= top && row < top + u32::from(self.height)
    }
}

/// Everything the renderer measured about the current frame's layout.
///
/// Produced fresh by the TUI on every draw and handed to the app, so the
/// scroll-spy always works against what is actually on screen, including
/// after resizes and content reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Rows occupied by the fixed header above the document pane.
    pub header_height: u16,
    /// Rows the document pane has on screen.
    pub viewport_height: u16,
    /// Total rows of the laid-out document at the current width.
    pub content_height: u16,
    /// Per-section extents, in document order.
    pub sections: Vec<SectionBounds>,
}
