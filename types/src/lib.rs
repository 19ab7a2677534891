//! Core domain types for Brochure.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod locale;
mod nav;
mod notice;
mod scroll;
mod section;
pub mod ui;

pub use locale::{INDEX_SLUG, Locale, PagePath, toggle_locale_path};
pub use nav::{NavLink, NavMenu, PanelState};
pub use notice::NoticeModal;
pub use scroll::DocScroll;
pub use section::{DocumentLayout, SectionBounds, SectionId, slugify};
