//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod modal;
mod panel;
mod view_state;

pub use animation::AnimPhase;
pub use modal::ModalEffect;
pub use panel::{PanelEffect, PanelEffectKind};
pub use view_state::{UiOptions, ViewState};
