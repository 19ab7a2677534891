//! Animation geometry for overlays.

use ratatui::layout::Rect;

use brochure_engine::{AnimPhase, ModalEffect, PanelEffect, PanelEffectKind};

/// Scales the notice rect up from 60% of its resting size as the pop
/// effect runs.
#[must_use]
pub fn apply_modal_effect(effect: &ModalEffect, base: Rect) -> Rect {
    let t = effect.eased_progress();
    let scale = 0.6 + 0.4 * t;
    scale_rect(base, scale)
}

/// Visible width of the nav rail while a slide effect runs.
///
/// `full` is the rail's resting width. A closing rail stays on screen,
/// shrinking, until its effect completes; without an effect the rail is
/// simply there or not.
#[must_use]
pub fn panel_rail_width(effect: Option<&PanelEffect>, open: bool, full: u16) -> u16 {
    let Some(effect) = effect else {
        return if open { full } else { 0 };
    };
    let progress = match effect.phase() {
        AnimPhase::Running { progress } => progress,
        AnimPhase::Completed => 1.0,
    };
    let t = ease_out_cubic(progress);
    let visible = match effect.kind() {
        PanelEffectKind::SlideInLeft => t,
        PanelEffectKind::SlideOutLeft => 1.0 - t,
    };
    (visible * f32::from(full)).round() as u16
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}
