//! Navigation rail animation effects.

use std::time::Duration;

use super::animation::{AnimPhase, EffectTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffectKind {
    SlideInLeft,
    SlideOutLeft,
}

/// Cosmetic slide for the nav rail. The panel's logical visibility flips
/// immediately; this only shapes how the rail reaches the screen edge.
#[derive(Debug, Clone)]
pub struct PanelEffect {
    kind: PanelEffectKind,
    timer: EffectTimer,
}

impl PanelEffect {
    #[must_use]
    pub fn slide_in_left(duration: Duration) -> Self {
        Self {
            kind: PanelEffectKind::SlideInLeft,
            timer: EffectTimer::new(duration),
        }
    }

    #[must_use]
    pub fn slide_out_left(duration: Duration) -> Self {
        Self {
            kind: PanelEffectKind::SlideOutLeft,
            timer: EffectTimer::new(duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    #[must_use]
    pub fn phase(&self) -> AnimPhase {
        self.timer.phase()
    }

    #[must_use]
    pub fn kind(&self) -> PanelEffectKind {
        self.kind
    }
}
