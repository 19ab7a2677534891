//! Notice modal animation effect.

use std::time::Duration;

use super::animation::{AnimPhase, EffectTimer};

/// Pop-scale entrance for the notice overlay.
#[derive(Debug, Clone)]
pub struct ModalEffect {
    timer: EffectTimer,
}

impl ModalEffect {
    #[must_use]
    pub fn pop_scale(duration: Duration) -> Self {
        Self {
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

    /// Eased progress for the scale curve (fast start, soft landing).
    #[must_use]
    pub fn eased_progress(&self) -> f32 {
        let p = self.timer.progress();
        1.0 - (1.0 - p) * (1.0 - p)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnimPhase, ModalEffect};
    use std::time::Duration;

    #[test]
    fn pop_scale_initial_state() {
        let effect = ModalEffect::pop_scale(Duration::from_millis(200));
        assert!(matches!(effect.phase(), AnimPhase::Running { progress } if progress < 0.1));
    }

    #[test]
    fn completed_after_duration() {
        let mut effect = ModalEffect::pop_scale(Duration::from_millis(100));
        effect.advance(Duration::from_millis(150));
        assert!(matches!(effect.phase(), AnimPhase::Completed));
    }

    #[test]
    fn zero_duration_immediately_completed() {
        let effect = ModalEffect::pop_scale(Duration::ZERO);
        assert!(matches!(effect.phase(), AnimPhase::Completed));
    }

    #[test]
    fn easing_lands_on_one() {
        let mut effect = ModalEffect::pop_scale(Duration::from_millis(100));
        effect.advance(Duration::from_millis(100));
        assert!((effect.eased_progress() - 1.0).abs() < f32::EPSILON);
    }
}
