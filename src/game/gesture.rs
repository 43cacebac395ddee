// Reflexbox — Tilt Gesture Classifier
//
// Latch-based detection of forward/backward tilt excursions. A direction
// fires at most once per excursion: the latch re-arms only when the filtered
// pitch returns to the neutral band. The band between the exit and trigger
// angles is a dead zone where the state simply holds.

use crate::config::GameConfig;
use crate::events::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tilt {
    Neutral,
    Forward,
    Backward,
}

pub struct GestureClassifier {
    forward_angle: f32,
    backward_angle: f32,
    exit_angle: f32,
    state: Tilt,
}

impl GestureClassifier {
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            forward_angle: cfg.forward_angle_deg,
            backward_angle: cfg.backward_angle_deg,
            exit_angle: cfg.exit_angle_deg,
            state: Tilt::Neutral,
        }
    }

    /// Evaluate one filtered pitch sample. Must be called every tick — the
    /// neutral re-arm is a silent side effect of this check.
    pub fn classify(&mut self, pitch: f32) -> Option<Move> {
        if pitch > self.forward_angle && self.state != Tilt::Forward {
            self.state = Tilt::Forward;
            return Some(Move::Forward);
        }
        if pitch < self.backward_angle && self.state != Tilt::Backward {
            self.state = Tilt::Backward;
            return Some(Move::Backward);
        }
        if pitch > -self.exit_angle && pitch < self.exit_angle {
            self.state = Tilt::Neutral;
        }
        None
    }

    /// Forced re-arm, regardless of the physical position. Applied after a
    /// matched round.
    pub fn reset(&mut self) {
        self.state = Tilt::Neutral;
    }

    pub fn state(&self) -> Tilt {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(&GameConfig::default())
    }

    #[test]
    fn one_event_per_forward_excursion() {
        let mut c = classifier();
        // Rise through the dead zone, cross the trigger, hold, come back.
        assert_eq!(c.classify(10.0), None);
        assert_eq!(c.classify(20.0), None);
        assert_eq!(c.classify(30.0), Some(Move::Forward));
        assert_eq!(c.classify(40.0), None); // latched
        assert_eq!(c.classify(30.0), None);
        assert_eq!(c.classify(10.0), None); // dead zone: still latched
        assert_eq!(c.classify(2.0), None);  // neutral band: silent re-arm
        assert_eq!(c.state(), Tilt::Neutral);
        assert_eq!(c.classify(30.0), Some(Move::Forward));
    }

    #[test]
    fn backward_is_symmetric() {
        let mut c = classifier();
        assert_eq!(c.classify(-30.0), Some(Move::Backward));
        assert_eq!(c.classify(-40.0), None);
        assert_eq!(c.classify(-1.0), None);
        assert_eq!(c.classify(-30.0), Some(Move::Backward));
    }

    #[test]
    fn dead_zone_oscillation_emits_nothing() {
        let mut c = classifier();
        for pitch in [10.0, 20.0, 8.0, 24.0, 6.0, 15.0] {
            assert_eq!(c.classify(pitch), None);
        }
        assert_eq!(c.state(), Tilt::Neutral);
    }

    #[test]
    fn opposite_direction_fires_without_neutral_return() {
        // The latch only blocks re-firing the same direction; a swing from
        // forward straight to backward is a new event.
        let mut c = classifier();
        assert_eq!(c.classify(30.0), Some(Move::Forward));
        assert_eq!(c.classify(-30.0), Some(Move::Backward));
        assert_eq!(c.classify(30.0), Some(Move::Forward));
    }

    #[test]
    fn reset_rearms_while_still_tilted() {
        let mut c = classifier();
        assert_eq!(c.classify(30.0), Some(Move::Forward));
        c.reset();
        assert_eq!(c.classify(30.0), Some(Move::Forward));
    }

    #[test]
    fn trigger_threshold_is_exclusive() {
        let mut c = classifier();
        assert_eq!(c.classify(25.0), None);
        assert_eq!(c.classify(25.1), Some(Move::Forward));
    }
}
