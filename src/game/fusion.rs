// Reflexbox — Input Fusion
//
// Combines the discrete monitor and the tilt classifier into a single move
// per tick. Both sources are polled exactly once per tick — the classifier
// must run even when a push or twist already fired, because its latch
// transitions are side effects that may not be skipped.

use crate::events::Move;
use crate::game::gesture::GestureClassifier;
use crate::game::input::{DiscreteInputMonitor, DiscreteEvents};
use crate::hal::{PushButton, RotaryInput};

pub struct InputFusion<E: RotaryInput, B: PushButton> {
    monitor: DiscreteInputMonitor<E, B>,
    gesture: GestureClassifier,
}

impl<E: RotaryInput, B: PushButton> InputFusion<E, B> {
    pub fn new(monitor: DiscreteInputMonitor<E, B>, gesture: GestureClassifier) -> Self {
        Self { monitor, gesture }
    }

    /// Per-round reset: rotation is measured relative to round start. The
    /// tilt latch deliberately carries over.
    pub fn begin_round(&mut self) {
        self.monitor.reset_baseline();
    }

    /// Forced tilt re-arm after a matched round.
    pub fn reset_gesture(&mut self) {
        self.gesture.reset();
    }

    /// The tick's single move, if any. Tie-break when several inputs fire in
    /// the same tick is fixed: Push > Twist > Forward > Backward.
    pub fn tick(&mut self, filtered_pitch: f32) -> Option<Move> {
        let DiscreteEvents { pushed, twisted } = self.monitor.poll();
        let tilt = self.gesture.classify(filtered_pitch);

        if pushed {
            return Some(Move::Push);
        }
        if twisted {
            return Some(Move::Twist);
        }
        tilt
    }
}
