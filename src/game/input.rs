// Reflexbox — Discrete Input Monitor
//
// Debounced twist/push event detection, polled once per game tick. Rotation
// is measured against a per-round baseline and coalesced into at most one
// twist event per tick; the button fires on the falling edge only (pull-up,
// active LOW).

use crate::hal::{PushButton, RotaryInput};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscreteEvents {
    pub pushed: bool,
    pub twisted: bool,
}

pub struct DiscreteInputMonitor<E: RotaryInput, B: PushButton> {
    encoder: E,
    button: B,
    baseline: i32,
    last_level_high: bool,
}

impl<E: RotaryInput, B: PushButton> DiscreteInputMonitor<E, B> {
    pub fn new(mut encoder: E, button: B) -> Self {
        encoder.update();
        let baseline = encoder.position();
        let last_level_high = button.is_high();
        Self { encoder, button, baseline, last_level_high }
    }

    /// Re-anchor rotation measurement to the current position. Called at
    /// round start so rotation during the previous round's dwell is not
    /// attributed to the new round.
    pub fn reset_baseline(&mut self) {
        self.encoder.update();
        self.baseline = self.encoder.position();
    }

    /// One tick's worth of discrete input. The button level history is
    /// updated unconditionally, whether or not anything fired.
    pub fn poll(&mut self) -> DiscreteEvents {
        self.encoder.update();
        let position = self.encoder.position();
        let twisted = (position - self.baseline).abs() >= 1;
        if twisted {
            self.baseline = position;
        }

        let level_high = self.button.is_high();
        let pushed = self.last_level_high && !level_high;
        self.last_level_high = level_high;

        DiscreteEvents { pushed, twisted }
    }
}
