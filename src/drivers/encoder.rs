// Reflexbox — Rotary Encoder Driver
//
// Polled quadrature decoder on two pull-up GPIOs. `update` consumes raw
// transitions (with a short debounce window); `position` reports detents,
// i.e. accumulated pulses divided by pulses-per-detent.

use std::time::{Duration, Instant};

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use crate::config::{ENCODER_DEBOUNCE_MS, ENCODER_PULSES_PER_DETENT};
use crate::hal::RotaryInput;

// Gray-code transition table, indexed by (previous state << 2) | current.
// +1 for clockwise steps, -1 for counter-clockwise, 0 for bounce/illegal.
const QUAD_STEPS: [i32; 16] = [0, 1, -1, 0, -1, 0, 0, 1, 1, 0, 0, -1, 0, -1, 1, 0];

pub struct RotaryEncoder<'d> {
    pin_a: PinDriver<'d, AnyInputPin, Input>,
    pin_b: PinDriver<'d, AnyInputPin, Input>,
    last_state: u8,
    pulses: i32,
    last_transition: Instant,
    debounce: Duration,
    pulses_per_detent: i32,
}

impl<'d> RotaryEncoder<'d> {
    pub fn new(
        pin_a: PinDriver<'d, AnyInputPin, Input>,
        pin_b: PinDriver<'d, AnyInputPin, Input>,
    ) -> Self {
        let last_state = Self::read_state(&pin_a, &pin_b);
        Self {
            pin_a,
            pin_b,
            last_state,
            pulses: 0,
            last_transition: Instant::now(),
            debounce: Duration::from_millis(ENCODER_DEBOUNCE_MS),
            pulses_per_detent: ENCODER_PULSES_PER_DETENT,
        }
    }

    fn read_state(
        pin_a: &PinDriver<'d, AnyInputPin, Input>,
        pin_b: &PinDriver<'d, AnyInputPin, Input>,
    ) -> u8 {
        ((pin_a.is_high() as u8) << 1) | (pin_b.is_high() as u8)
    }
}

impl<'d> RotaryInput for RotaryEncoder<'d> {
    fn update(&mut self) {
        let state = Self::read_state(&self.pin_a, &self.pin_b);
        if state == self.last_state {
            return;
        }

        let now = Instant::now();
        if now.duration_since(self.last_transition) >= self.debounce {
            self.pulses += QUAD_STEPS[((self.last_state << 2) | state) as usize];
        }
        self.last_state = state;
        self.last_transition = now;
    }

    fn position(&self) -> i32 {
        self.pulses / self.pulses_per_detent
    }
}
