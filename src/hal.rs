// Reflexbox — Peripheral Seams
//
// Narrow traits between the game core and the hardware drivers. The core is
// written against these so it can run on the host with scripted peripherals;
// the `drivers` module provides the ESP32 implementations.

use std::time::Instant;

/// 3-axis accelerometer. Axes follow the pitch convention: y is the tilt
/// axis, gravity is read on z when the device rests flat.
pub trait Accelerometer {
    /// One `[x, y, z]` reading in m/s².
    fn read(&mut self) -> anyhow::Result<[f32; 3]>;
}

/// Absolute-position rotary encoder. `update` must be called before each
/// `position` read so the driver can process pending quadrature transitions.
pub trait RotaryInput {
    fn update(&mut self);
    fn position(&self) -> i32;
}

/// Momentary push button, pull-up wiring: HIGH = released, LOW = pressed.
pub trait PushButton {
    fn is_high(&self) -> bool;
}

/// Text output surface. Layout (centering) is the implementation's business.
pub trait TextPanel {
    fn show_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Status light with no feedback path into the game.
pub trait StatusIndicator {
    fn set_color(&mut self, color: Rgb) -> anyhow::Result<()>;
}

/// Monotonic time source plus the only blocking primitive the game uses.
/// Injected so round timing can be driven by a simulated clock under test.
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&self, ms: u64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Wall-clock implementation backed by `std::time::Instant` (monotonic on
/// both the host and esp-idf).
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
