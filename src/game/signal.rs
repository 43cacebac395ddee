// Reflexbox — Signal Conditioning
//
// Turns raw 3-axis acceleration into a smoothed pitch angle: bias correction
// from the session-start calibration, arctangent pitch extraction, then an
// exponential moving average. Incremental, O(1) per sample.

use crate::config::GameConfig;
use crate::hal::{Accelerometer, Clock};

/// Resting-orientation bias on the x and y channels, averaged once per
/// session while the player holds the device still. z is left untouched —
/// it carries the gravity component the pitch formula needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationOffset {
    pub x: f32,
    pub y: f32,
}

impl CalibrationOffset {
    pub fn apply(&self, sample: [f32; 3]) -> [f32; 3] {
        [sample[0] - self.x, sample[1] - self.y, sample[2]]
    }
}

/// Forward/backward tilt angle in degrees: atan2 of the y axis against the
/// combined magnitude of the other two.
pub fn pitch_degrees(ax: f32, ay: f32, az: f32) -> f32 {
    ay.atan2((ax * ax + az * az).sqrt()).to_degrees()
}

/// Owns the one persistent filter scalar. Created after calibration, updated
/// exactly once per polling tick.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    alpha: f32,
    offset: CalibrationOffset,
    filtered: f32,
}

impl SignalConditioner {
    pub fn new(alpha: f32, offset: CalibrationOffset) -> Self {
        Self { alpha, offset, filtered: 0.0 }
    }

    /// Condition one raw sample and return the new filtered pitch.
    pub fn process(&mut self, sample: [f32; 3]) -> f32 {
        let [x, y, z] = self.offset.apply(sample);
        let raw = pitch_degrees(x, y, z);
        self.filtered = self.alpha * raw + (1.0 - self.alpha) * self.filtered;
        self.filtered
    }

    pub fn filtered(&self) -> f32 {
        self.filtered
    }
}

/// Average `calibration_samples` readings of the x and y channels while the
/// device rests in its reference orientation (~0.5 s with defaults).
///
/// Failed reads are logged and skipped; if nothing could be read at all the
/// offset stays zero and the session runs uncalibrated.
pub fn calibrate(
    accel: &mut dyn Accelerometer,
    clock: &dyn Clock,
    cfg: &GameConfig,
) -> CalibrationOffset {
    let mut sum_x = 0.0f32;
    let mut sum_y = 0.0f32;
    let mut good = 0u32;

    for _ in 0..cfg.calibration_samples {
        match accel.read() {
            Ok([x, y, _]) => {
                sum_x += x;
                sum_y += y;
                good += 1;
            }
            Err(e) => log::warn!("Calibration sample failed: {}", e),
        }
        clock.sleep_ms(cfg.calibration_interval_ms);
    }

    if good == 0 {
        log::warn!("Calibration read no samples — running with zero offset");
        return CalibrationOffset::default();
    }

    let offset = CalibrationOffset {
        x: sum_x / good as f32,
        y: sum_y / good as f32,
    };
    log::info!(
        "Calibrated over {} samples: x̄={:.3} ȳ={:.3}",
        good,
        offset.x,
        offset.y
    );
    offset
}
