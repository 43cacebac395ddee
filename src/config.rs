// Reflexbox — Hardware & Game Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

use crate::hal::Rgb;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON: i32 = 3;    // D1 — Encoder push button (INPUT_PULLUP, active LOW)
pub const PIN_I2C_SDA: i32 = 6;   // D4 — I2C data line
pub const PIN_I2C_SCL: i32 = 7;   // D5 — I2C clock line
pub const PIN_ENCODER_A: i32 = 8; // D8 — Quadrature channel A
pub const PIN_ENCODER_B: i32 = 9; // D9 — Quadrature channel B
pub const PIN_PIXEL: i32 = 10;    // D10 — WS2812 status pixel data

// ---------------------------------------------------------------------------
// I2C Bus
// ---------------------------------------------------------------------------
pub const I2C_ADDR_ADXL345: u8 = 0x53;
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const I2C_TIMEOUT_TICKS: u32 = 1000; // FreeRTOS ticks

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

// ---------------------------------------------------------------------------
// Rotary encoder
// ---------------------------------------------------------------------------
pub const ENCODER_DEBOUNCE_MS: u64 = 3;
pub const ENCODER_PULSES_PER_DETENT: i32 = 3;

// ---------------------------------------------------------------------------
// Status pixel colors
// ---------------------------------------------------------------------------
pub const PIXEL_BRIGHTNESS: f32 = 0.03;
pub const COLOR_ACTIVE: Rgb = Rgb::new(255, 150, 0); // amber — round armed
pub const COLOR_SUCCESS: Rgb = Rgb::new(0, 255, 0);
pub const COLOR_FAILURE: Rgb = Rgb::new(255, 0, 0);
pub const COLOR_GAME_OVER: Rgb = Rgb::new(255, 255, 255);

// ---------------------------------------------------------------------------
// Difficulty menu timing (milliseconds)
// ---------------------------------------------------------------------------
pub const MENU_SPLASH_MS: u64 = 1000;     // "Select Mode" / "Chosen: X" dwell
pub const MENU_STEP_DWELL_MS: u64 = 150;  // pause after a cursor move

// ---------------------------------------------------------------------------
// Boot timing (milliseconds)
// ---------------------------------------------------------------------------
pub const BOOT_TEXT_DISPLAY_MS: u64 = 1000; // Title splash duration

/// Tunables of the round engine, hoisted out of the code so the state
/// machines can be exercised with non-default values under test.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Filtered pitch above this fires a Forward gesture (degrees).
    pub forward_angle_deg: f32,
    /// Filtered pitch below this fires a Backward gesture (degrees).
    pub backward_angle_deg: f32,
    /// Half-width of the neutral band that re-arms the tilt latch (degrees).
    pub exit_angle_deg: f32,
    /// Exponential smoothing factor for the pitch filter.
    pub filter_alpha: f32,
    /// Number of accelerometer samples averaged during calibration.
    pub calibration_samples: u32,
    /// Pause between calibration samples (ms).
    pub calibration_interval_ms: u64,
    /// Minimal yield between polling ticks (ms).
    pub poll_yield_ms: u64,
    /// How long "Nice!" stays on screen after a match (ms).
    pub success_dwell_ms: u64,
    /// How long the failure message stays up before "Game Over!" (ms).
    pub failure_dwell_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            forward_angle_deg: 25.0,
            backward_angle_deg: -25.0,
            exit_angle_deg: 5.0,
            filter_alpha: 0.2,
            calibration_samples: 50,
            calibration_interval_ms: 10,
            poll_yield_ms: 1,
            success_dwell_ms: 700,
            failure_dwell_ms: 1000,
        }
    }
}
