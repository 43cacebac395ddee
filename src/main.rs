// Reflexbox — Firmware Entry Point
//
// Boot sequence:
//   1. Bring up logging and the shared I2C bus.
//   2. Display the "Reflexbox" title for 1 second.
//   3. Run component self-test (OLED + ADXL345).
//   4. Difficulty menu (rotate to choose, push to confirm).
//   5. Calibrate the accelerometer and play rounds until game over.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{InputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;

use reflexbox::config::*;
use reflexbox::drivers::accel::Adxl345;
use reflexbox::drivers::button::UserButton;
use reflexbox::drivers::display::OledDisplay;
use reflexbox::drivers::encoder::RotaryEncoder;
use reflexbox::drivers::led::StatusPixel;
use reflexbox::game::menu;
use reflexbox::game::session::GameSession;
use reflexbox::hal::MonotonicClock;

fn main() -> anyhow::Result<()> {
    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Reflexbox firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (shared between OLED and ADXL345) ------------------------
    let i2c_config = I2cConfig::new().baudrate(400u32.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // The bus lives for the entire programme duration (firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    // ---- Display + title splash -------------------------------------------
    let mut display = OledDisplay::new(i2c_bus);
    display.init()?;
    display.show_centered_text("Reflexbox")?;
    thread::sleep(Duration::from_millis(BOOT_TEXT_DISPLAY_MS));

    // ---- Component self-test ----------------------------------------------
    let accel = Adxl345::new(i2c_bus);
    let oled_ok = display.is_connected();
    let accel_ok = accel.is_connected();
    if !oled_ok || !accel_ok {
        log::error!("Boot check FAILED — OLED:{} ADXL345:{}", oled_ok, accel_ok);
        // Continue anyway so we can still debug via serial.
    }
    accel.init()?;

    // ---- Input GPIOs (pull-up, active LOW) --------------------------------
    let button_pin = PinDriver::input(peripherals.pins.gpio3.downgrade_input())?;
    let encoder_a = PinDriver::input(peripherals.pins.gpio8.downgrade_input())?;
    let encoder_b = PinDriver::input(peripherals.pins.gpio9.downgrade_input())?;
    for pin in [PIN_BUTTON, PIN_ENCODER_A, PIN_ENCODER_B] {
        configure_pullup(pin);
    }

    let mut button = UserButton::new(button_pin);
    let mut encoder = RotaryEncoder::new(encoder_a, encoder_b);
    let pixel = StatusPixel::new(peripherals.rmt.channel0, peripherals.pins.gpio10)?;

    let clock = MonotonicClock::new();

    // ---- Difficulty menu --------------------------------------------------
    let difficulty = menu::select_difficulty(&mut encoder, &mut button, &mut display, &clock)?;

    // ---- Game session -----------------------------------------------------
    let seed = unsafe { esp_idf_sys::esp_random() };
    let mut session = GameSession::new(
        GameConfig::default(),
        difficulty,
        accel,
        encoder,
        button,
        display,
        pixel,
        clock,
        seed,
    );
    session.run()?;

    // Game over stays on screen; nothing left to do.
    log::info!("Session finished — parking");
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

/// Enable the internal pull-up on an input pin via the raw API (the drivers
/// were already constructed from downgraded pins).
fn configure_pullup(pin: i32) {
    unsafe {
        esp_idf_sys::gpio_set_pull_mode(pin, esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY);
    }
}
