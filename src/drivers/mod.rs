// Reflexbox — ESP32 Peripheral Drivers

use std::sync::Mutex;

use esp_idf_hal::i2c::I2cDriver;

/// Thread-safe handle to the I2C bus shared by the OLED and the ADXL345.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

pub mod accel;
pub mod button;
pub mod display;
pub mod encoder;
pub mod led;
