// Reflexbox — ADXL345 Accelerometer Driver
//
// Register-level driver over the shared I2C bus. Full-resolution mode,
// readings converted to m/s².

use crate::config::*;
use crate::drivers::SharedBus;
use crate::hal::Accelerometer;

// ADXL345 register addresses
const REG_DEVID: u8 = 0x00;
const REG_BW_RATE: u8 = 0x2C;
const REG_POWER_CTL: u8 = 0x2D;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32; // Start of 6-byte axis burst
const DEVID_EXPECTED: u8 = 0xE5;

// Full-resolution mode: 3.9 mg/LSB on every range.
const SCALE_MS2_PER_LSB: f32 = 0.0039 * 9.80665;

pub struct Adxl345 {
    bus: SharedBus,
}

impl Adxl345 {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }

    /// Verify the device is reachable on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        let mut buf = [0u8; 1];
        match bus.write_read(I2C_ADDR_ADXL345, &[REG_DEVID], &mut buf, I2C_TIMEOUT_TICKS) {
            Ok(()) => buf[0] == DEVID_EXPECTED,
            Err(_) => false,
        }
    }

    /// Configure full resolution at 100 Hz and start measuring.
    pub fn init(&self) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap();

        // 100 Hz output data rate
        bus.write(I2C_ADDR_ADXL345, &[REG_BW_RATE, 0x0A], I2C_TIMEOUT_TICKS)?;

        // Full-resolution mode, ±4 g
        bus.write(I2C_ADDR_ADXL345, &[REG_DATA_FORMAT, 0x09], I2C_TIMEOUT_TICKS)?;

        // Measure bit on
        bus.write(I2C_ADDR_ADXL345, &[REG_POWER_CTL, 0x08], I2C_TIMEOUT_TICKS)?;

        log::info!("ADXL345 initialised (full-res ±4g, 100 Hz)");
        Ok(())
    }
}

impl Accelerometer for Adxl345 {
    /// Burst-read all 3 axes (little-endian pairs) and convert to m/s².
    fn read(&mut self) -> anyhow::Result<[f32; 3]> {
        let mut bus = self.bus.lock().unwrap();
        let mut raw = [0u8; 6];
        bus.write_read(I2C_ADDR_ADXL345, &[REG_DATAX0], &mut raw, I2C_TIMEOUT_TICKS)?;

        Ok([
            i16::from_le_bytes([raw[0], raw[1]]) as f32 * SCALE_MS2_PER_LSB,
            i16::from_le_bytes([raw[2], raw[3]]) as f32 * SCALE_MS2_PER_LSB,
            i16::from_le_bytes([raw[4], raw[5]]) as f32 * SCALE_MS2_PER_LSB,
        ])
    }
}
