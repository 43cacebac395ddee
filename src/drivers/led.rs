// Reflexbox — WS2812 Status Pixel Driver
//
// Single NeoPixel driven by the RMT peripheral. Each of the 24 GRB bits is
// encoded as a high/low pulse pair; the whole frame is sent blocking.

use std::time::Duration;

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::config::TransmitConfig;
use esp_idf_hal::rmt::{FixedLengthSignal, PinState, Pulse, RmtChannel, TxRmtDriver};

use crate::config::PIXEL_BRIGHTNESS;
use crate::hal::{Rgb, StatusIndicator};

pub struct StatusPixel<'d> {
    tx: TxRmtDriver<'d>,
}

impl<'d> StatusPixel<'d> {
    pub fn new(
        channel: impl Peripheral<P = impl RmtChannel> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
    ) -> anyhow::Result<Self> {
        let config = TransmitConfig::new().clock_divider(1);
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self { tx })
    }
}

impl<'d> StatusIndicator for StatusPixel<'d> {
    fn set_color(&mut self, color: Rgb) -> anyhow::Result<()> {
        // Dim in software; full drive is blinding up close.
        let scale = |v: u8| (v as f32 * PIXEL_BRIGHTNESS) as u32;
        let grb: u32 = (scale(color.g) << 16) | (scale(color.r) << 8) | scale(color.b);

        let ticks_hz = self.tx.counter_clock()?;
        let t0h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(350))?;
        let t0l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(800))?;
        let t1h = Pulse::new_with_duration(ticks_hz, PinState::High, &Duration::from_nanos(700))?;
        let t1l = Pulse::new_with_duration(ticks_hz, PinState::Low, &Duration::from_nanos(600))?;

        let mut signal = FixedLengthSignal::<24>::new();
        for i in (0..24).rev() {
            let bit_set = (grb >> i) & 1 != 0;
            let (high, low) = if bit_set { (t1h, t1l) } else { (t0h, t0l) };
            signal.set(23 - i, &(high, low))?;
        }
        self.tx.start_blocking(&signal)?;
        Ok(())
    }
}
