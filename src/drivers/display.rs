// Reflexbox — SSD1306 OLED Driver
//
// 128×64 monochrome panel on the shared I2C bus. Keeps a local framebuffer,
// renders text with embedded-graphics, and flushes the whole frame in one
// data burst. Control byte 0x00 prefixes commands, 0x40 prefixes data.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::config::*;
use crate::drivers::SharedBus;
use crate::hal::TextPanel;

// Init sequence for a 128×64 panel with internal charge pump.
const INIT_SEQUENCE: [u8; 25] = [
    0xAE,       // display off
    0xD5, 0x80, // clock divide ratio
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan direction
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // precharge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // resume from RAM
    0xA6,       // normal (non-inverted)
    0xAF,       // display on
];

pub struct OledDisplay {
    bus: SharedBus,
    buffer: [u8; DISPLAY_BUFFER_SIZE],
}

impl OledDisplay {
    pub fn new(bus: SharedBus) -> Self {
        Self { bus, buffer: [0; DISPLAY_BUFFER_SIZE] }
    }

    /// Verify the panel answers on the I2C bus.
    pub fn is_connected(&self) -> bool {
        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_OLED, &[0x00], I2C_TIMEOUT_TICKS).is_ok()
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(&INIT_SEQUENCE)?;
        self.buffer.fill(0);
        self.flush()?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    /// Clear the frame and draw `text` centered on the panel. Multi-line
    /// strings are centered per line.
    pub fn show_centered_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.buffer.fill(0);

        let char_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let layout = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        let center = Point::new(SCREEN_WIDTH as i32 / 2, SCREEN_HEIGHT as i32 / 2);

        // Drawing into the framebuffer cannot fail.
        let _ = Text::with_text_style(text, center, char_style, layout).draw(self);

        self.flush()
    }

    fn command(&mut self, cmd: &[u8]) -> anyhow::Result<()> {
        let mut msg = Vec::with_capacity(cmd.len() + 1);
        msg.push(0x00);
        msg.extend_from_slice(cmd);
        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_OLED, &msg, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        // Window the full frame, then stream the buffer.
        self.command(&[0x21, 0x00, (SCREEN_WIDTH - 1) as u8])?;
        self.command(&[0x22, 0x00, (SCREEN_HEIGHT / 8 - 1) as u8])?;

        let mut msg = Vec::with_capacity(self.buffer.len() + 1);
        msg.push(0x40);
        msg.extend_from_slice(&self.buffer);
        let mut bus = self.bus.lock().unwrap();
        bus.write(I2C_ADDR_OLED, &msg, I2C_TIMEOUT_TICKS)?;
        Ok(())
    }
}

impl OriginDimensions for OledDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for OledDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= SCREEN_WIDTH as i32
                || point.y >= SCREEN_HEIGHT as i32
            {
                continue;
            }
            let (x, y) = (point.x as usize, point.y as usize);
            let index = x + (y / 8) * SCREEN_WIDTH as usize;
            let mask = 1u8 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[index] |= mask,
                BinaryColor::Off => self.buffer[index] &= !mask,
            }
        }
        Ok(())
    }
}

impl TextPanel for OledDisplay {
    fn show_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.show_centered_text(text)
    }
}
