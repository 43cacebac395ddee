// Reflexbox — Push Button Input
//
// Thin level-read wrapper over the encoder's push switch (pull-up, active
// LOW). Edge detection and debouncing live in the game core's input monitor.

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use crate::hal::PushButton;

pub struct UserButton {
    pin: PinDriver<'static, AnyInputPin, Input>,
}

impl UserButton {
    pub fn new(pin: PinDriver<'static, AnyInputPin, Input>) -> Self {
        Self { pin }
    }
}

impl PushButton for UserButton {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
