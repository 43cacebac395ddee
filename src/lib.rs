// Reflexbox — Reflex Game Core
//
// A "Bop It"-style reflex game: the player answers a random prompt
// ("Twist it!", "Push it!", "Forward!", "Backward!") with the matching
// physical action before the difficulty timeout runs out. A wrong move or a
// timeout ends the game.
//
// The game core (signal conditioning, input debouncing, gesture latching,
// input fusion, round/session state machines) is hardware-independent and
// talks to peripherals through the seams in `hal`. The ESP32 drivers are
// compiled only with the `esp32` feature.

pub mod config;
pub mod events;
pub mod game;
pub mod hal;
pub mod rng;

#[cfg(feature = "esp32")]
pub mod drivers;
