// Reflexbox — Game Core
//
// Hardware-independent game logic. Data flows one way per tick:
//
//   accel → signal → gesture ─┐
//   encoder/button → input ───┴→ fusion → round → session

pub mod fusion;
pub mod gesture;
pub mod input;
pub mod menu;
pub mod round;
pub mod session;
pub mod signal;
