// Reflexbox — Game Session
//
// Calibrates once, then runs rounds back to back until one fails. There is
// no win condition: the game is endurance-based and ends only on a wrong
// move or a timeout.

use crate::config::GameConfig;
use crate::events::{Difficulty, Move, RoundOutcome};
use crate::game::fusion::InputFusion;
use crate::game::gesture::GestureClassifier;
use crate::game::input::DiscreteInputMonitor;
use crate::game::round::RoundController;
use crate::game::signal::{self, SignalConditioner};
use crate::hal::{Accelerometer, Clock, PushButton, RotaryInput, StatusIndicator, TextPanel};
use crate::rng::XorShift32;

pub struct GameSession<A, E, B, P, L, C>
where
    A: Accelerometer,
    E: RotaryInput,
    B: PushButton,
    P: TextPanel,
    L: StatusIndicator,
    C: Clock,
{
    cfg: GameConfig,
    timeout_ms: u64,
    accel: A,
    conditioner: SignalConditioner,
    fusion: InputFusion<E, B>,
    panel: P,
    indicator: L,
    clock: C,
    rng: XorShift32,
}

impl<A, E, B, P, L, C> GameSession<A, E, B, P, L, C>
where
    A: Accelerometer,
    E: RotaryInput,
    B: PushButton,
    P: TextPanel,
    L: StatusIndicator,
    C: Clock,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cfg: GameConfig,
        difficulty: Difficulty,
        accel: A,
        encoder: E,
        button: B,
        panel: P,
        indicator: L,
        clock: C,
        seed: u32,
    ) -> Self {
        let monitor = DiscreteInputMonitor::new(encoder, button);
        let gesture = GestureClassifier::new(&cfg);
        let conditioner = SignalConditioner::new(cfg.filter_alpha, Default::default());
        Self {
            timeout_ms: difficulty.timeout_ms(),
            cfg,
            accel,
            conditioner,
            fusion: InputFusion::new(monitor, gesture),
            panel,
            indicator,
            clock,
            rng: XorShift32::new(seed),
        }
    }

    /// Play until the first failed round. Returns once "Game Over!" has been
    /// presented.
    pub fn run(&mut self) -> anyhow::Result<()> {
        log::info!("Session start — calibrating, hold still");
        let offset = signal::calibrate(&mut self.accel, &self.clock, &self.cfg);
        self.conditioner = SignalConditioner::new(self.cfg.filter_alpha, offset);

        loop {
            let prompt = self.pick_prompt();
            let mut round = RoundController::new(
                &self.cfg,
                self.timeout_ms,
                &self.clock,
                &mut self.accel,
                &mut self.conditioner,
                &mut self.fusion,
                &mut self.panel,
                &mut self.indicator,
            );

            match round.play(prompt)? {
                RoundOutcome::Matched => log::info!("Round cleared"),
                RoundOutcome::Mismatched(actual) => {
                    log::info!("Wrong move {:?} for prompt {:?} — game over", actual, prompt);
                    return Ok(());
                }
                RoundOutcome::TimedOut => {
                    log::info!("No response within {} ms — game over", self.timeout_ms);
                    return Ok(());
                }
            }
        }
    }

    fn pick_prompt(&mut self) -> Move {
        pick_prompt(&mut self.rng)
    }
}

/// Uniform draw over the four prompts, independent of history — repeats are
/// allowed.
fn pick_prompt(rng: &mut XorShift32) -> Move {
    Move::ALL[(rng.next_u32() % Move::ALL.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_prompt_is_reachable() {
        let mut rng = XorShift32::new(7);
        let mut seen = [false; 4];
        for _ in 0..100 {
            let mv = pick_prompt(&mut rng);
            seen[Move::ALL.iter().position(|m| *m == mv).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s), "not all prompts drawn: {:?}", seen);
    }
}
