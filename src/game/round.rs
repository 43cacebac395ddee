// Reflexbox — Round Controller
//
// One prompt-and-response cycle: Prompting → Polling → Resolved. Polling is
// a cooperative busy loop with a minimal yield; the three exit conditions
// are checked in a fixed order (match, mismatch, timeout) every tick.

use crate::config::{GameConfig, COLOR_ACTIVE, COLOR_FAILURE, COLOR_GAME_OVER, COLOR_SUCCESS};
use crate::events::{Move, RoundOutcome};
use crate::game::fusion::InputFusion;
use crate::game::signal::SignalConditioner;
use crate::hal::{Accelerometer, Clock, PushButton, RotaryInput, StatusIndicator, TextPanel};

pub struct RoundController<'d, E: RotaryInput, B: PushButton> {
    cfg: &'d GameConfig,
    timeout_ms: u64,
    clock: &'d dyn Clock,
    accel: &'d mut dyn Accelerometer,
    conditioner: &'d mut SignalConditioner,
    fusion: &'d mut InputFusion<E, B>,
    panel: &'d mut dyn TextPanel,
    indicator: &'d mut dyn StatusIndicator,
}

impl<'d, E: RotaryInput, B: PushButton> RoundController<'d, E, B> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cfg: &'d GameConfig,
        timeout_ms: u64,
        clock: &'d dyn Clock,
        accel: &'d mut dyn Accelerometer,
        conditioner: &'d mut SignalConditioner,
        fusion: &'d mut InputFusion<E, B>,
        panel: &'d mut dyn TextPanel,
        indicator: &'d mut dyn StatusIndicator,
    ) -> Self {
        Self { cfg, timeout_ms, clock, accel, conditioner, fusion, panel, indicator }
    }

    /// Run one round for the given prompt and return its outcome, including
    /// the player-facing result presentation.
    pub fn play(&mut self, prompt: Move) -> anyhow::Result<RoundOutcome> {
        // ---- Prompting ----
        self.fusion.begin_round();
        self.panel.show_text(prompt.prompt_text())?;
        self.indicator.set_color(COLOR_ACTIVE)?;
        let start = self.clock.now_ms();
        log::info!("Round: {:?} ({} ms window)", prompt, self.timeout_ms);

        // ---- Polling ----
        loop {
            let pitch = match self.accel.read() {
                Ok(sample) => self.conditioner.process(sample),
                Err(e) => {
                    // Same policy as any sensor hiccup: log, skip the tick.
                    // The wall-clock exit still applies — a dead sensor must
                    // not stall the round forever.
                    log::warn!("Accelerometer read failed: {}", e);
                    if self.clock.now_ms().saturating_sub(start) > self.timeout_ms {
                        return self.resolve_failure("Times Up!", RoundOutcome::TimedOut);
                    }
                    self.clock.sleep_ms(self.cfg.poll_yield_ms);
                    continue;
                }
            };

            if let Some(actual) = self.fusion.tick(pitch) {
                if actual == prompt {
                    return self.resolve_matched();
                }
                return self.resolve_failure("Wrong move!", RoundOutcome::Mismatched(actual));
            }

            if self.clock.now_ms().saturating_sub(start) > self.timeout_ms {
                return self.resolve_failure("Times Up!", RoundOutcome::TimedOut);
            }

            self.clock.sleep_ms(self.cfg.poll_yield_ms);
        }
    }

    fn resolve_matched(&mut self) -> anyhow::Result<RoundOutcome> {
        self.indicator.set_color(COLOR_SUCCESS)?;
        self.panel.show_text("Nice!")?;
        self.clock.sleep_ms(self.cfg.success_dwell_ms);
        // Forced re-arm so a held tilt cannot shadow the next round.
        self.fusion.reset_gesture();
        Ok(RoundOutcome::Matched)
    }

    fn resolve_failure(
        &mut self,
        message: &str,
        outcome: RoundOutcome,
    ) -> anyhow::Result<RoundOutcome> {
        self.indicator.set_color(COLOR_FAILURE)?;
        self.panel.show_text(message)?;
        self.clock.sleep_ms(self.cfg.failure_dwell_ms);
        self.panel.show_text("Game Over!")?;
        self.indicator.set_color(COLOR_GAME_OVER)?;
        Ok(outcome)
    }
}
