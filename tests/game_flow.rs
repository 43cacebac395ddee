// Reflexbox — End-to-End Game Flow Tests
//
// Rounds and sessions driven entirely by a simulated clock: every poll
// yield and dwell advances simulated time, so scenarios are deterministic
// down to the millisecond. Peripherals are scripted as functions of time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reflexbox::config::{GameConfig, COLOR_GAME_OVER, COLOR_SUCCESS};
use reflexbox::events::{Difficulty, Move, RoundOutcome};
use reflexbox::game::fusion::InputFusion;
use reflexbox::game::gesture::GestureClassifier;
use reflexbox::game::input::DiscreteInputMonitor;
use reflexbox::game::round::RoundController;
use reflexbox::game::session::GameSession;
use reflexbox::game::signal::SignalConditioner;
use reflexbox::hal::{
    Accelerometer, Clock, PushButton, Rgb, RotaryInput, StatusIndicator, TextPanel,
};

const FLAT: [f32; 3] = [0.0, 0.0, 9.81]; // device at rest, pitch 0
const NOSE_UP: [f32; 3] = [0.0, 9.81, 0.0]; // pitch 90°

// ---------------------------------------------------------------------------
// Scripted fakes
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct SimClock(Rc<Cell<u64>>);

impl SimClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(0)))
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
    fn sleep_ms(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

struct ScriptedAccel {
    clock: SimClock,
    script: fn(u64) -> [f32; 3],
}

impl Accelerometer for ScriptedAccel {
    fn read(&mut self) -> anyhow::Result<[f32; 3]> {
        Ok((self.script)(self.clock.now_ms()))
    }
}

struct ScriptedEncoder {
    clock: SimClock,
    script: fn(u64) -> i32,
}

impl RotaryInput for ScriptedEncoder {
    fn update(&mut self) {}
    fn position(&self) -> i32 {
        (self.script)(self.clock.now_ms())
    }
}

/// Pull-up button held down from `low_from_ms` onwards.
struct ScriptedButton {
    clock: SimClock,
    low_from_ms: u64,
}

impl PushButton for ScriptedButton {
    fn is_high(&self) -> bool {
        self.clock.now_ms() < self.low_from_ms
    }
}

/// Accelerometer whose bus is stalled until `healthy_from_ms`, then reads
/// flat.
struct StalledAccel {
    clock: SimClock,
    healthy_from_ms: u64,
}

impl Accelerometer for StalledAccel {
    fn read(&mut self) -> anyhow::Result<[f32; 3]> {
        if self.clock.now_ms() < self.healthy_from_ms {
            anyhow::bail!("i2c bus stall");
        }
        Ok(FLAT)
    }
}

#[derive(Clone)]
struct RecordingPanel(Rc<RefCell<Vec<String>>>);

impl RecordingPanel {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl TextPanel for RecordingPanel {
    fn show_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.0.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

#[derive(Clone)]
struct RecordingIndicator(Rc<RefCell<Vec<Rgb>>>);

impl RecordingIndicator {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(Vec::new())))
    }
}

impl StatusIndicator for RecordingIndicator {
    fn set_color(&mut self, color: Rgb) -> anyhow::Result<()> {
        self.0.borrow_mut().push(color);
        Ok(())
    }
}

/// Everything a round needs, wired to one simulated clock.
struct Harness {
    cfg: GameConfig,
    clock: SimClock,
    accel: ScriptedAccel,
    conditioner: SignalConditioner,
    fusion: InputFusion<ScriptedEncoder, ScriptedButton>,
    panel: RecordingPanel,
    indicator: RecordingIndicator,
}

impl Harness {
    fn new(
        accel_script: fn(u64) -> [f32; 3],
        encoder_script: fn(u64) -> i32,
        button_low_from_ms: u64,
    ) -> Self {
        let cfg = GameConfig::default();
        let clock = SimClock::new();
        let monitor = DiscreteInputMonitor::new(
            ScriptedEncoder { clock: clock.clone(), script: encoder_script },
            ScriptedButton { clock: clock.clone(), low_from_ms: button_low_from_ms },
        );
        let fusion = InputFusion::new(monitor, GestureClassifier::new(&cfg));
        let conditioner = SignalConditioner::new(cfg.filter_alpha, Default::default());
        Self {
            accel: ScriptedAccel { clock: clock.clone(), script: accel_script },
            conditioner,
            fusion,
            panel: RecordingPanel::new(),
            indicator: RecordingIndicator::new(),
            cfg,
            clock,
        }
    }

    fn play(&mut self, prompt: Move, timeout_ms: u64) -> RoundOutcome {
        let mut round = RoundController::new(
            &self.cfg,
            timeout_ms,
            &self.clock,
            &mut self.accel,
            &mut self.conditioner,
            &mut self.fusion,
            &mut self.panel,
            &mut self.indicator,
        );
        round.play(prompt).unwrap()
    }

    fn texts(&self) -> Vec<String> {
        self.panel.0.borrow().clone()
    }
}

// ---------------------------------------------------------------------------
// Round scenarios
// ---------------------------------------------------------------------------

#[test]
fn push_prompt_matches_at_press_time() {
    // Prompt "Push it!", 5 s window, button falls at t=1.2 s.
    let mut h = Harness::new(|_| FLAT, |_| 0, 1200);
    let outcome = h.play(Move::Push, 5_000);

    assert_eq!(outcome, RoundOutcome::Matched);
    // Resolved at 1200 ms plus the 700 ms success dwell.
    assert_eq!(h.clock.now_ms(), 1_900);
    assert_eq!(h.texts(), vec!["Push it!", "Nice!"]);
    assert_eq!(*h.indicator.0.borrow().last().unwrap(), COLOR_SUCCESS);
}

#[test]
fn no_input_times_out() {
    let mut h = Harness::new(|_| FLAT, |_| 0, u64::MAX);
    let outcome = h.play(Move::Twist, 5_000);

    assert_eq!(outcome, RoundOutcome::TimedOut);
    // Strictly-greater timeout check trips at 5001 ms; 1 s failure dwell.
    assert_eq!(h.clock.now_ms(), 6_001);
    assert_eq!(h.texts(), vec!["Twist it!", "Times Up!", "Game Over!"]);
    assert_eq!(*h.indicator.0.borrow().last().unwrap(), COLOR_GAME_OVER);
}

#[test]
fn wrong_move_mismatches() {
    // Push while the prompt asks for a twist.
    let mut h = Harness::new(|_| FLAT, |_| 0, 300);
    let outcome = h.play(Move::Twist, 5_000);

    assert_eq!(outcome, RoundOutcome::Mismatched(Move::Push));
    assert_eq!(h.clock.now_ms(), 1_300);
    assert_eq!(h.texts(), vec!["Twist it!", "Wrong move!", "Game Over!"]);
}

#[test]
fn forward_tilt_matches_once_filter_crosses_threshold() {
    // Pitch back (nose up) from t=500 ms; the EMA needs two samples of 90°
    // to exceed the 25° trigger.
    let mut h = Harness::new(|t| if t < 500 { FLAT } else { NOSE_UP }, |_| 0, u64::MAX);
    let outcome = h.play(Move::Forward, 5_000);

    assert_eq!(outcome, RoundOutcome::Matched);
    let resolved = h.clock.now_ms() - h.cfg.success_dwell_ms;
    assert!((500..=510).contains(&resolved), "resolved at {} ms", resolved);
}

#[test]
fn tilt_during_push_prompt_is_a_wrong_move() {
    let mut h = Harness::new(|t| if t < 200 { FLAT } else { NOSE_UP }, |_| 0, u64::MAX);
    let outcome = h.play(Move::Push, 5_000);

    assert_eq!(outcome, RoundOutcome::Mismatched(Move::Forward));
}

#[test]
fn twist_prompt_matches_on_rotation() {
    let mut h = Harness::new(|_| FLAT, |t| if t < 400 { 0 } else { 2 }, u64::MAX);
    let outcome = h.play(Move::Twist, 5_000);

    assert_eq!(outcome, RoundOutcome::Matched);
    assert_eq!(h.clock.now_ms() - h.cfg.success_dwell_ms, 400);
}

#[test]
fn dwell_rotation_is_not_attributed_to_the_next_round() {
    // Round 1 ends at t=800 (push at 100 + 700 ms dwell). The knob turns at
    // t=400, during the round-1 resolution, and stays there. Round 2 resets
    // the baseline on entry, so the stale rotation must not register; the
    // forward tilt starting at t=900 resolves it instead.
    let mut h = Harness::new(
        |t| if t < 900 { FLAT } else { NOSE_UP },
        |t| if t < 400 { 0 } else { 3 },
        100,
    );
    assert_eq!(h.play(Move::Push, 5_000), RoundOutcome::Matched);
    assert_eq!(h.clock.now_ms(), 800);

    assert_eq!(h.play(Move::Forward, 5_000), RoundOutcome::Matched);
}

#[test]
fn timeout_fires_while_the_sensor_is_down() {
    // The accelerometer errors on every read until long after the window
    // closes. The wall-clock exit must trip at its usual 5001 ms anyway,
    // not wait for the sensor to come back.
    let cfg = GameConfig::default();
    let clock = SimClock::new();
    let mut accel = StalledAccel { clock: clock.clone(), healthy_from_ms: 60_000 };
    let monitor = DiscreteInputMonitor::new(
        ScriptedEncoder { clock: clock.clone(), script: |_| 0 },
        ScriptedButton { clock: clock.clone(), low_from_ms: u64::MAX },
    );
    let mut fusion = InputFusion::new(monitor, GestureClassifier::new(&cfg));
    let mut conditioner = SignalConditioner::new(cfg.filter_alpha, Default::default());
    let mut panel = RecordingPanel::new();
    let mut indicator = RecordingIndicator::new();

    let mut round = RoundController::new(
        &cfg,
        5_000,
        &clock,
        &mut accel,
        &mut conditioner,
        &mut fusion,
        &mut panel,
        &mut indicator,
    );
    let outcome = round.play(Move::Push).unwrap();

    assert_eq!(outcome, RoundOutcome::TimedOut);
    assert_eq!(clock.now_ms(), 6_001);
    assert_eq!(*panel.0.borrow(), vec!["Push it!", "Times Up!", "Game Over!"]);
}

#[test]
fn timeout_boundary_is_exclusive() {
    // A qualifying move exactly at the timeout limit still wins: the
    // move check runs before the elapsed check each tick.
    let mut h = Harness::new(|_| FLAT, |_| 0, 5_000);
    let outcome = h.play(Move::Push, 5_000);
    assert_eq!(outcome, RoundOutcome::Matched);
}

// ---------------------------------------------------------------------------
// Session scenarios
// ---------------------------------------------------------------------------

#[test]
fn silent_session_calibrates_then_times_out_once() {
    let clock = SimClock::new();
    let panel = RecordingPanel::new();
    let indicator = RecordingIndicator::new();
    let mut session = GameSession::new(
        GameConfig::default(),
        Difficulty::Hard,
        ScriptedAccel { clock: clock.clone(), script: |_| FLAT },
        ScriptedEncoder { clock: clock.clone(), script: |_| 0 },
        ScriptedButton { clock: clock.clone(), low_from_ms: u64::MAX },
        panel.clone(),
        indicator.clone(),
        clock.clone(),
        99,
    );

    session.run().unwrap();

    // 500 ms calibration + 5001 ms to the strict timeout + 1000 ms dwell.
    assert_eq!(clock.now_ms(), 6_501);

    let texts = panel.0.borrow();
    assert!(Move::ALL.iter().any(|m| m.prompt_text() == texts[0]));
    assert_eq!(texts[texts.len() - 2], "Times Up!");
    assert_eq!(texts[texts.len() - 1], "Game Over!");
    assert_eq!(*indicator.0.borrow().last().unwrap(), COLOR_GAME_OVER);
}

#[test]
fn matched_rounds_continue_until_a_failure() {
    // The button is held from t=600 on: whatever the first prompt is, the
    // session ends within a bounded number of rounds (a push either matches
    // once and then goes silent, or mismatches immediately). Either way the
    // session must terminate with "Game Over!".
    let clock = SimClock::new();
    let panel = RecordingPanel::new();
    let indicator = RecordingIndicator::new();
    let mut session = GameSession::new(
        GameConfig::default(),
        Difficulty::Hard,
        ScriptedAccel { clock: clock.clone(), script: |_| FLAT },
        ScriptedEncoder { clock: clock.clone(), script: |_| 0 },
        ScriptedButton { clock: clock.clone(), low_from_ms: 600 },
        panel.clone(),
        indicator.clone(),
        clock.clone(),
        7,
    );

    session.run().unwrap();

    let texts = panel.0.borrow();
    assert_eq!(texts.last().unwrap(), "Game Over!");
    // Every prompt shown was one of the four real prompts or a result text.
    for text in texts.iter() {
        let known = Move::ALL.iter().any(|m| m.prompt_text() == text)
            || ["Nice!", "Wrong move!", "Times Up!", "Game Over!"].contains(&text.as_str());
        assert!(known, "unexpected panel text: {}", text);
    }
}
