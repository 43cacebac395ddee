// Reflexbox — Difficulty Menu
//
// Runs before the session: rotate the knob to move the cursor through
// Easy/Medium/Hard, push to confirm. Rotation is clamped to one step per
// poll so a fast spin still walks the list entry by entry.

use crate::config::{MENU_SPLASH_MS, MENU_STEP_DWELL_MS};
use crate::events::Difficulty;
use crate::hal::{Clock, PushButton, RotaryInput, TextPanel};

pub fn select_difficulty(
    encoder: &mut impl RotaryInput,
    button: &mut impl PushButton,
    panel: &mut dyn TextPanel,
    clock: &dyn Clock,
) -> anyhow::Result<Difficulty> {
    panel.show_text("Select Mode")?;
    clock.sleep_ms(MENU_SPLASH_MS);

    let mut index: usize = 0;
    draw_menu(panel, index)?;

    encoder.update();
    let mut prev_pos = encoder.position();
    let mut prev_high = button.is_high();

    loop {
        encoder.update();
        let pos = encoder.position();
        let delta = pos - prev_pos;

        if delta != 0 {
            let step: i32 = if delta > 0 { 1 } else { -1 };
            index = (index as i32 + step).rem_euclid(Difficulty::ALL.len() as i32) as usize;
            draw_menu(panel, index)?;
            prev_pos = pos;
            clock.sleep_ms(MENU_STEP_DWELL_MS);
        }

        let high = button.is_high();
        if prev_high && !high {
            let chosen = Difficulty::ALL[index];
            panel.show_text(&format!("Chosen: {}", chosen.label()))?;
            clock.sleep_ms(MENU_SPLASH_MS);
            log::info!("Difficulty selected: {:?}", chosen);
            return Ok(chosen);
        }
        prev_high = high;
    }
}

fn draw_menu(panel: &mut dyn TextPanel, index: usize) -> anyhow::Result<()> {
    let mut text = String::new();
    for (i, option) in Difficulty::ALL.iter().enumerate() {
        let marker = if i == index { "> " } else { "  " };
        text.push_str(marker);
        text.push_str(option.label());
        text.push('\n');
    }
    panel.show_text(&text)
}
