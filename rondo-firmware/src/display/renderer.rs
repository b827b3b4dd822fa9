//! Screen layout and drawing
//!
//! Two screens: the timer face (countdown, state label, pomodoro counter,
//! gear touch target) and the settings menu. Full redraws happen on state
//! or screen changes; otherwise only the countdown and counter areas are
//! repainted.

use core::fmt::Write;

use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;
use heapless::String;

use rondo_core::session::SessionState;
use rondo_drivers::gc9a01::{Gc9a01, CHAR_W, WIDTH};

use super::colors;
use super::ScreenView;

const CENTER_X: u16 = 120;

/// Static ring around the countdown (kept from the dial face design,
/// currently disabled)
const SHOW_RING: bool = false;
const RING_RADIUS: i32 = 90;
const RING_THICKNESS: i32 = 8;

/// Format seconds as MM:SS
pub fn format_time(seconds: u32) -> String<8> {
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", seconds / 60, seconds % 60);
    out
}

/// Background color for a session state; paused keeps the color of the
/// state it froze
pub fn background_for(state: SessionState, before_pause: SessionState) -> u16 {
    match state {
        SessionState::ShortBreak => colors::DARK_GREEN,
        SessionState::LongBreak => colors::ORANGE,
        SessionState::Paused => match before_pause {
            SessionState::ShortBreak => colors::DARK_GREEN,
            SessionState::LongBreak => colors::ORANGE,
            _ => colors::RED,
        },
        _ => colors::RED,
    }
}

/// Instruction line for a session state
fn instruction_for(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => "Press: Start | Hold: Reset",
        SessionState::Paused => "Press: Resume | Hold: Reset",
        _ => "Press: Pause | Hold: Reset",
    }
}

/// Draw one frame; `last` is the previously drawn view, used to decide
/// between a full and a partial repaint
pub async fn render<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
    view: &ScreenView,
    last: Option<&ScreenView>,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    match *view {
        ScreenView::Timer {
            state,
            before_pause,
            remaining_s,
            completed_count,
        } => {
            let full = !matches!(
                last,
                Some(ScreenView::Timer {
                    state: last_state,
                    before_pause: last_before,
                    ..
                }) if *last_state == state && *last_before == before_pause
            );
            draw_timer(panel, state, before_pause, remaining_s, completed_count, full).await
        }
        ScreenView::Settings {
            index,
            editing,
            work_s,
            short_break_s,
            long_break_s,
            pomodoros,
        } => {
            let entering = !matches!(last, Some(ScreenView::Settings { .. }));
            draw_settings(
                panel,
                index,
                editing,
                work_s,
                short_break_s,
                long_break_s,
                pomodoros,
                entering,
            )
            .await
        }
    }
}

async fn draw_timer<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
    state: SessionState,
    before_pause: SessionState,
    remaining_s: u32,
    completed_count: u32,
    full: bool,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    let bg = background_for(state, before_pause);

    if full {
        panel.fill_screen(bg).await?;

        if SHOW_RING {
            let outer = RING_RADIUS + RING_THICKNESS / 2;
            let inner = RING_RADIUS - RING_THICKNESS / 2;
            panel.fill_circle(120, 120, outer, colors::WHITE).await?;
            panel.fill_circle(120, 120, inner, bg).await?;
        }

        draw_tomato(panel).await?;
        draw_gear(panel, bg).await?;

        draw_text_centered(panel, 152, state.label(), 2, colors::WHITE, bg).await?;
        draw_text_centered(panel, 188, instruction_for(state), 1, colors::WHITE, bg).await?;
    }

    // Counter and countdown repaint every frame
    let mut counter: String<24> = String::new();
    let _ = write!(counter, "Pomodoros: {}", completed_count);
    panel.fill_rect(0, 14, WIDTH, 12, bg).await?;
    draw_text_centered(panel, 16, counter.as_str(), 1, colors::WHITE, bg).await?;

    panel.fill_rect(40, 95, 160, 50, bg).await?;
    draw_text_centered(
        panel,
        100,
        format_time(remaining_s).as_str(),
        5,
        colors::WHITE,
        bg,
    )
    .await?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn draw_settings<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
    index: u8,
    editing: bool,
    work_s: u32,
    short_break_s: u32,
    long_break_s: u32,
    pomodoros: u8,
    entering: bool,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    if entering {
        panel.fill_screen(colors::BLACK).await?;
        draw_text_centered(panel, 14, "Settings", 2, colors::WHITE, colors::BLACK).await?;
    }

    let mut y = 50u16;
    for row in 0..5u8 {
        let selected = row == index;
        let row_bg = if selected {
            colors::DARK_GRAY
        } else {
            colors::BLACK
        };
        panel.fill_rect(10, y - 2, 220, 18, row_bg).await?;

        let mut line: String<32> = String::new();
        match row {
            0 => {
                let _ = write!(line, "Work Duration: {}", format_time(work_s).as_str());
            }
            1 => {
                let _ = write!(line, "Short Break: {}", format_time(short_break_s).as_str());
            }
            2 => {
                let _ = write!(line, "Long Break: {}", format_time(long_break_s).as_str());
            }
            3 => {
                let _ = write!(line, "Pomodoros/Long: {}", pomodoros);
            }
            _ => {
                let _ = line.push_str("Back");
            }
        }

        let fg = if selected { colors::RED } else { colors::WHITE };
        draw_text_centered(panel, y, line.as_str(), 1, fg, row_bg).await?;
        y += 25;
    }

    // Instruction lines track edit mode
    panel.fill_rect(0, 200, WIDTH, 40, colors::BLACK).await?;
    let dial_line = if editing {
        "Dial: Adjust"
    } else {
        "Dial: Navigate"
    };
    let press_line = if editing {
        "Press: Done"
    } else {
        "Press: Select/Edit"
    };
    draw_text_centered(panel, 205, dial_line, 1, colors::WHITE, colors::BLACK).await?;
    draw_text_centered(panel, 220, press_line, 1, colors::WHITE, colors::BLACK).await?;

    Ok(())
}

/// Tomato badge between the counter and the countdown
async fn draw_tomato<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    panel.fill_circle(120, 62, 12, colors::TOMATO).await?;
    panel.fill_rect(117, 44, 6, 8, colors::STEM_GREEN).await?;
    Ok(())
}

/// Gear glyph marking the settings touch target
async fn draw_gear<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
    bg: u16,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    // Teeth first, then the wheel over them, then the hub
    panel.fill_rect(118, 207, 4, 26, colors::WHITE).await?;
    panel.fill_rect(107, 218, 26, 4, colors::WHITE).await?;
    panel.fill_circle(120, 220, 10, colors::WHITE).await?;
    panel.fill_circle(120, 220, 4, bg).await?;
    Ok(())
}

/// Draw text horizontally centered on the panel
async fn draw_text_centered<SPI, DC, CS, RST>(
    panel: &mut Gc9a01<SPI, DC, CS, RST>,
    y: u16,
    text: &str,
    scale: u16,
    fg: u16,
    bg: u16,
) -> Result<(), SPI::Error>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    let text_w = text.len() as u16 * CHAR_W * scale;
    let x = CENTER_X.saturating_sub(text_w / 2);
    panel.draw_text(x, y, text, scale, fg, bg).await
}
