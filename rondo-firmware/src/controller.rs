//! Application layer
//!
//! Decodes input events into session intents and owns everything above the
//! timer engine: the session configuration, the settings editor (a UI mode
//! deliberately outside the core's state machine), and redraw bookkeeping.
//! The session control surface is reached only through the `SessionControl`
//! trait.

use rondo_core::config::SessionConfig;
use rondo_core::session::{SessionEvent, SessionState};
use rondo_core::timer::SessionTimer;
use rondo_core::traits::{Notifier, SessionControl};
use rondo_drivers::InputEvent;

use crate::display::ScreenView;

/// Idle dial adjustment bounds (minutes)
const DIAL_MIN_MINUTES: i32 = 1;
const DIAL_MAX_MINUTES: i32 = 25;

/// Dial click feedback tone
const CLICK_TONE_HZ: u16 = 800;
const CLICK_TONE_MS: u32 = 30;

/// Value adjustment step for duration entries (seconds)
const DURATION_STEP_S: i32 = 60;

/// Settings menu entries: work, short break, long break, chain length, back
pub const SETTINGS_ENTRY_COUNT: u8 = 5;
pub const SETTINGS_BACK_INDEX: u8 = 4;

/// Gear touch target (bottom center of the panel)
const GEAR_X0: u16 = 105;
const GEAR_X1: u16 = 135;
const GEAR_Y0: u16 = 205;
const GEAR_Y1: u16 = 235;

/// Check if a touch lands on the settings gear
pub fn gear_hit(x: u16, y: u16) -> bool {
    (GEAR_X0..=GEAR_X1).contains(&x) && (GEAR_Y0..=GEAR_Y1).contains(&y)
}

/// Map a button click to the session operation it means in `state`
fn apply_click<S: SessionControl>(control: &mut S, state: SessionState, work_s: u32, now_ms: u64) {
    match state {
        SessionState::Idle => control.start(work_s, now_ms),
        SessionState::Running | SessionState::ShortBreak | SessionState::LongBreak => {
            control.pause()
        }
        SessionState::Paused => control.resume(now_ms),
    }
}

/// Map a long press to the session operation it means in `state`
fn apply_long_press<S: SessionControl>(control: &mut S, state: SessionState, work_s: u32) {
    // Long press when already idle does nothing
    if state != SessionState::Idle {
        control.reset(work_s);
    }
}

/// UI mode, orthogonal to the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiMode {
    Timer,
    Settings,
}

/// Settings editor cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsMenu {
    pub index: u8,
    pub editing: bool,
}

impl SettingsMenu {
    const fn new() -> Self {
        Self {
            index: 0,
            editing: false,
        }
    }

    fn navigate(&mut self, delta: i8) {
        if delta > 0 {
            self.index = (self.index + 1) % SETTINGS_ENTRY_COUNT;
        } else {
            self.index = (self.index + SETTINGS_ENTRY_COUNT - 1) % SETTINGS_ENTRY_COUNT;
        }
    }
}

/// Application state above the timer engine
pub struct App {
    timer: SessionTimer,
    config: SessionConfig,
    mode: UiMode,
    menu: SettingsMenu,
    ui_dirty: bool,
}

impl App {
    pub fn new() -> Self {
        let config = SessionConfig::default();
        let mut timer = SessionTimer::new();
        timer.reset(config.work_s());
        Self {
            timer,
            config,
            mode: UiMode::Timer,
            menu: SettingsMenu::new(),
            ui_dirty: true,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.timer.state()
    }

    /// Check if the settings editor is open
    pub fn in_settings(&self) -> bool {
        self.mode == UiMode::Settings
    }

    /// Process one decoded input event
    pub fn handle_input<N: Notifier>(&mut self, event: InputEvent, now_ms: u64, notifier: &mut N) {
        match event {
            InputEvent::EncoderCw => self.handle_rotation(1, notifier),
            InputEvent::EncoderCcw => self.handle_rotation(-1, notifier),
            InputEvent::ButtonClick => self.handle_click(now_ms),
            InputEvent::ButtonLongPress => self.handle_long_press(),
            InputEvent::TouchTap { x, y } => self.handle_touch(x, y),
        }
    }

    /// Per-iteration update of the session engine
    ///
    /// The settings editor suspends the engine entirely; the countdown is
    /// frozen the same way a pause is, because no wall time is credited
    /// while the editor is open.
    pub fn tick<N: Notifier>(&mut self, now_ms: u64, notifier: &mut N) -> Option<SessionEvent> {
        if self.in_settings() {
            return None;
        }
        self.timer.tick(now_ms, &self.config, notifier)
    }

    /// Consume the pending redraw request, if any
    pub fn take_redraw(&mut self) -> bool {
        let timer_dirty = self.timer.take_redraw();
        let dirty = timer_dirty || self.ui_dirty;
        self.ui_dirty = false;
        dirty
    }

    /// Snapshot for the display task
    pub fn view(&self) -> ScreenView {
        match self.mode {
            UiMode::Settings => ScreenView::Settings {
                index: self.menu.index,
                editing: self.menu.editing,
                work_s: self.config.work_s(),
                short_break_s: self.config.short_break_s(),
                long_break_s: self.config.long_break_s(),
                pomodoros: self.config.pomodoros_until_long_break(),
            },
            UiMode::Timer => ScreenView::Timer {
                state: self.timer.state(),
                before_pause: self.timer.state_before_pause(),
                remaining_s: self.timer.remaining_s(),
                completed_count: self.timer.completed_count(),
            },
        }
    }

    fn handle_rotation<N: Notifier>(&mut self, delta: i8, notifier: &mut N) {
        match self.mode {
            UiMode::Settings => {
                if self.menu.editing {
                    self.adjust_selected(delta);
                } else {
                    self.menu.navigate(delta);
                }
                self.ui_dirty = true;
            }
            UiMode::Timer => {
                if self.timer.state() == SessionState::Idle {
                    self.adjust_idle_dial(delta, notifier);
                }
            }
        }
    }

    /// Adjust the settings entry under the cursor
    fn adjust_selected(&mut self, delta: i8) {
        match self.menu.index {
            0 => self.config.adjust_work_s(delta as i32 * DURATION_STEP_S),
            1 => self.config.adjust_short_break_s(delta as i32 * DURATION_STEP_S),
            2 => self.config.adjust_long_break_s(delta as i32 * DURATION_STEP_S),
            3 => self.config.adjust_pomodoros(delta),
            _ => {}
        }
    }

    /// Dial quick-set while idle: work length in whole minutes, breaks
    /// derived from it, with click feedback
    fn adjust_idle_dial<N: Notifier>(&mut self, delta: i8, notifier: &mut N) {
        let minutes = (self.config.work_s() / 60) as i32;
        let target = (minutes + delta as i32).clamp(DIAL_MIN_MINUTES, DIAL_MAX_MINUTES);
        if target == minutes {
            return;
        }
        self.config.set_work_s(target as u32 * 60);
        self.config.derive_breaks_from_work();
        self.timer.set_idle_duration(self.config.work_s());
        notifier.tone(CLICK_TONE_HZ, CLICK_TONE_MS);
    }

    fn handle_click(&mut self, now_ms: u64) {
        match self.mode {
            UiMode::Settings => {
                if self.menu.index == SETTINGS_BACK_INDEX {
                    self.mode = UiMode::Timer;
                    self.timer.reset(self.config.work_s());
                } else {
                    self.menu.editing = !self.menu.editing;
                }
                self.ui_dirty = true;
            }
            UiMode::Timer => {
                apply_click(
                    &mut self.timer,
                    self.state(),
                    self.config.work_s(),
                    now_ms,
                );
            }
        }
    }

    fn handle_long_press(&mut self) {
        // In settings, Back is the only exit
        if self.mode == UiMode::Timer {
            apply_long_press(&mut self.timer, self.state(), self.config.work_s());
        }
    }

    fn handle_touch(&mut self, x: u16, y: u16) {
        if self.mode != UiMode::Settings && gear_hit(x, y) {
            self.mode = UiMode::Settings;
            self.menu = SettingsMenu::new();
            self.ui_dirty = true;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
