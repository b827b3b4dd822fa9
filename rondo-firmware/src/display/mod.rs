//! Display rendering
//!
//! The control loop publishes a `ScreenView` snapshot; the display task
//! draws it. Layout and palette live here, panel access in the driver.

pub mod colors;
pub mod renderer;

use rondo_core::session::SessionState;

/// Snapshot of everything one frame needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenView {
    Timer {
        state: SessionState,
        before_pause: SessionState,
        remaining_s: u32,
        completed_count: u32,
    },
    Settings {
        index: u8,
        editing: bool,
        work_s: u32,
        short_break_s: u32,
        long_break_s: u32,
        pomodoros: u8,
    },
}

/// Boot-time view shown before the controller publishes its first frame
pub const INITIAL_VIEW: ScreenView = ScreenView::Timer {
    state: SessionState::Idle,
    before_pause: SessionState::Idle,
    remaining_s: 0,
    completed_count: 0,
};
