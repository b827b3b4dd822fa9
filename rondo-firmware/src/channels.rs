//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use rondo_drivers::InputEvent;

/// Channel capacity for decoded input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Decoded input events (encoder rotation, button presses, touch taps)
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Monotonic millisecond timestamps published by the tick task
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();

/// Signal that the screen content changed and needs redrawing
pub static REDRAW: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Buzzer commands from the control loop
pub static BUZZER_CMD: Signal<CriticalSectionRawMutex, BeepCommand> = Signal::new();

/// Command for the buzzer task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeepCommand {
    /// Start a tone; `duration_ms` of 0 means "until further notice"
    Tone { freq_hz: u16, duration_ms: u32 },
    /// Stop any tone immediately
    Silence,
}
