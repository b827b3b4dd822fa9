//! Session state machine
//!
//! Defines the authoritative runtime states of a pomodoro chain and the
//! events the timer engine reports as it moves between them.

pub mod events;
pub mod state;

pub use events::SessionEvent;
pub use state::SessionState;
