//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buzzer;
pub mod controller;
pub mod display;
pub mod input;
pub mod tick;

pub use buzzer::buzzer_task;
pub use controller::controller_task;
pub use display::display_task;
pub use input::input_task;
pub use tick::tick_task;
