//! Main controller task
//!
//! The single cooperative control loop: waits for either a decoded input
//! event or a tick, drives the application layer, and publishes render
//! snapshots. All session state lives here, in one execution context.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Instant;

use rondo_core::session::SessionEvent;

use crate::channels::{INPUT_CHANNEL, REDRAW, TICK_SIGNAL};
use crate::controller::App;
use crate::tasks::buzzer::BuzzerHandle;
use crate::tasks::display::RENDER_STATE;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task() {
    info!("Controller task started");

    let mut app = App::new();
    let mut notifier = BuzzerHandle;

    // First frame
    publish(&app).await;

    loop {
        match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(input) => {
                debug!("Input: {:?}", input);
                app.handle_input(input, Instant::now().as_millis(), &mut notifier);
            }
            Either::Second(now_ms) => {
                if let Some(event) = app.tick(now_ms, &mut notifier) {
                    match event {
                        SessionEvent::CountdownFinished => info!("Countdown reached zero"),
                        SessionEvent::AlertStarted => info!("Completion alert started"),
                        SessionEvent::Advanced { from, to } => {
                            info!("Session advanced: {:?} -> {:?}", from, to);
                        }
                    }
                }
            }
        }

        if app.take_redraw() {
            publish(&app).await;
        }
    }
}

/// Copy the current view to the shared snapshot and wake the display task
async fn publish(app: &App) {
    {
        let mut state = RENDER_STATE.lock().await;
        *state = app.view();
    }
    REDRAW.signal(());
}
