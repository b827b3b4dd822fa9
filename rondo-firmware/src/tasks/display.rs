//! Display update task
//!
//! Waits for redraw signals, snapshots the shared view, and repaints the
//! panel. Keeping the previously drawn view here lets the renderer skip
//! full clears when only the countdown or counter changed.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

use rondo_drivers::gc9a01::Gc9a01;

use crate::channels::REDRAW;
use crate::display::{renderer, ScreenView, INITIAL_VIEW};

/// Shared render snapshot, written by the controller task
pub static RENDER_STATE: Mutex<CriticalSectionRawMutex, ScreenView> = Mutex::new(INITIAL_VIEW);

/// Concrete panel type for this board
pub type Panel =
    Gc9a01<Spi<'static, SPI1, spi::Async>, Output<'static>, Output<'static>, Output<'static>>;

/// Display task - repaints the panel on demand
#[embassy_executor::task]
pub async fn display_task(mut panel: Panel) {
    info!("Display task started");

    let mut last: Option<ScreenView> = None;

    loop {
        REDRAW.wait().await;

        let view = *RENDER_STATE.lock().await;
        if renderer::render(&mut panel, &view, last.as_ref()).await.is_err() {
            warn!("Panel write failed");
        }
        last = Some(view);
    }
}
