//! Input task
//!
//! Samples the encoder lines and button every couple of milliseconds
//! through the pure decoders, polls the touch controller at a lower
//! cadence, and pushes decoded events into the input channel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use rondo_drivers::button::Button;
use rondo_drivers::cst816s::Cst816s;
use rondo_drivers::encoder::Encoder;
use rondo_drivers::InputEvent;

use crate::channels::INPUT_CHANNEL;

/// Encoder/button sample period
const POLL_INTERVAL_MS: u64 = 2;

/// Touch is polled every N input samples
const TOUCH_POLL_DIVIDER: u32 = 10;

/// Input task - decodes encoder, button, and touch into events
#[embassy_executor::task]
pub async fn input_task(
    enc_a: Input<'static>,
    enc_b: Input<'static>,
    button_pin: Input<'static>,
    touch_i2c: I2c<'static, I2C0, i2c::Async>,
) {
    info!("Input task started");

    let mut encoder = Encoder::new(enc_a.is_high(), enc_b.is_high());
    let mut button = Button::new();
    let mut touch = Cst816s::new(touch_i2c);
    let mut touch_down = false;

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut sample: u32 = 0;

    loop {
        ticker.next().await;
        sample = sample.wrapping_add(1);

        if let Some(event) = encoder.update(enc_a.is_high(), enc_b.is_high()) {
            let _ = INPUT_CHANNEL.try_send(event);
        }

        // Button is active-low
        if let Some(event) = button.update(button_pin.is_low(), Instant::now().as_millis()) {
            debug!("Button: {:?}", event);
            let _ = INPUT_CHANNEL.try_send(event);
        }

        if sample % TOUCH_POLL_DIVIDER == 0 {
            match touch.read_touch().await {
                Ok(Some(point)) => {
                    // Report the press edge only
                    if !touch_down {
                        touch_down = true;
                        debug!("Touch at ({}, {})", point.x, point.y);
                        let _ = INPUT_CHANNEL.try_send(InputEvent::TouchTap {
                            x: point.x,
                            y: point.y,
                        });
                    }
                }
                Ok(None) => touch_down = false,
                Err(_) => {
                    trace!("Touch read failed");
                }
            }
        }
    }
}
