//! Buzzer task
//!
//! Owns the PWM slice driving the piezo. The control loop talks to it
//! through fire-and-forget `BeepCommand`s; a tone with a duration
//! auto-silences when the duration elapses without a newer command, so an
//! interrupted alert cannot leave the buzzer ringing.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::{Duration, Instant, Timer};
use fixed::traits::ToFixed;

use rondo_core::traits::Notifier;

use crate::channels::{BeepCommand, BUZZER_CMD};

/// System clock feeding the PWM slice
const PWM_CLOCK_HZ: u32 = 125_000_000;

/// Fixed divider keeping audible periods inside the 16-bit counter
const PWM_DIVIDER: u32 = 16;

/// Notifier handle the control loop hands to the core
pub struct BuzzerHandle;

impl Notifier for BuzzerHandle {
    fn tone(&mut self, freq_hz: u16, duration_ms: u32) {
        BUZZER_CMD.signal(BeepCommand::Tone {
            freq_hz,
            duration_ms,
        });
    }

    fn silence(&mut self) {
        BUZZER_CMD.signal(BeepCommand::Silence);
    }
}

/// Buzzer task - applies beep commands to the PWM slice
#[embassy_executor::task]
pub async fn buzzer_task(mut pwm: Pwm<'static>) {
    info!("Buzzer task started");

    let mut deadline: Option<Instant> = None;

    loop {
        let command = match deadline {
            Some(at) => match select(BUZZER_CMD.wait(), Timer::at(at)).await {
                Either::First(command) => command,
                // Tone duration elapsed with no newer command
                Either::Second(()) => BeepCommand::Silence,
            },
            None => BUZZER_CMD.wait().await,
        };

        match command {
            BeepCommand::Tone {
                freq_hz,
                duration_ms,
            } => {
                trace!("Tone {} Hz for {} ms", freq_hz, duration_ms);
                set_tone(&mut pwm, freq_hz);
                deadline = (duration_ms > 0)
                    .then(|| Instant::now() + Duration::from_millis(duration_ms as u64));
            }
            BeepCommand::Silence => {
                mute(&mut pwm);
                deadline = None;
            }
        }
    }
}

/// Configure the slice for a square wave at `freq_hz`
fn set_tone(pwm: &mut Pwm<'static>, freq_hz: u16) {
    let mut config = pwm::Config::default();
    config.divider = PWM_DIVIDER.to_fixed();
    let top = (PWM_CLOCK_HZ / PWM_DIVIDER / freq_hz.max(1) as u32).min(u16::MAX as u32) as u16;
    config.top = top;
    config.compare_a = top / 2;
    pwm.set_config(&config);
}

/// Hold the output low
fn mute(pwm: &mut Pwm<'static>) {
    let mut config = pwm::Config::default();
    config.divider = PWM_DIVIDER.to_fixed();
    config.compare_a = 0;
    pwm.set_config(&config);
}
