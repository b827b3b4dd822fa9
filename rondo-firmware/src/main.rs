//! Rondo - Pomodoro dial timer firmware
//!
//! Main firmware binary for RP2040-based round-dial boards: a GC9A01
//! round LCD, a rotary encoder with push button, a CST816S touch surface,
//! and a piezo buzzer.
//!
//! Named after the rondo musical form - a recurring theme the piece
//! always returns to - reflecting the work/break/work cycle this device
//! paces.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use rondo_drivers::gc9a01::Gc9a01;

mod channels;
mod controller;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Pin assignment (GPIO numbers):
//   LCD      SPI1: CLK=10 MOSI=11, DC=8 CS=9 RST=12 BL=13
//   Touch    I2C0: SDA=4 SCL=5
//   Encoder  A=21 B=22, push button=23 (active low)
//   Buzzer   PWM slice 0 channel A on GPIO16

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rondo firmware starting...");

    let p = embassy_rp::init(Default::default());

    // LCD on SPI1
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 40_000_000;
    let panel_spi = Spi::new_txonly(p.SPI1, p.PIN_10, p.PIN_11, p.DMA_CH0, spi_config);

    let dc = Output::new(p.PIN_8, Level::Low);
    let cs = Output::new(p.PIN_9, Level::High);
    let rst = Output::new(p.PIN_12, Level::High);
    let mut backlight = Output::new(p.PIN_13, Level::Low);

    let mut panel = Gc9a01::new(panel_spi, dc, cs, rst);
    if panel.init(&mut Delay).await.is_err() {
        error!("Failed to initialize panel");
    } else {
        info!("Panel initialized");
    }

    // Backlight on once the panel is initialized; the pin must outlive main
    backlight.set_high();
    core::mem::forget(backlight);

    // Touch controller on I2C0
    let touch_i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());

    // Encoder and button
    let enc_a = Input::new(p.PIN_21, Pull::Up);
    let enc_b = Input::new(p.PIN_22, Pull::Up);
    let button = Input::new(p.PIN_23, Pull::Up);

    // Buzzer PWM
    let buzzer = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm::Config::default());

    // Spawn tasks
    spawner.spawn(tasks::input_task(enc_a, enc_b, button, touch_i2c)).unwrap();
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::controller_task()).unwrap();
    spawner.spawn(tasks::display_task(panel)).unwrap();
    spawner.spawn(tasks::buzzer_task(buzzer)).unwrap();

    info!("All tasks spawned");
}
