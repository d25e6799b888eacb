//! Graphis - Joystick Sketchpad Firmware
//!
//! Main firmware binary for RP2040-based sketchpad boards: an analog
//! joystick moves a cursor on a 240x320 SPI TFT, the stick button
//! toggles drawing mode, and two more buttons cycle the palette shown
//! on the taskbar strip.
//!
//! Named after the Greek "graphis" meaning "stylus" - the drawing tool
//! the joystick-driven cursor stands in for.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use graphis_core::config::DisplayGeometry;
use graphis_core::palette::colors;
use graphis_core::traits::DisplayDriver;
use graphis_drivers::display::Ili9341;

mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// SPI clock for the TFT (RP2040 SPI tops out at clk_peri / 2)
const DISPLAY_SPI_HZ: u32 = 40_000_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Graphis firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // TFT on SPI0: SCK=GPIO18, MOSI=GPIO19, DC=GPIO16, CS=GPIO17, RST=GPIO15
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = DISPLAY_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);

    let dc = Output::new(p.PIN_16, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let rst = Output::new(p.PIN_15, Level::High);

    let mut display = Ili9341::new(spi, dc, cs, rst, DisplayGeometry::default());
    if display.init(&mut Delay).is_err() {
        error!("Display init failed");
    }
    if display.clear(colors::BLACK).is_err() {
        error!("Display clear failed");
    }
    info!("Display initialized");

    // Joystick axes on ADC0/ADC1 (GPIO26/GPIO27)
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let x_axis = Channel::new_pin(p.PIN_26, Pull::None);
    let y_axis = Channel::new_pin(p.PIN_27, Pull::None);

    // Buttons are active-low with internal pull-ups: the stick press
    // toggles drawing, the other two step the palette selection
    let draw_btn = Input::new(p.PIN_20, Pull::Up);
    let prev_btn = Input::new(p.PIN_21, Pull::Up);
    let next_btn = Input::new(p.PIN_22, Pull::Up);

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::paint_task(
            adc, x_axis, y_axis, draw_btn, next_btn, prev_btn, display,
        ))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
