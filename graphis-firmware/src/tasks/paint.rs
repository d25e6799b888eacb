//! Paint task - main control loop
//!
//! Sole owner of the engine, the renderer, and every input peripheral.
//! Each tick: read both joystick axes, sample the three buttons, run the
//! engine, hand the frame to the render dispatcher. The tick task only
//! supplies timestamps, so all engine state has exactly one writer.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Timer};

use graphis_core::engine::{EngineConfig, PaintEngine, TickInput};
use graphis_core::input::ButtonLevels;
use graphis_core::palette::Palette;
use graphis_core::render::{RenderConfig, Renderer};
use graphis_drivers::display::Ili9341;

use crate::tasks::tick::TICK_SIGNAL;

/// Display driver type for this board's wiring
pub type BoardDisplay =
    Ili9341<Spi<'static, SPI0, Blocking>, Output<'static>, Output<'static>, Output<'static>>;

/// Warm-up conversions per axis before the first classified sample
const ADC_WARMUP_READS: usize = 20;

/// Paint task - drives the engine and the display
#[embassy_executor::task]
pub async fn paint_task(
    mut adc: Adc<'static, Async>,
    mut x_axis: Channel<'static>,
    mut y_axis: Channel<'static>,
    draw_btn: Input<'static>,
    next_btn: Input<'static>,
    prev_btn: Input<'static>,
    mut display: BoardDisplay,
) {
    info!("Paint task started");

    // Let the ADC mux settle before trusting samples
    for _ in 0..ADC_WARMUP_READS {
        let _ = adc.read(&mut x_axis).await;
        let _ = adc.read(&mut y_axis).await;
        Timer::after(Duration::from_millis(10)).await;
    }

    let palette = Palette::default();
    let mut engine = PaintEngine::new(EngineConfig::default(), palette);
    let mut renderer = Renderer::new(RenderConfig::default(), palette);

    // Last good conversions, reused if a read fails; start at the stick's
    // resting midpoint so a bad first read cannot fake a deflection
    let mut x_sample: u16 = 2048;
    let mut y_sample: u16 = 2048;

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        match adc.read(&mut x_axis).await {
            Ok(v) => x_sample = v,
            Err(_) => warn!("x axis conversion failed, reusing last sample"),
        }
        match adc.read(&mut y_axis).await {
            Ok(v) => y_sample = v,
            Err(_) => warn!("y axis conversion failed, reusing last sample"),
        }

        let input = TickInput {
            x_sample,
            y_sample,
            levels: ButtonLevels {
                draw: draw_btn.is_high(),
                next: next_btn.is_high(),
                prev: prev_btn.is_high(),
            },
            now_ms,
        };

        let frame = engine.tick(input);

        if renderer.render(&mut display, &frame).is_err() {
            // Frame dropped; the renderer's erase target is unchanged,
            // so the next tick repaints from intact state
            warn!("display write failed, frame dropped");
        }
    }
}
