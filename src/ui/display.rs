//! GC9A01 round TFT wrapper.

use embassy_nrf::gpio::Output;
use embassy_time::{Delay, Duration, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use mipidsi::interface::SpiInterface;
use mipidsi::models::GC9A01;
use mipidsi::options::{ColorInversion, ColorOrder, Orientation, Rotation};

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SHOW_SPLASH, SPLASH_MS};
use crate::error::Error;
use crate::ui::render;

/// Type alias for the concrete display driver.
///
/// Generic over the SPI device so callers pick the bus and chip-select
/// handling.
pub type Display<SPI> = mipidsi::Display<SpiInterface<'static, SPI, Output<'static>>, GC9A01, Output<'static>>;

/// Initialise the GC9A01 panel and clear the screen.
pub fn init<SPI>(
    spi: SPI,
    dc: Output<'static>,
    rst: Output<'static>,
    buffer: &'static mut [u8],
) -> Result<Display<SPI>, Error>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    let interface = SpiInterface::new(spi, dc, buffer);
    let mut delay = Delay;

    let mut display = mipidsi::Builder::new(GC9A01, interface)
        .reset_pin(rst)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .color_order(ColorOrder::Bgr)
        .invert_colors(ColorInversion::Inverted)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .init(&mut delay)
        .map_err(|_| Error::Display)?;

    display.clear(Rgb565::BLACK).map_err(|_| Error::Display)?;
    Ok(display)
}

/// Show the two boot splash stages, if enabled in `config`.
pub async fn splash<SPI>(display: &mut Display<SPI>)
where
    SPI: embedded_hal::spi::SpiDevice,
{
    if !SHOW_SPLASH {
        return;
    }

    render::draw_panel_check(display);
    Timer::after(Duration::from_millis(SPLASH_MS)).await;
    render::draw_greeting(display);
    Timer::after(Duration::from_millis(SPLASH_MS)).await;
}
