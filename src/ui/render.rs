//! Screen rendering for the round panel.
//!
//! Rendering is incremental: [`View`] remembers what is on the panel and
//! only pushes the parts of a screen that changed, because a full
//! 240×240 redraw over SPI costs far more than one frame. Everything here
//! draws on any `DrawTarget<Color = Rgb565>`.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use heapless::String;

use crate::config::{BUTTON_COUNT, DISPLAY_HEIGHT, DISPLAY_WIDTH, GAUGE_DIAMETER, GAUGE_STROKE};
use crate::gauge::{fps_label, percent_label, GaugeModel, Rgb};
use crate::ui::Screen;

const CENTER: Point = Point::new(DISPLAY_WIDTH as i32 / 2, DISPLAY_HEIGHT as i32 / 2);

/// Gauge opening at the bottom: starts bottom-left, sweeps clockwise.
const GAUGE_START_DEG: f32 = 135.0;
const GAUGE_SWEEP_DEG: f32 = 270.0;

const RING_DIAMETER: u32 = 150;
const RING_STROKE: u32 = 4;

const TRACK_COLOR: Rgb565 = Rgb565::new(4, 8, 4);

/// Everything one frame may show.
#[derive(Clone, Copy, Debug)]
pub struct FrameData {
    pub screen: Screen,
    pub percent: u8,
    pub show_fps: bool,
    pub fps: f32,
    /// SELECT hold feedback ring, 0..=100.
    pub hold_progress: u8,
    pub held_ms: [u32; BUTTON_COUNT],
    pub uptime_secs: u32,
}

#[derive(Clone, PartialEq)]
struct StatsSnapshot {
    percent: u8,
    fps: String<16>,
    held_tenths: [u32; BUTTON_COUNT],
}

/// What is currently on the panel.
pub struct View {
    screen: Option<Screen>,
    gauge: GaugeModel,
    fps: String<16>,
    ring: u8,
    stats: Option<StatsSnapshot>,
    info_secs: Option<u32>,
}

impl View {
    pub const fn new() -> Self {
        Self {
            screen: None,
            gauge: GaugeModel::new(),
            fps: String::new(),
            ring: 0,
            stats: None,
            info_secs: None,
        }
    }

    /// Push the parts of `frame` that differ from what is on the panel.
    pub fn render<D>(&mut self, display: &mut D, frame: &FrameData)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.screen != Some(frame.screen) {
            let _ = display.clear(Rgb565::BLACK);
            self.screen = Some(frame.screen);
            self.gauge.invalidate();
            self.fps.clear();
            self.ring = 0;
            self.stats = None;
            self.info_secs = None;

            if frame.screen == Screen::Gauge {
                draw_arc(display, GAUGE_DIAMETER, GAUGE_STROKE, GAUGE_START_DEG, GAUGE_SWEEP_DEG, TRACK_COLOR);
            }
        }

        match frame.screen {
            Screen::Gauge => self.render_gauge(display, frame),
            Screen::Stats => self.render_stats(display, frame),
            Screen::Info => self.render_info(display, frame),
        }
    }

    fn render_gauge<D>(&mut self, display: &mut D, frame: &FrameData)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.gauge.update(i32::from(frame.percent)).any() {
            draw_gauge(display, self.gauge.percent(), self.gauge.color());
            let label = percent_label(self.gauge.percent());
            draw_label(display, &label, CENTER, &FONT_10X20, Size::new(60, 24));
        }

        let fps = if frame.show_fps {
            fps_label(frame.fps)
        } else {
            String::new()
        };
        if fps != self.fps {
            draw_label(display, &fps, CENTER + Point::new(0, 40), &FONT_6X10, Size::new(72, 12));
            self.fps = fps;
        }

        if frame.hold_progress != self.ring {
            draw_hold_ring(display, frame.hold_progress);
            self.ring = frame.hold_progress;
        }
    }

    fn render_stats<D>(&mut self, display: &mut D, frame: &FrameData)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let snapshot = StatsSnapshot {
            percent: frame.percent,
            fps: fps_label(frame.fps),
            held_tenths: frame.held_ms.map(|ms| ms / 100),
        };
        if self.stats.as_ref() == Some(&snapshot) {
            return;
        }

        let mut line: String<32> = String::new();
        let _ = write!(line, "Level: {}%", snapshot.percent);
        draw_label(display, &line, Point::new(CENTER.x, 70), &FONT_10X20, Size::new(180, 24));

        draw_label(display, &snapshot.fps, Point::new(CENTER.x, 100), &FONT_10X20, Size::new(180, 24));

        for (row, (name, tenths)) in ["PREV", "SEL", "NEXT"]
            .iter()
            .zip(snapshot.held_tenths.iter())
            .enumerate()
        {
            line.clear();
            let _ = write!(line, "{:<4} {}.{}s", name, tenths / 10, tenths % 10);
            let y = 135 + row as i32 * 16;
            draw_label(display, &line, Point::new(CENTER.x, y), &FONT_6X10, Size::new(120, 12));
        }

        self.stats = Some(snapshot);
    }

    fn render_info<D>(&mut self, display: &mut D, frame: &FrameData)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.info_secs == Some(frame.uptime_secs) {
            return;
        }

        if self.info_secs.is_none() {
            draw_label(display, env!("CARGO_PKG_NAME"), Point::new(CENTER.x, 90), &FONT_10X20, Size::new(180, 24));
            draw_label(display, env!("CARGO_PKG_VERSION"), Point::new(CENTER.x, 115), &FONT_6X10, Size::new(120, 12));
        }

        let mut line: String<32> = String::new();
        let secs = frame.uptime_secs;
        let _ = write!(line, "up {:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
        draw_label(display, &line, Point::new(CENTER.x, 145), &FONT_6X10, Size::new(120, 12));

        self.info_secs = Some(secs);
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

/// Radius of the panel check circle on the boot splash.
const SPLASH_RADIUS: u32 = 60;

/// Boot splash, first stage: proves the panel and SPI link work.
pub fn draw_panel_check<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let _ = display.clear(Rgb565::BLACK);
    draw_label(display, "GC9A01 OK", CENTER - Point::new(0, 20), &FONT_10X20, Size::new(120, 24));
    let _ = Circle::with_center(CENTER, SPLASH_RADIUS * 2 + 1)
        .into_styled(PrimitiveStyle::with_stroke(Rgb565::RED, 1))
        .draw(display);
}

/// Boot splash, second stage: firmware name and version.
pub fn draw_greeting<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let _ = display.clear(Rgb565::BLACK);
    draw_label(display, env!("CARGO_PKG_NAME"), CENTER, &FONT_10X20, Size::new(180, 24));
    draw_label(display, env!("CARGO_PKG_VERSION"), CENTER + Point::new(0, 24), &FONT_6X10, Size::new(120, 12));
}

fn to_rgb565(color: Rgb) -> Rgb565 {
    Rgb565::from(Rgb888::new(color.r, color.g, color.b))
}

fn draw_arc<D>(display: &mut D, diameter: u32, stroke: u32, start_deg: f32, sweep_deg: f32, color: Rgb565)
where
    D: DrawTarget<Color = Rgb565>,
{
    let _ = Arc::with_center(
        CENTER,
        diameter,
        Angle::from_degrees(start_deg),
        Angle::from_degrees(sweep_deg),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, stroke))
    .draw(display);
}

/// Track first so a shrinking value erases the old tail.
fn draw_gauge<D>(display: &mut D, percent: u8, color: Rgb)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_arc(display, GAUGE_DIAMETER, GAUGE_STROKE, GAUGE_START_DEG, GAUGE_SWEEP_DEG, TRACK_COLOR);
    if percent > 0 {
        let sweep = GAUGE_SWEEP_DEG * f32::from(percent) / 100.0;
        draw_arc(display, GAUGE_DIAMETER, GAUGE_STROKE, GAUGE_START_DEG, sweep, to_rgb565(color));
    }
}

fn draw_hold_ring<D>(display: &mut D, progress: u8)
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_arc(display, RING_DIAMETER, RING_STROKE, -90.0, 360.0, Rgb565::BLACK);
    if progress > 0 {
        let sweep = 360.0 * f32::from(progress.min(100)) / 100.0;
        draw_arc(display, RING_DIAMETER, RING_STROKE, -90.0, sweep, Rgb565::WHITE);
    }
}

/// Clear a box centred on `center`, then draw `text` centred in it.
fn draw_label<D>(display: &mut D, text: &str, center: Point, font: &'static MonoFont<'static>, clear: Size)
where
    D: DrawTarget<Color = Rgb565>,
{
    let _ = Rectangle::with_center(center, clear)
        .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
        .draw(display);

    let style: MonoTextStyle<'static, Rgb565> = MonoTextStyleBuilder::new()
        .font(font)
        .text_color(Rgb565::WHITE)
        .build();
    let baseline = center + Point::new(0, font.character_size.height as i32 / 3);
    let _ = Text::with_alignment(text, baseline, style, Alignment::Center).draw(display);
}
