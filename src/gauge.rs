//! Radial gauge model: value clamping, colour mapping and label text.
//!
//! The arc runs from blue at 0 % to red at 100 %. Rendering lives in
//! `ui::display`; this module only decides *what* to draw and whether it
//! changed since the last frame.

use core::fmt::Write;

use heapless::String;

/// 8-bit-per-channel colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub fn clamp_percent(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Hue in degrees: 240 (blue) at 0 %, 0 (red) at 100 %.
pub fn percent_to_hue(percent: u8) -> u16 {
    let p = u16::from(percent.min(100));
    240 - p * 240 / 100
}

/// Integer HSV → RGB. `h` in degrees (0..360), `s` and `v` in percent.
pub fn hsv_to_rgb(h: u16, s: u8, v: u8) -> Rgb {
    let h = u32::from(h % 360) * 255 / 360;
    let s = u32::from(s.min(100)) * 255 / 100;
    let v = u32::from(v.min(100)) * 255 / 100;

    if s == 0 {
        return Rgb::new(v as u8, v as u8, v as u8);
    }

    let region = h / 43;
    let remainder = (h - region * 43) * 6;

    let p = (v * (255 - s)) >> 8;
    let q = (v * (255 - ((s * remainder) >> 8))) >> 8;
    let t = (v * (255 - ((s * (255 - remainder)) >> 8))) >> 8;

    let (r, g, b) = match region {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(r as u8, g as u8, b as u8)
}

/// Arc colour for a gauge value (full saturation and brightness).
pub fn percent_color(percent: u8) -> Rgb {
    hsv_to_rgb(percent_to_hue(percent), 100, 100)
}

/// What needs redrawing after [`GaugeModel::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GaugeChange {
    pub value: bool,
    pub color: bool,
}

impl GaugeChange {
    pub fn any(&self) -> bool {
        self.value || self.color
    }
}

/// Last drawn gauge state, so unchanged frames skip the SPI traffic.
#[derive(Clone, Copy, Debug)]
pub struct GaugeModel {
    percent: Option<u8>,
    color: Rgb,
}

impl GaugeModel {
    pub const fn new() -> Self {
        Self {
            percent: None,
            // Arc style starts red until the first reading arrives.
            color: Rgb::new(255, 0, 0),
        }
    }

    pub fn update(&mut self, value: i32) -> GaugeChange {
        let percent = clamp_percent(value);
        let color = percent_color(percent);

        let change = GaugeChange {
            value: self.percent != Some(percent),
            color: self.color != color,
        };
        self.percent = Some(percent);
        self.color = color;
        change
    }

    pub fn percent(&self) -> u8 {
        self.percent.unwrap_or(0)
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Force the next update to redraw everything (e.g. after a screen switch).
    pub fn invalidate(&mut self) {
        self.percent = None;
    }
}

impl Default for GaugeModel {
    fn default() -> Self {
        Self::new()
    }
}

pub fn percent_label(percent: u8) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{}%", percent);
    s
}

pub fn fps_label(fps: f32) -> String<16> {
    let mut s = String::new();
    let _ = write!(s, "FPS: {:.1}", fps);
    s
}
