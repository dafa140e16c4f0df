//! User interface subsystem - round TFT + physical buttons.
//!
//! The UI loop polls the button classifier once per frame, maps the
//! events to navigation actions and renders the current screen on the
//! GC9A01 panel.
//!
//! ## Components
//!
//! - **Display**: GC9A01 240×240 round TFT via SPI (embedded only), drawn
//!   by `render` on any `Rgb565` draw target
//! - **Buttons**: 3 tactile switches, active-low (PREV, SELECT, NEXT)

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod input_logic;
#[cfg(any(test, feature = "embedded"))]
pub mod render;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Radial gauge with the potentiometer level.
    Gauge,
    /// Raw numbers: percent, frame rate, button hold times.
    Stats,
    /// Firmware name, version and uptime.
    Info,
}

/// Physical buttons, in classifier channel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Prev,
    Select,
    Next,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Prev, Button::Select, Button::Next];

    /// Channel identifier used with the button classifier.
    pub const fn channel(self) -> usize {
        self as usize
    }
}

const _: () = assert!(Button::ALL.len() == crate::config::BUTTON_COUNT);
