//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and filter
//! constants live here so they can be tuned in one place.

// Buttons

/// Minimum press length (ms) for a release to count as a click.
/// Shorter presses are treated as contact bounce.
pub const BUTTON_DEBOUNCE_MS: u32 = 50;

/// Press length (ms) after which a press becomes a hold. HOLD events
/// repeat at the same cadence while the button stays down.
pub const BUTTON_HOLD_MS: u32 = 1000;

/// Number of physical buttons (PREV, SELECT, NEXT).
pub const BUTTON_COUNT: usize = 3;

// Potentiometer

/// Raw reading treated as 0 % (wiper noise near the end stop).
/// The SAADC runs at 12 bit, so raw readings span 0..=4095.
pub const POT_RAW_MIN: u16 = 16;

/// Raw reading treated as 100 %.
pub const POT_RAW_MAX: u16 = 4080;

/// Moving-average window length (samples).
pub const POT_AVERAGE_WINDOW: usize = 8;

/// Percent change required before the gauge follows the pot.
pub const POT_HYSTERESIS: u8 = 2;

/// Interval between potentiometer samples (ms).
pub const POT_SAMPLE_MS: u64 = 10;

// Display

/// GC9A01 panel resolution (square, round glass).
pub const DISPLAY_WIDTH: u16 = 240;
pub const DISPLAY_HEIGHT: u16 = 240;

/// Outer diameter of the gauge arc (px).
pub const GAUGE_DIAMETER: u32 = 200;

/// Stroke width of the gauge arc (px).
pub const GAUGE_STROKE: u32 = 18;

/// Show the panel check and greeting screens before the UI starts.
pub const SHOW_SPLASH: bool = true;

/// How long each boot splash stage stays up (ms).
pub const SPLASH_MS: u64 = 1000;

// Frame loop

/// Delay at the end of every frame (ms).
pub const FRAME_DELAY_MS: u64 = 2;

/// Window over which frames are counted for the FPS readout (ms).
pub const FPS_WINDOW_MS: u32 = 1000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button PREV    → P0.11
//   Button SELECT  → P0.12
//   Button NEXT    → P0.24
//   Pot wiper      → P0.02 (AIN0)
//   TFT SCK        → P0.27
//   TFT MOSI       → P0.26
//   TFT CS         → P0.30
//   TFT DC         → P0.31
//   TFT RST        → P0.29
