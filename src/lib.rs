//! roundgauge - firmware library for a round-display gauge gadget.
//!
//! Pure logic modules (button classification, potentiometer filtering,
//! gauge model, navigation) build for the host so they can be unit
//! tested without hardware. Board glue (GPIO lines, GC9A01 display) is
//! only compiled with the `embedded` feature and is used by `main.rs`.
//!
//! Usage: `cargo test` on the host, `cargo run --release --features embedded`
//! with a probe attached for the firmware.

#![cfg_attr(not(test), no_std)]

pub mod buttons;
pub mod config;
pub mod error;
pub mod fps;
pub mod gauge;
pub mod pot_logic;
pub mod ui;

pub use buttons::{ButtonClassifier, ButtonEvent, Clock, InputLines, PullMode, Timing};
pub use error::Error;
