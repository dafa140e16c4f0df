//! GPIO button lines and monotonic clock for the button classifier.
//!
//! Three physical buttons (active-low with internal pull-up):
//!   - PREV   - previous screen (repeats while held)
//!   - SELECT - toggle FPS overlay / hold to re-read the pot
//!   - NEXT   - next screen (repeats while held)
//!
//! The frame loop polls these lines through `ButtonClassifier`; there is
//! no edge interrupt, so a press shorter than one frame can be missed.

use crate::buttons::{Clock, InputLines, PullMode};
use embassy_nrf::gpio::{AnyPin, Flex, Pull};
use embassy_time::Instant;

/// Embassy time driver as a wrapping millisecond counter.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation is intended: the classifier works on wrapping differences.
        Instant::now().as_millis() as u32
    }
}

/// Button lines addressed by index (channel id = position in the array).
pub struct NrfLines<const N: usize> {
    pins: [Flex<'static>; N],
}

impl<const N: usize> NrfLines<N> {
    /// Pins stay disconnected until `ButtonClassifier::activate`.
    pub fn new(pins: [AnyPin; N]) -> Self {
        Self {
            pins: pins.map(|pin| Flex::new(pin)),
        }
    }
}

impl<const N: usize> InputLines for NrfLines<N> {
    type Id = usize;

    fn configure(&mut self, id: usize, pull: PullMode) {
        let pull = match pull {
            PullMode::PullUp => Pull::Up,
            PullMode::Floating => Pull::None,
        };
        if let Some(pin) = self.pins.get_mut(id) {
            pin.set_as_input(pull);
        }
    }

    fn is_low(&mut self, id: usize) -> bool {
        self.pins.get(id).is_some_and(|pin| pin.is_low())
    }
}
