//! Button event classification.
//!
//! Turns a noisy, point-in-time "line is low" reading per button into
//! discrete events: PRESS on the rising edge, CLICK on a short release,
//! and HOLD pulses while a button stays down past the hold threshold.
//!
//! The classifier is polled from the frame loop. It reads the physical
//! line and the monotonic clock through two small collaborator traits so
//! the logic runs unchanged on the host (tests) and on the target.

mod classifier;

#[cfg(test)]
mod tests;

pub use classifier::{ButtonClassifier, Channel, Timing};

/// Event produced by one call to [`ButtonClassifier::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Nothing to report.
    None,
    /// Button just went down. Fired once per press.
    Press,
    /// Button is being held down. Reserved; the classifier never emits it.
    Pressed,
    /// Button released after a short press (debounce floor..hold threshold).
    Click,
    /// Button held past the hold threshold. Repeats at the threshold cadence.
    Hold,
}

/// Input mode applied to every line by [`ButtonClassifier::activate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PullMode {
    /// Internal pull-up enabled (buttons switch to ground).
    PullUp,
    /// No internal pull; an external resistor sets the idle level.
    Floating,
}

/// Monotonic millisecond clock.
///
/// The counter may wrap; the classifier only ever takes wrapping
/// differences of two readings.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Digital input lines addressed by an opaque channel identifier.
pub trait InputLines {
    type Id: Copy + PartialEq;

    /// Prepare `id` for input reads.
    fn configure(&mut self, id: Self::Id, pull: PullMode);

    /// Physical level of `id`. Buttons are active-low, so `true` means pressed.
    fn is_low(&mut self, id: Self::Id) -> bool;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: InputLines + ?Sized> InputLines for &mut T {
    type Id = T::Id;

    fn configure(&mut self, id: Self::Id, pull: PullMode) {
        (**self).configure(id, pull)
    }

    fn is_low(&mut self, id: Self::Id) -> bool {
        (**self).is_low(id)
    }
}
