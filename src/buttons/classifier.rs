use super::{ButtonEvent, Clock, InputLines, PullMode};
use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_HOLD_MS};
use crate::error::Error;

/// Time policy for click/hold classification (all values in ms).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Presses shorter than this are bounce and never become a click.
    pub debounce_ms: u32,
    /// Hold threshold used by [`ButtonClassifier::poll`].
    pub hold_threshold_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_ms: BUTTON_DEBOUNCE_MS,
            hold_threshold_ms: BUTTON_HOLD_MS,
        }
    }
}

/// Tracked state of one button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Channel<Id> {
    id: Id,
    is_pressed: bool,
    press_start_ms: u32,
    hold_reported: bool,
    last_hold_report_ms: u32,
}

impl<Id: Copy> Channel<Id> {
    fn new(id: Id) -> Self {
        Self {
            id,
            is_pressed: false,
            press_start_ms: 0,
            hold_reported: false,
            last_hold_report_ms: 0,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Start of the current press. Only meaningful while pressed.
    pub fn press_start_ms(&self) -> u32 {
        self.press_start_ms
    }

    pub fn hold_reported(&self) -> bool {
        self.hold_reported
    }

    pub fn last_hold_report_ms(&self) -> u32 {
        self.last_hold_report_ms
    }
}

/// Debounced press/click/hold detector for a fixed set of buttons.
///
/// Owns one [`Channel`] per identifier for its whole lifetime; channels
/// are only mutated by [`poll`](Self::poll). Call `poll` once per button
/// per frame. Edges that start and end between two polls are missed.
pub struct ButtonClassifier<L: InputLines, C: Clock, const N: usize> {
    channels: [Channel<L::Id>; N],
    lines: L,
    clock: C,
    timing: Timing,
}

impl<L: InputLines, C: Clock, const N: usize> ButtonClassifier<L, C, N> {
    /// Number of channels; construction rejects zero.
    pub const CHANNELS: usize = N;

    /// Create a classifier with default [`Timing`].
    ///
    /// Identifiers must be unique and at least one is required.
    pub fn new(ids: [L::Id; N], lines: L, clock: C) -> Result<Self, Error> {
        Self::with_timing(ids, lines, clock, Timing::default())
    }

    pub fn with_timing(ids: [L::Id; N], lines: L, clock: C, timing: Timing) -> Result<Self, Error> {
        if N == 0 {
            return Err(Error::NoChannels);
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(Error::DuplicateChannel);
            }
        }

        Ok(Self {
            channels: ids.map(Channel::new),
            lines,
            clock,
            timing,
        })
    }

    /// Configure every line as an input with the given pull mode.
    pub fn activate(&mut self, pull: PullMode) {
        for channel in &self.channels {
            self.lines.configure(channel.id, pull);
        }
    }

    /// Classify `id` using the configured hold threshold.
    pub fn poll(&mut self, id: L::Id) -> ButtonEvent {
        self.poll_with_threshold(id, self.timing.hold_threshold_ms)
    }

    /// Sample the line of `id` and advance its state machine by one step.
    ///
    /// Unknown identifiers yield [`ButtonEvent::None`] and touch nothing.
    pub fn poll_with_threshold(&mut self, id: L::Id, hold_threshold_ms: u32) -> ButtonEvent {
        let Some(index) = self.index_of(id) else {
            return ButtonEvent::None;
        };

        let pressed_now = self.lines.is_low(id);
        let now = self.clock.now_ms();
        let debounce_ms = self.timing.debounce_ms;
        let btn = &mut self.channels[index];

        let press_duration = if btn.is_pressed {
            now.wrapping_sub(btn.press_start_ms)
        } else {
            0
        };

        match (pressed_now, btn.is_pressed) {
            (true, false) => {
                btn.is_pressed = true;
                btn.press_start_ms = now;
                btn.hold_reported = false;
                btn.last_hold_report_ms = 0;
                ButtonEvent::Press
            }
            (true, true) => {
                if press_duration < hold_threshold_ms {
                    return ButtonEvent::None;
                }

                if !btn.hold_reported {
                    btn.hold_reported = true;
                    btn.last_hold_report_ms = now;
                    #[cfg(feature = "defmt")]
                    defmt::trace!("buttons: first hold on channel {}", index);
                    return ButtonEvent::Hold;
                }

                if now.wrapping_sub(btn.last_hold_report_ms) >= hold_threshold_ms {
                    btn.last_hold_report_ms = now;
                    #[cfg(feature = "defmt")]
                    defmt::trace!("buttons: repeat hold on channel {}", index);
                    return ButtonEvent::Hold;
                }

                ButtonEvent::None
            }
            (false, true) => {
                btn.is_pressed = false;
                if !btn.hold_reported && press_duration >= debounce_ms {
                    ButtonEvent::Click
                } else {
                    ButtonEvent::None
                }
            }
            (false, false) => ButtonEvent::None,
        }
    }

    /// How long `id` has been held so far; 0 if released or unknown.
    pub fn pressed_duration(&self, id: L::Id) -> u32 {
        match self.channel(id) {
            Some(btn) if btn.is_pressed => self.clock.now_ms().wrapping_sub(btn.press_start_ms),
            _ => 0,
        }
    }

    pub fn channel(&self, id: L::Id) -> Option<&Channel<L::Id>> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn channels(&self) -> &[Channel<L::Id>] {
        &self.channels
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    fn index_of(&self, id: L::Id) -> Option<usize> {
        self.channels.iter().position(|c| c.id == id)
    }
}
