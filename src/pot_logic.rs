//! Potentiometer smoothing: moving average, range mapping and hysteresis.
//!
//! Every filter here owns its own state; the sampling task owns one
//! [`PotFilter`] and feeds it raw SAADC readings.

use crate::config::{POT_AVERAGE_WINDOW, POT_HYSTERESIS, POT_RAW_MAX, POT_RAW_MIN};

/// Running mean over the last `N` samples.
#[derive(Clone, Debug)]
pub struct MovingAverage<const N: usize> {
    samples: [u16; N],
    next: usize,
    filled: usize,
    sum: u32,
}

impl<const N: usize> MovingAverage<N> {
    pub const fn new() -> Self {
        Self {
            samples: [0; N],
            next: 0,
            filled: 0,
            sum: 0,
        }
    }

    /// Add a sample and return the mean of the samples seen so far
    /// (at most the last `N`).
    pub fn push(&mut self, sample: u16) -> u16 {
        if N == 0 {
            return sample;
        }

        if self.filled == N {
            self.sum -= u32::from(self.samples[self.next]);
        } else {
            self.filled += 1;
        }
        self.samples[self.next] = sample;
        self.sum += u32::from(sample);
        self.next = (self.next + 1) % N;

        (self.sum / self.filled as u32) as u16
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<const N: usize> Default for MovingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw reading onto 0..=100, clamping outside `[min, max]`.
pub fn raw_to_percent(raw: u16, min: u16, max: u16) -> u8 {
    if max <= min || raw <= min {
        return 0;
    }
    if raw >= max {
        return 100;
    }
    (u32::from(raw - min) * 100 / u32::from(max - min)) as u8
}

/// Suppresses percent jitter smaller than `band`.
///
/// The end stops (0 and 100) always get through so the gauge can reach
/// them even when the last step was smaller than the band.
#[derive(Clone, Copy, Debug)]
pub struct Hysteresis {
    band: u8,
    current: Option<u8>,
}

impl Hysteresis {
    pub const fn new(band: u8) -> Self {
        Self {
            band,
            current: None,
        }
    }

    /// Returns `Some(value)` when the reported value changes.
    pub fn update(&mut self, value: u8) -> Option<u8> {
        let accept = match self.current {
            None => true,
            Some(cur) if cur == value => false,
            Some(_) if value == 0 || value == 100 => true,
            Some(cur) => cur.abs_diff(value) >= self.band,
        };

        if accept {
            self.current = Some(value);
            Some(value)
        } else {
            None
        }
    }

    pub fn current(&self) -> Option<u8> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Full potentiometer pipeline: raw SAADC sample in, gauge percent out.
#[derive(Clone, Debug)]
pub struct PotFilter {
    average: MovingAverage<POT_AVERAGE_WINDOW>,
    hysteresis: Hysteresis,
}

impl PotFilter {
    pub const fn new() -> Self {
        Self {
            average: MovingAverage::new(),
            hysteresis: Hysteresis::new(POT_HYSTERESIS),
        }
    }

    /// Feed one raw sample. SAADC can report small negative values near
    /// ground; those count as zero.
    ///
    /// Returns the new percent when the gauge should move.
    pub fn push(&mut self, raw: i16) -> Option<u8> {
        let raw = raw.max(0) as u16;
        let mean = self.average.push(raw);
        self.hysteresis
            .update(raw_to_percent(mean, POT_RAW_MIN, POT_RAW_MAX))
    }

    /// Last reported percent, if any sample has been taken.
    pub fn percent(&self) -> Option<u8> {
        self.hysteresis.current()
    }

    /// Forget history so the next sample is reported immediately.
    pub fn reset(&mut self) {
        self.average.reset();
        self.hysteresis.reset();
    }
}

impl Default for PotFilter {
    fn default() -> Self {
        Self::new()
    }
}
