//! Unified error type for roundgauge.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Buttons
    /// A button classifier was constructed without any channels.
    NoChannels,

    /// The same channel identifier was passed twice at construction.
    DuplicateChannel,

    // Display
    /// SPI transaction or panel initialisation failed.
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::NoChannels => f.write_str("button classifier needs at least one channel"),
            Error::DuplicateChannel => f.write_str("duplicate button channel identifier"),
            Error::Display => f.write_str("display error"),
        }
    }
}
