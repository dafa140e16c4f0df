//! Frame-rate counter for the on-screen FPS readout.

use crate::config::FPS_WINDOW_MS;

/// Counts frames and recomputes the rate once per window.
#[derive(Clone, Copy, Debug)]
pub struct FpsCounter {
    frames: u32,
    window_start_ms: u32,
    window_ms: u32,
    fps: f32,
}

impl FpsCounter {
    pub const fn new(start_ms: u32) -> Self {
        Self::with_window(start_ms, FPS_WINDOW_MS)
    }

    pub const fn with_window(start_ms: u32, window_ms: u32) -> Self {
        Self {
            frames: 0,
            window_start_ms: start_ms,
            window_ms,
            fps: 0.0,
        }
    }

    /// Record one frame at `now_ms` and return the current rate.
    pub fn frame(&mut self, now_ms: u32) -> f32 {
        self.frames += 1;

        let elapsed = now_ms.wrapping_sub(self.window_start_ms);
        if elapsed >= self.window_ms && elapsed > 0 {
            self.fps = self.frames as f32 * 1000.0 / elapsed as f32;
            self.frames = 0;
            self.window_start_ms = now_ms;
        }

        self.fps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
