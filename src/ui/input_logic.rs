//! Button events → navigation actions.

use super::{Button, Screen};
use crate::buttons::ButtonEvent;

/// Screen after `screen`, wrapping around.
pub fn next_screen(screen: Screen) -> Screen {
    match screen {
        Screen::Gauge => Screen::Stats,
        Screen::Stats => Screen::Info,
        Screen::Info => Screen::Gauge,
    }
}

/// Screen before `screen`, wrapping around.
pub fn prev_screen(screen: Screen) -> Screen {
    match screen {
        Screen::Gauge => Screen::Info,
        Screen::Stats => Screen::Gauge,
        Screen::Info => Screen::Stats,
    }
}

/// What the frame loop has to do after a button event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiAction {
    None,
    /// Screen changed; redraw from scratch.
    ShowScreen(Screen),
    /// FPS overlay toggled on the gauge screen.
    ToggleFps(bool),
    /// Drop the potentiometer history and re-read the level.
    ResetPot,
}

/// Navigation state owned by the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiState {
    pub screen: Screen,
    pub show_fps: bool,
    /// Set once SELECT's first HOLD pulse has been handled for this press.
    select_hold_handled: bool,
}

impl UiState {
    pub const fn new() -> Self {
        Self {
            screen: Screen::Gauge,
            show_fps: true,
            select_hold_handled: false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one classified event.
///
/// PREV/NEXT step screens on CLICK and keep stepping on every HOLD
/// pulse. SELECT toggles the FPS overlay on CLICK and resets the pot
/// filter on its first HOLD pulse.
pub fn handle_event(state: &mut UiState, button: Button, event: ButtonEvent) -> UiAction {
    match (button, event) {
        (Button::Next, ButtonEvent::Click | ButtonEvent::Hold) => {
            state.screen = next_screen(state.screen);
            UiAction::ShowScreen(state.screen)
        }
        (Button::Prev, ButtonEvent::Click | ButtonEvent::Hold) => {
            state.screen = prev_screen(state.screen);
            UiAction::ShowScreen(state.screen)
        }
        (Button::Select, ButtonEvent::Press) => {
            state.select_hold_handled = false;
            UiAction::None
        }
        (Button::Select, ButtonEvent::Click) => {
            state.show_fps = !state.show_fps;
            UiAction::ToggleFps(state.show_fps)
        }
        (Button::Select, ButtonEvent::Hold) if !state.select_hold_handled => {
            state.select_hold_handled = true;
            UiAction::ResetPot
        }
        _ => UiAction::None,
    }
}

/// Press-feedback ring fill (0..=100) for a button held `held_ms` so far.
pub fn hold_progress(held_ms: u32, hold_threshold_ms: u32) -> u8 {
    if hold_threshold_ms == 0 || held_ms >= hold_threshold_ms {
        return 100;
    }
    (u64::from(held_ms) * 100 / u64::from(hold_threshold_ms)) as u8
}
