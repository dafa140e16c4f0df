//! Unit tests for the button classifier.
//!
//! These tests run on the host (not embedded) and drive the classifier
//! with a fake clock and fake input lines.

use core::cell::Cell;

use super::{ButtonClassifier, ButtonEvent, Clock, InputLines, PullMode, Timing};
use crate::error::Error;

struct FakeClock {
    now: Cell<u32>,
}

impl FakeClock {
    fn at(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Four lines with ids 10, 11, 12, 13. All start released (high).
struct FakeLines {
    low: [Cell<bool>; 4],
    configured: Cell<[Option<PullMode>; 4]>,
    reads: Cell<u32>,
}

impl FakeLines {
    fn new() -> Self {
        Self {
            low: Default::default(),
            configured: Cell::new([None; 4]),
            reads: Cell::new(0),
        }
    }

    fn press(&self, id: u8) {
        self.low[usize::from(id - 10)].set(true);
    }

    fn release(&self, id: u8) {
        self.low[usize::from(id - 10)].set(false);
    }
}

impl InputLines for &FakeLines {
    type Id = u8;

    fn configure(&mut self, id: u8, pull: PullMode) {
        let mut modes = self.configured.get();
        modes[usize::from(id - 10)] = Some(pull);
        self.configured.set(modes);
    }

    fn is_low(&mut self, id: u8) -> bool {
        self.reads.set(self.reads.get() + 1);
        self.low[usize::from(id - 10)].get()
    }
}

type Classifier<'a, const N: usize> = ButtonClassifier<&'a FakeLines, &'a FakeClock, N>;

fn classifier<'a>(lines: &'a FakeLines, clock: &'a FakeClock) -> Classifier<'a, 2> {
    ButtonClassifier::new([10, 11], lines, clock).unwrap()
}

/// Press at `start`, poll every `step` ms while held for `held` ms, then
/// release. Returns every non-`None` event with its timestamp.
fn run_press(
    c: &mut Classifier<'_, 2>,
    lines: &FakeLines,
    clock: &FakeClock,
    start: u32,
    held: u32,
    step: u32,
) -> Vec<(u32, ButtonEvent)> {
    let mut events = Vec::new();
    clock.set(start);
    lines.press(10);

    let mut elapsed = 0;
    loop {
        clock.set(start.wrapping_add(elapsed));
        let ev = c.poll(10);
        if ev != ButtonEvent::None {
            events.push((elapsed, ev));
        }
        if elapsed >= held {
            break;
        }
        elapsed = (elapsed + step).min(held);
    }

    lines.release(10);
    let ev = c.poll(10);
    if ev != ButtonEvent::None {
        events.push((held, ev));
    }
    events
}

// ═══════════════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn new_starts_all_channels_released() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(500);
    let c = classifier(&lines, &clock);

    assert_eq!(Classifier::<'_, 2>::CHANNELS, 2);
    assert_eq!(c.channels().len(), Classifier::<'_, 2>::CHANNELS);
    for ch in c.channels() {
        assert!(!ch.is_pressed());
        assert_eq!(ch.press_start_ms(), 0);
        assert!(!ch.hold_reported());
        assert_eq!(ch.last_hold_report_ms(), 0);
    }
    assert_eq!(c.timing(), Timing::default());
}

#[test]
fn new_rejects_zero_channels() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let result: Result<Classifier<'_, 0>, _> = ButtonClassifier::new([], &lines, &clock);
    assert!(matches!(result, Err(Error::NoChannels)));
}

#[test]
fn new_rejects_duplicate_ids() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let result = ButtonClassifier::new([10, 11, 10], &lines, &clock);
    assert!(matches!(result, Err(Error::DuplicateChannel)));
}

#[test]
fn activate_configures_every_line_with_shared_mode() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = ButtonClassifier::new([12, 10, 13], &lines, &clock).unwrap();

    c.activate(PullMode::PullUp);
    assert_eq!(
        lines.configured.get(),
        [Some(PullMode::PullUp), None, Some(PullMode::PullUp), Some(PullMode::PullUp)]
    );

    c.activate(PullMode::Floating);
    assert_eq!(lines.configured.get()[0], Some(PullMode::Floating));
}

// ═══════════════════════════════════════════════════════════════════════════
// Press / click / bounce
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn press_fires_once_per_press() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(100);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);
    for _ in 0..20 {
        clock.advance(10);
        assert_eq!(c.poll(10), ButtonEvent::None);
    }

    let ch = c.channel(10).unwrap();
    assert!(ch.is_pressed());
    assert_eq!(ch.press_start_ms(), 100);
}

#[test]
fn short_press_above_debounce_is_click() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    for held in [50, 51, 300, 999] {
        let events = run_press(&mut c, &lines, &clock, 1_000, held, 7);
        assert_eq!(
            events,
            [(0, ButtonEvent::Press), (held, ButtonEvent::Click)],
            "held {} ms",
            held
        );
    }
}

#[test]
fn bounce_below_debounce_is_suppressed() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    for held in [0, 1, 20, 49] {
        let events = run_press(&mut c, &lines, &clock, 2_000, held, 5);
        assert_eq!(events, [(0, ButtonEvent::Press)], "held {} ms", held);
        assert!(!c.channel(10).unwrap().is_pressed());
    }
}

#[test]
fn custom_debounce_floor_is_respected() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let timing = Timing {
        debounce_ms: 120,
        hold_threshold_ms: 800,
    };
    let mut c = ButtonClassifier::with_timing([10, 11], &lines, &clock, timing).unwrap();

    let events = run_press(&mut c, &lines, &clock, 0, 100, 10);
    assert_eq!(events, [(0, ButtonEvent::Press)]);

    let events = run_press(&mut c, &lines, &clock, 5_000, 120, 10);
    assert_eq!(events, [(0, ButtonEvent::Press), (120, ButtonEvent::Click)]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Hold
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn hold_repeats_at_threshold_cadence() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, 0, 5_000, 10);
    let holds: Vec<u32> = events
        .iter()
        .filter(|(_, ev)| *ev == ButtonEvent::Hold)
        .map(|(t, _)| *t)
        .collect();

    assert_eq!(holds, [1_000, 2_000, 3_000, 4_000, 5_000]);
    assert_eq!(events.first(), Some(&(0, ButtonEvent::Press)));
    assert!(!events.iter().any(|(_, ev)| *ev == ButtonEvent::Click));
}

#[test]
fn hold_with_explicit_threshold() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(11);
    assert_eq!(c.poll_with_threshold(11, 300), ButtonEvent::Press);
    clock.set(299);
    assert_eq!(c.poll_with_threshold(11, 300), ButtonEvent::None);
    clock.set(300);
    assert_eq!(c.poll_with_threshold(11, 300), ButtonEvent::Hold);
    clock.set(599);
    assert_eq!(c.poll_with_threshold(11, 300), ButtonEvent::None);
    clock.set(600);
    assert_eq!(c.poll_with_threshold(11, 300), ButtonEvent::Hold);
}

#[test]
fn zero_threshold_holds_on_every_sustained_poll() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll_with_threshold(10, 0), ButtonEvent::Press);
    for t in [0, 1, 2, 60] {
        clock.set(t);
        assert_eq!(c.poll_with_threshold(10, 0), ButtonEvent::Hold);
    }
    clock.set(100);
    lines.release(10);
    assert_eq!(c.poll_with_threshold(10, 0), ButtonEvent::None);
}

#[test]
fn max_threshold_never_holds() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll_with_threshold(10, u32::MAX), ButtonEvent::Press);
    for t in (1_000..=60_000).step_by(1_000) {
        clock.set(t);
        assert_eq!(c.poll_with_threshold(10, u32::MAX), ButtonEvent::None);
    }
    lines.release(10);
    assert_eq!(c.poll_with_threshold(10, u32::MAX), ButtonEvent::Click);
}

#[test]
fn late_poll_fires_single_hold_and_restarts_cadence() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);

    // Frame loop stalled for 3.5 s: one HOLD, no backlog.
    clock.set(3_500);
    assert_eq!(c.poll(10), ButtonEvent::Hold);
    clock.set(3_510);
    assert_eq!(c.poll(10), ButtonEvent::None);
    clock.set(4_499);
    assert_eq!(c.poll(10), ButtonEvent::None);
    clock.set(4_500);
    assert_eq!(c.poll(10), ButtonEvent::Hold);
}

#[test]
fn release_after_hold_is_not_a_click() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, 0, 1_200, 50);
    assert_eq!(events, [(0, ButtonEvent::Press), (1_000, ButtonEvent::Hold)]);
    assert!(!c.channel(10).unwrap().is_pressed());
}

#[test]
fn new_press_resets_hold_state() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    run_press(&mut c, &lines, &clock, 0, 2_500, 100);
    let ch = c.channel(10).unwrap();
    assert!(ch.hold_reported());
    assert_eq!(ch.last_hold_report_ms(), 2_000);

    clock.set(10_000);
    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);
    let ch = c.channel(10).unwrap();
    assert!(!ch.hold_reported());
    assert_eq!(ch.last_hold_report_ms(), 0);
    assert_eq!(ch.press_start_ms(), 10_000);

    clock.set(10_200);
    lines.release(10);
    assert_eq!(c.poll(10), ButtonEvent::Click);
}

// ═══════════════════════════════════════════════════════════════════════════
// Idle, unknown ids, independence
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn idle_channel_stays_none_and_untouched() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    for t in (0..10_000).step_by(250) {
        clock.set(t);
        assert_eq!(c.poll(11), ButtonEvent::None);
    }
    let ch = c.channel(11).unwrap();
    assert!(!ch.is_pressed());
    assert_eq!(ch.press_start_ms(), 0);
}

#[test]
fn unknown_id_is_ignored() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);
    let before: Vec<_> = c.channels().to_vec();
    let reads = lines.reads.get();

    clock.set(2_000);
    lines.press(12);
    assert_eq!(c.poll(12), ButtonEvent::None);
    assert_eq!(c.poll_with_threshold(13, 1), ButtonEvent::None);
    assert_eq!(c.pressed_duration(12), 0);

    assert_eq!(c.channels(), before.as_slice());
    assert_eq!(lines.reads.get(), reads);
}

#[test]
fn channels_are_independent() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);
    assert_eq!(c.poll(11), ButtonEvent::None);

    clock.set(100);
    lines.press(11);
    assert_eq!(c.poll(10), ButtonEvent::None);
    assert_eq!(c.poll(11), ButtonEvent::Press);

    clock.set(1_000);
    assert_eq!(c.poll(10), ButtonEvent::Hold);
    assert_eq!(c.poll(11), ButtonEvent::None);

    clock.set(1_050);
    lines.release(11);
    assert_eq!(c.poll(11), ButtonEvent::Click);
    assert!(c.channel(10).unwrap().is_pressed());
}

#[test]
fn pressed_never_emitted() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, 0, 3_000, 1);
    assert!(!events.iter().any(|(_, ev)| *ev == ButtonEvent::Pressed));
}

// ═══════════════════════════════════════════════════════════════════════════
// Elapsed press time and clock wraparound
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn pressed_duration_tracks_current_press() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(400);
    let mut c = classifier(&lines, &clock);

    assert_eq!(c.pressed_duration(10), 0);

    lines.press(10);
    c.poll(10);
    clock.set(650);
    assert_eq!(c.pressed_duration(10), 250);

    // Not yet polled: the classifier still believes the button is down.
    lines.release(10);
    clock.set(700);
    assert_eq!(c.pressed_duration(10), 300);

    c.poll(10);
    assert_eq!(c.pressed_duration(10), 0);
}

#[test]
fn click_across_counter_wrap() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, u32::MAX - 20, 80, 10);
    assert_eq!(events, [(0, ButtonEvent::Press), (80, ButtonEvent::Click)]);
}

#[test]
fn debounce_boundary_across_counter_wrap() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, u32::MAX - 20, 50, 10);
    assert_eq!(events, [(0, ButtonEvent::Press), (50, ButtonEvent::Click)]);
}

#[test]
fn bounce_across_counter_wrap() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(u32::MAX - 5);
    let mut c = classifier(&lines, &clock);

    lines.press(10);
    assert_eq!(c.poll(10), ButtonEvent::Press);
    clock.advance(30);
    assert_eq!(c.pressed_duration(10), 30);
    lines.release(10);
    assert_eq!(c.poll(10), ButtonEvent::None);
}

#[test]
fn hold_cadence_across_counter_wrap() {
    let lines = FakeLines::new();
    let clock = FakeClock::at(0);
    let mut c = classifier(&lines, &clock);

    let events = run_press(&mut c, &lines, &clock, u32::MAX - 1_499, 3_000, 10);
    let holds: Vec<u32> = events
        .iter()
        .filter(|(_, ev)| *ev == ButtonEvent::Hold)
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(holds, [1_000, 2_000, 3_000]);
}
