//! Countdown state machine
//!
//! `KitchenTimer` owns the remaining time and the current phase. Gestures move
//! it between phases; a running timer is advanced by [`CountdownTask`] (or any
//! caller with a clock) through [`KitchenTimer::advance`].
//!
//! ```text
//!            press / drag                release (> 0) / drag_end (> 0)
//!   Idle ─────────────────► Editing ───────────────────────────────► Running
//!    ▲                        ▲  │ release at 0 (Expire)                │
//!    │                        │  │ drag_end at 0                        │
//!    ├────────────────────────┼──┘                                      │
//!    │                        └──────────── press / drag ───────────────┤
//!    └──────────────────────── advance reaches 0 (Expire) ──────────────┘
//! ```
//!
//! Every transition into `Editing` bumps the run id. A task that observes a
//! run id different from the one it was started with stops without touching
//! the state, so cancellation is synchronous from the caller's point of view.

mod gesture;
mod listener;
mod task;

pub use gesture::{DragAccumulator, DEFAULT_DRAG_SENSITIVITY};
pub use listener::{Callbacks, EventForwarder, RunEvent, TimerListener};
pub use task::{CountdownTask, SharedTimer, DEFAULT_TICK_PERIOD};

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Capacity of the dial in minute mode
pub const MINUTE_MILLIS: u64 = 60_000;
/// Capacity of the dial in hour mode
pub const HOUR_MILLIS: u64 = 60 * MINUTE_MILLIS;

/// What one full turn of the dial represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// One turn is one minute, ticks are seconds
    #[default]
    Minute,
    /// One turn is one hour, ticks are minutes
    Hour,
}

impl TimerMode {
    pub fn capacity_ms(self) -> u64 {
        match self {
            TimerMode::Minute => MINUTE_MILLIS,
            TimerMode::Hour => HOUR_MILLIS,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::Minute => write!(f, "minute"),
            TimerMode::Hour => write!(f, "hour"),
        }
    }
}

/// Events reported to a [`TimerListener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The user is changing the duration
    DurationChanging,
    /// Remaining time after a countdown step
    Tick(u64),
    /// The countdown reached zero
    Expire,
}

/// Current phase of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing running (zero, expired or stopped at zero)
    Idle,
    /// Gesture in progress; `baseline_ms` is the value the gesture started from
    Editing { baseline_ms: u64, dragged: bool },
    /// Counting down; `last_tick` is the wall clock already accounted for
    Running { last_tick: Instant },
}

/// Countdown state for one dial
#[derive(Debug, Clone)]
pub struct KitchenTimer {
    mode: TimerMode,
    remaining_ms: u64,
    phase: Phase,
    run_id: u64,
    drag: DragAccumulator,
}

impl Default for KitchenTimer {
    fn default() -> Self {
        Self::new(TimerMode::default())
    }
}

impl KitchenTimer {
    pub fn new(mode: TimerMode) -> Self {
        Self::with_sensitivity(mode, DEFAULT_DRAG_SENSITIVITY)
    }

    pub fn with_sensitivity(mode: TimerMode, drag_sensitivity: f32) -> Self {
        Self {
            mode,
            remaining_ms: 0,
            phase: Phase::Idle,
            run_id: 0,
            drag: DragAccumulator::new(drag_sensitivity),
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn capacity_ms(&self) -> u64 {
        self.mode.capacity_ms()
    }

    /// Fraction of a full turn left, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        (self.remaining_ms as f64 / self.capacity_ms() as f64) as f32
    }

    /// Identifier of the current run; changes whenever editing starts
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.phase, Phase::Editing { .. })
    }

    /// Switch capacity; stops any run and clamps the remaining time
    pub fn set_mode(&mut self, mode: TimerMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.remaining_ms = self.remaining_ms.min(mode.capacity_ms());
        self.run_id += 1;
        self.phase = Phase::Idle;
        log::debug!("Timer mode set to {} ({} ms left)", mode, self.remaining_ms);
    }

    /// Pointer went down on the dial
    pub fn press(&mut self) {
        self.begin_edit();
    }

    /// Horizontal drag of `dx` pixels across a dial `width` pixels wide
    pub fn drag(&mut self, dx: f32, width: f32) -> Vec<TimerEvent> {
        let baseline_ms = match self.phase {
            Phase::Editing { baseline_ms, .. } => baseline_ms,
            _ => self.begin_edit(),
        };

        self.drag.push(dx);
        self.remaining_ms = self.drag.apply(baseline_ms, width, self.capacity_ms());
        self.phase = Phase::Editing {
            baseline_ms,
            dragged: true,
        };
        log::trace!(
            "Drag dx={} acc={} -> {} ms",
            dx,
            self.drag.accumulated(),
            self.remaining_ms
        );

        vec![TimerEvent::DurationChanging]
    }

    /// Pointer released without a drag
    ///
    /// Releasing at zero rings immediately. Releasing after a drag behaves
    /// like [`drag_end`](Self::drag_end).
    pub fn release(&mut self, now: Instant) -> Vec<TimerEvent> {
        match self.phase {
            Phase::Editing { dragged: true, .. } => self.drag_end(now),
            Phase::Editing { .. } if self.remaining_ms == 0 => {
                self.phase = Phase::Idle;
                log::info!("Timer released at zero");
                vec![TimerEvent::Expire]
            }
            Phase::Editing { .. } => {
                self.start(now);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Drag gesture finished
    ///
    /// At zero the timer goes idle without ringing.
    pub fn drag_end(&mut self, now: Instant) -> Vec<TimerEvent> {
        if !self.is_editing() {
            return Vec::new();
        }
        if self.remaining_ms > 0 {
            self.start(now);
        } else {
            self.phase = Phase::Idle;
            log::debug!("Drag ended at zero, timer idle");
        }
        Vec::new()
    }

    /// Count down to `now`
    ///
    /// Only whole milliseconds are consumed, so repeated calls never drift.
    /// Emits one `Tick` per call while running and a single `Expire` when
    /// zero is reached.
    pub fn advance(&mut self, now: Instant) -> Vec<TimerEvent> {
        let Phase::Running { last_tick } = self.phase else {
            return Vec::new();
        };

        let elapsed = now.saturating_duration_since(last_tick);
        let elapsed_ms = elapsed.as_millis().min(u64::MAX as u128) as u64;
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);

        let mut events = vec![TimerEvent::Tick(self.remaining_ms)];
        if self.remaining_ms == 0 {
            self.phase = Phase::Idle;
            log::info!("Timer expired");
            events.push(TimerEvent::Expire);
        } else {
            self.phase = Phase::Running {
                last_tick: last_tick + std::time::Duration::from_millis(elapsed_ms),
            };
        }
        events
    }

    /// Enter editing from the current value and invalidate any running task
    fn begin_edit(&mut self) -> u64 {
        self.run_id += 1;
        self.drag.reset();
        let baseline_ms = self.remaining_ms;
        self.phase = Phase::Editing {
            baseline_ms,
            dragged: false,
        };
        log::debug!("Editing run {} from {} ms", self.run_id, baseline_ms);
        baseline_ms
    }

    fn start(&mut self, now: Instant) {
        self.phase = Phase::Running { last_tick: now };
        log::info!(
            "Countdown started: {} ms (run {})",
            self.remaining_ms,
            self.run_id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const WIDTH: f32 = 420.0;

    fn set_to_ten_seconds(timer: &mut KitchenTimer) {
        timer.press();
        for _ in 0..5 {
            timer.drag(-10.0, WIDTH);
        }
    }

    #[test]
    fn test_initial_state() {
        let timer = KitchenTimer::new(TimerMode::Minute);
        assert_eq!(timer.remaining_ms(), 0);
        assert_eq!(timer.capacity_ms(), 60_000);
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(KitchenTimer::new(TimerMode::Hour).capacity_ms(), 3_600_000);
    }

    #[test]
    fn test_drag_sets_duration() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        set_to_ten_seconds(&mut timer);
        assert_eq!(timer.remaining_ms(), 10_000);
        assert!(timer.is_editing());
        assert!((timer.progress() - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_drag_emits_duration_changing() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        timer.press();
        assert_eq!(timer.drag(-3.0, WIDTH), vec![TimerEvent::DurationChanging]);
    }

    #[test]
    fn test_drag_back_subtracts_from_baseline() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        let now = Instant::now();
        set_to_ten_seconds(&mut timer);
        timer.drag_end(now);

        // Second gesture starts from 10 s and drags left to right
        timer.press();
        timer.drag(10.0, WIDTH);
        timer.drag(10.0, WIDTH);
        // acc = -28 -> 28 / 420 * 60000 = 4000
        assert_eq!(timer.remaining_ms(), 6_000);
    }

    #[test]
    fn test_remaining_stays_within_capacity() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        timer.press();
        for _ in 0..100 {
            timer.drag(-50.0, WIDTH);
            assert!(timer.remaining_ms() <= timer.capacity_ms());
        }
        assert_eq!(timer.remaining_ms(), 60_000);
        for _ in 0..200 {
            timer.drag(50.0, WIDTH);
            assert!(timer.remaining_ms() <= timer.capacity_ms());
        }
        assert_eq!(timer.remaining_ms(), 0);
    }

    #[test]
    fn test_end_to_end_countdown() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        let start = Instant::now();
        set_to_ten_seconds(&mut timer);
        assert!(timer.release(start).is_empty());
        assert!(timer.is_running());

        let mut ticks = Vec::new();
        let mut expires = 0;
        for step in 1..=12u64 {
            for event in timer.advance(start + Duration::from_millis(step * 1_000)) {
                match event {
                    TimerEvent::Tick(ms) => ticks.push(ms),
                    TimerEvent::Expire => expires += 1,
                    TimerEvent::DurationChanging => panic!("unexpected event"),
                }
            }
        }

        let expected: Vec<u64> = (0..10).rev().map(|s| s * 1_000).collect();
        assert_eq!(ticks, expected);
        assert_eq!(expires, 1);
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn test_advance_does_not_drift() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        let start = Instant::now();
        set_to_ten_seconds(&mut timer);
        timer.release(start);

        // Sub-millisecond remainders carry over to the next step
        let step = Duration::from_micros(1_500);
        for i in 1..=4u32 {
            timer.advance(start + step * i);
        }
        assert_eq!(timer.remaining_ms(), 10_000 - 6);
    }

    #[test]
    fn test_reentering_edit_halts_ticks() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        let start = Instant::now();
        set_to_ten_seconds(&mut timer);
        timer.release(start);
        let run = timer.run_id();

        timer.advance(start + Duration::from_secs(1));
        timer.press();
        assert_ne!(timer.run_id(), run);
        assert!(timer.advance(start + Duration::from_secs(2)).is_empty());
        assert_eq!(timer.remaining_ms(), 9_000);
    }

    #[test]
    fn test_release_at_zero_rings() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        timer.press();
        assert_eq!(timer.release(Instant::now()), vec![TimerEvent::Expire]);
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn test_drag_end_at_zero_is_silent() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        timer.press();
        timer.drag(-10.0, WIDTH);
        timer.drag(10.0, WIDTH);
        assert_eq!(timer.remaining_ms(), 0);
        assert!(timer.drag_end(Instant::now()).is_empty());
        assert_eq!(timer.phase(), Phase::Idle);
    }

    #[test]
    fn test_tap_resumes_countdown() {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        let start = Instant::now();
        set_to_ten_seconds(&mut timer);
        timer.release(start);
        timer.advance(start + Duration::from_secs(3));

        // Tap pauses and resumes from the same value
        timer.press();
        let resume = start + Duration::from_secs(5);
        assert!(timer.release(resume).is_empty());
        assert_eq!(timer.remaining_ms(), 7_000);
        assert_eq!(timer.advance(resume + Duration::from_secs(1)), vec![TimerEvent::Tick(6_000)]);
    }

    #[test]
    fn test_set_mode_clamps_and_stops() {
        let mut timer = KitchenTimer::new(TimerMode::Hour);
        timer.press();
        timer.drag(-400.0, WIDTH);
        assert_eq!(timer.remaining_ms(), 3_600_000);
        let run = timer.run_id();
        timer.set_mode(TimerMode::Minute);
        assert_eq!(timer.remaining_ms(), 60_000);
        assert_eq!(timer.phase(), Phase::Idle);
        assert_ne!(timer.run_id(), run);
    }

    #[test]
    fn test_mode_serde() {
        let mode: TimerMode = serde_yaml::from_str("hour").unwrap();
        assert_eq!(mode, TimerMode::Hour);
        assert_eq!(serde_yaml::to_string(&TimerMode::Minute).unwrap().trim(), "minute");
    }
}
