//! Audio-visual cues
//!
//! Timer events are filtered through a `CueGate` before they reach a
//! `CueSink`: the countdown task reports every step (about 60 per second),
//! but the tick cue should only sound once per displayed second.

use std::time::Duration;

use kitchen_core::TimerEvent;

/// Length of the vibration that accompanies the ring
pub const BUZZ_DURATION: Duration = Duration::from_millis(250);

/// A cue to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Duration is being changed
    Setting,
    /// One second passed
    Tick,
    /// Countdown finished
    Ring,
    /// Haptic pulse
    Buzz(Duration),
}

/// Something that can play cues
pub trait CueSink {
    fn play(&mut self, cue: Cue);

    /// Stop a cue that may still be playing
    fn stop(&mut self, _cue: Cue) {}
}

/// Sink that writes cues to the log
#[derive(Debug, Default)]
pub struct LogCueSink;

impl CueSink for LogCueSink {
    fn play(&mut self, cue: Cue) {
        match cue {
            Cue::Buzz(duration) => log::info!("cue: buzz for {:?}", duration),
            Cue::Setting => log::debug!("cue: setting"),
            Cue::Tick => log::debug!("cue: tick"),
            Cue::Ring => log::info!("cue: ring"),
        }
    }

    fn stop(&mut self, cue: Cue) {
        log::trace!("cue: stop {:?}", cue);
    }
}

/// Seconds shown for a remaining time (rounded up, so 9 001 ms shows 10)
pub fn display_seconds(remaining_ms: u64) -> u64 {
    remaining_ms.div_ceil(1_000)
}

/// Turns timer events into cues
#[derive(Debug, Default)]
pub struct CueGate {
    last_second: Option<u64>,
}

impl CueGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last announced second so a resumed run ticks right away
    pub fn start_run(&mut self) {
        self.last_second = None;
    }

    pub fn handle(&mut self, event: TimerEvent, sink: &mut dyn CueSink) {
        match event {
            TimerEvent::DurationChanging => {
                self.last_second = None;
                sink.stop(Cue::Tick);
                sink.stop(Cue::Ring);
                sink.play(Cue::Setting);
            }
            TimerEvent::Tick(ms) => {
                let second = display_seconds(ms);
                if ms > 0 && self.last_second != Some(second) {
                    if self.last_second.is_none() {
                        sink.stop(Cue::Setting);
                    }
                    sink.play(Cue::Tick);
                }
                self.last_second = Some(second);
            }
            TimerEvent::Expire => {
                self.last_second = None;
                sink.stop(Cue::Tick);
                sink.play(Cue::Ring);
                sink.play(Cue::Buzz(BUZZ_DURATION));
            }
        }
    }
}
