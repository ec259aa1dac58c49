//! Callback contract between the timer and its collaborators

use tokio::sync::mpsc::UnboundedSender;

use super::TimerEvent;

/// Receives timer events
///
/// All methods default to no-ops so implementors only override what they
/// care about.
pub trait TimerListener: Send {
    fn on_duration_changing(&mut self) {}

    fn on_tick(&mut self, _remaining_ms: u64) {}

    fn on_expire(&mut self) {}

    /// Route one event to the matching callback
    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::DurationChanging => self.on_duration_changing(),
            TimerEvent::Tick(ms) => self.on_tick(ms),
            TimerEvent::Expire => self.on_expire(),
        }
    }

    fn dispatch_all(&mut self, events: impl IntoIterator<Item = TimerEvent>)
    where
        Self: Sized,
    {
        for event in events {
            self.dispatch(event);
        }
    }
}

type Callback<A> = Box<dyn FnMut(A) + Send>;

/// Closure-backed [`TimerListener`]
///
/// # Example
///
/// ```
/// use kitchen_core::{Callbacks, TimerEvent, TimerListener};
///
/// let mut seen = Vec::new();
/// let (tx, rx) = std::sync::mpsc::channel();
/// let mut callbacks = Callbacks::new().on_tick(move |ms| tx.send(ms).unwrap());
/// callbacks.dispatch(TimerEvent::Tick(9_000));
/// seen.extend(rx.try_iter());
/// assert_eq!(seen, vec![9_000]);
/// ```
#[derive(Default)]
pub struct Callbacks {
    duration_changing: Option<Callback<()>>,
    tick: Option<Callback<u64>>,
    expire: Option<Callback<()>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_duration_changing(mut self, f: impl FnMut() + Send + 'static) -> Self {
        let mut f = f;
        self.duration_changing = Some(Box::new(move |()| f()));
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(u64) + Send + 'static) -> Self {
        self.tick = Some(Box::new(f));
        self
    }

    pub fn on_expire(mut self, f: impl FnMut() + Send + 'static) -> Self {
        let mut f = f;
        self.expire = Some(Box::new(move |()| f()));
        self
    }
}

impl TimerListener for Callbacks {
    fn on_duration_changing(&mut self) {
        if let Some(f) = self.duration_changing.as_mut() {
            f(());
        }
    }

    fn on_tick(&mut self, remaining_ms: u64) {
        if let Some(f) = self.tick.as_mut() {
            f(remaining_ms);
        }
    }

    fn on_expire(&mut self) {
        if let Some(f) = self.expire.as_mut() {
            f(());
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("duration_changing", &self.duration_changing.is_some())
            .field("tick", &self.tick.is_some())
            .field("expire", &self.expire.is_some())
            .finish()
    }
}

/// A timer event tagged with the run that produced it
///
/// Consumers compare `run` with the timer's current run id and drop events
/// from cancelled runs that were already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEvent {
    pub run: u64,
    pub event: TimerEvent,
}

/// Listener that forwards events into a channel, tagged with a run id
#[derive(Debug, Clone)]
pub struct EventForwarder {
    run: u64,
    tx: UnboundedSender<RunEvent>,
}

impl EventForwarder {
    pub fn new(run: u64, tx: UnboundedSender<RunEvent>) -> Self {
        Self { run, tx }
    }

    pub fn run(&self) -> u64 {
        self.run
    }

    fn send(&self, event: TimerEvent) {
        // Receiver gone means the UI is shutting down
        if self.tx.send(RunEvent { run: self.run, event }).is_err() {
            log::trace!("Dropping {:?}: receiver closed", event);
        }
    }
}

impl TimerListener for EventForwarder {
    fn on_duration_changing(&mut self) {
        self.send(TimerEvent::DurationChanging);
    }

    fn on_tick(&mut self, remaining_ms: u64) {
        self.send(TimerEvent::Tick(remaining_ms));
    }

    fn on_expire(&mut self) {
        self.send(TimerEvent::Expire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_callbacks_dispatch() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let mut callbacks = Callbacks::new()
            .on_duration_changing(move || a.lock().unwrap().push("changing".to_string()))
            .on_tick(move |ms| b.lock().unwrap().push(format!("tick {}", ms)))
            .on_expire(move || c.lock().unwrap().push("expire".to_string()));

        callbacks.dispatch_all([
            TimerEvent::DurationChanging,
            TimerEvent::Tick(1_000),
            TimerEvent::Expire,
        ]);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["changing", "tick 1000", "expire"]
        );
    }

    #[test]
    fn test_missing_callbacks_are_ignored() {
        let mut callbacks = Callbacks::new();
        callbacks.dispatch(TimerEvent::Expire);
        assert!(format!("{:?}", callbacks).contains("expire: false"));
    }

    #[test]
    fn test_forwarder_tags_run() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut forwarder = EventForwarder::new(7, tx);
        forwarder.dispatch(TimerEvent::Tick(500));
        assert_eq!(
            rx.try_recv().unwrap(),
            RunEvent {
                run: 7,
                event: TimerEvent::Tick(500)
            }
        );

        drop(rx);
        // Sending after the receiver is gone must not panic
        forwarder.dispatch(TimerEvent::Expire);
    }
}
