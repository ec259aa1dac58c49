//! Background countdown loop
//!
//! A `CountdownTask` owns one tokio task that advances a shared
//! [`KitchenTimer`] on a fixed period. Each step runs entirely under the
//! timer lock: check the run id, advance, dispatch. Once the run id moves on
//! (the user started editing, or changed mode) the loop exits without
//! touching the state. Dropping the handle aborts the task.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{KitchenTimer, TimerListener};

/// Timer state shared between the UI and the countdown task
pub type SharedTimer = Arc<Mutex<KitchenTimer>>;

/// Step period; roughly one step per displayed frame
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(16);

/// Handle to a running countdown loop
#[derive(Debug)]
pub struct CountdownTask {
    run: u64,
    handle: JoinHandle<()>,
}

impl CountdownTask {
    /// Start advancing `timer` every `period` for its current run
    pub fn spawn<L>(runtime: &Handle, timer: SharedTimer, period: Duration, listener: L) -> Self
    where
        L: TimerListener + 'static,
    {
        let run = match timer.lock() {
            Ok(t) => t.run_id(),
            Err(poisoned) => poisoned.into_inner().run_id(),
        };
        log::debug!("Spawning countdown task for run {} ({:?} period)", run, period);

        let handle = runtime.spawn(countdown_loop(timer, run, period, listener));
        Self { run, handle }
    }

    /// Run id this task was started for
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CountdownTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn countdown_loop<L: TimerListener>(
    timer: SharedTimer,
    run: u64,
    period: Duration,
    mut listener: L,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if !step(&timer, run, &mut listener) {
            break;
        }
    }
    log::debug!("Countdown task for run {} finished", run);
}

/// One locked countdown step; returns false once the loop should stop
fn step<L: TimerListener>(timer: &SharedTimer, run: u64, listener: &mut L) -> bool {
    let Ok(mut timer) = timer.lock() else {
        log::error!("Timer state poisoned, stopping run {}", run);
        return false;
    };

    if timer.run_id() != run || !timer.is_running() {
        log::debug!("Run {} superseded by run {}", run, timer.run_id());
        return false;
    }

    for event in timer.advance(Instant::now().into_std()) {
        listener.dispatch(event);
    }
    timer.is_running()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{EventForwarder, RunEvent, TimerEvent, TimerMode};
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn ten_second_timer() -> SharedTimer {
        let mut timer = KitchenTimer::new(TimerMode::Minute);
        timer.press();
        for _ in 0..5 {
            timer.drag(-10.0, 420.0);
        }
        timer.release(Instant::now().into_std());
        assert!(timer.is_running());
        Arc::new(Mutex::new(timer))
    }

    fn drain(rx: &mut UnboundedReceiver<RunEvent>) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e.event);
        }
        events
    }

    fn spawn(timer: &SharedTimer) -> (CountdownTask, UnboundedReceiver<RunEvent>) {
        let (tx, rx) = unbounded_channel();
        let run = timer.lock().unwrap().run_id();
        let task = CountdownTask::spawn(
            &Handle::current(),
            timer.clone(),
            Duration::from_secs(1),
            EventForwarder::new(run, tx),
        );
        (task, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_counts_down_to_expiry() {
        let timer = ten_second_timer();
        let (task, mut rx) = spawn(&timer);

        tokio::time::sleep(Duration::from_secs(12)).await;

        let events = drain(&mut rx);
        let ticks: Vec<u64> = events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Tick(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        let expected: Vec<u64> = (0..=10).rev().map(|s| s * 1_000).collect();
        assert_eq!(ticks, expected);
        assert_eq!(events.iter().filter(|e| **e == TimerEvent::Expire).count(), 1);
        assert_eq!(events.last(), Some(&TimerEvent::Expire));
        assert!(task.is_finished());
        assert_eq!(timer.lock().unwrap().remaining_ms(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_editing_cancels_task() {
        let timer = ten_second_timer();
        let (task, mut rx) = spawn(&timer);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        timer.lock().unwrap().press();
        let before = drain(&mut rx);
        assert_eq!(before.last(), Some(&TimerEvent::Tick(8_000)));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(drain(&mut rx).is_empty());
        assert!(task.is_finished());
        assert_eq!(timer.lock().unwrap().remaining_ms(), 8_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let timer = ten_second_timer();
        let (task, mut rx) = spawn(&timer);
        drop(task);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(drain(&mut rx).is_empty());
        assert_eq!(timer.lock().unwrap().remaining_ms(), 10_000);
    }
}
