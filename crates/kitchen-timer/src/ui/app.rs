//! Main iced application for the kitchen timer
//!
//! This is the entry point for the GUI. It manages:
//! - The shared `KitchenTimer` and the countdown task driving it
//! - Translating dial gestures into timer calls
//! - Cue playback and preference persistence

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use iced::time;
use iced::widget::{column, container};
use iced::{Center, Element, Fill, Subscription, Task, Theme};
use kitchen_core::{
    CountdownTask, EventForwarder, KitchenTimer, RunEvent, SharedTimer, TimerEvent, TimerMode,
};
use kitchen_widgets::{
    channel_subscription, kitchen_dial, shared_receiver, DialGesture, DialState, FruitSkin,
    SharedReceiver,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use super::controls;
use super::cues::{CueGate, CueSink, LogCueSink};
use super::message::Message;
use crate::config::{save_config, AppConfig};

/// Redraw period while the dial moves
const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Command line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    pub debug_guides: bool,
    pub hour_mode: bool,
    pub fruit: Option<FruitSkin>,
}

/// Application state
pub struct KitchenApp {
    /// Countdown state shared with the countdown task
    timer: SharedTimer,
    /// Task advancing the current run, if any
    task: Option<CountdownTask>,
    /// Runtime the countdown task is spawned on
    runtime: Handle,
    events_tx: UnboundedSender<RunEvent>,
    events_rx: SharedReceiver<RunEvent>,
    dial: DialState,
    skin: FruitSkin,
    gate: CueGate,
    cues: Box<dyn CueSink + Send>,
    config: AppConfig,
    config_path: PathBuf,
}

impl KitchenApp {
    /// Create a new application instance
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        options: StartupOptions,
        runtime: Handle,
    ) -> Self {
        let mode = if options.hour_mode {
            TimerMode::Hour
        } else {
            config.timer.mode
        };
        let skin = options.fruit.unwrap_or(config.display.fruit);

        let mut dial = DialState::for_skin(skin);
        dial.colors = config.display.colors_for(skin);
        dial.layout = config.display.layout;
        dial.size = config.display.dial_size;
        dial.debug_guides = options.debug_guides || config.display.debug_guides;

        let timer = KitchenTimer::with_sensitivity(mode, config.timer.drag_sensitivity);
        let (events_tx, events_rx) = unbounded_channel();

        log::info!("Kitchen timer ready: {} mode, {} skin", mode, skin);
        Self {
            timer: Arc::new(Mutex::new(timer)),
            task: None,
            runtime,
            events_tx,
            events_rx: shared_receiver(events_rx),
            dial,
            skin,
            gate: CueGate::new(),
            cues: Box::new(LogCueSink),
            config,
            config_path,
        }
    }

    /// Replace the cue sink
    pub fn with_cue_sink(mut self, sink: Box<dyn CueSink + Send>) -> Self {
        self.cues = sink;
        self
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Redraw only; the dial reads the timer in view()
            Message::Frame => {}
            Message::Dial(gesture) => self.handle_gesture(gesture),
            Message::Timer(RunEvent { run, event }) => {
                if run != self.snapshot().run {
                    log::trace!("Ignoring {:?} from stale run {}", event, run);
                } else {
                    if event == TimerEvent::Expire {
                        self.task = None;
                    }
                    self.gate.handle(event, self.cues.as_mut());
                }
            }
            Message::SelectFruit(skin) => {
                self.skin = skin;
                self.dial.set_skin(skin);
                self.dial.colors = self.config.display.colors_for(skin);
                self.config.display.fruit = skin;
                self.persist();
            }
            Message::SetMinuteMode(minute_mode) => {
                let mode = if minute_mode {
                    TimerMode::Minute
                } else {
                    TimerMode::Hour
                };
                self.task = None;
                if let Ok(mut timer) = self.timer.lock() {
                    timer.set_mode(mode);
                }
                self.config.timer.mode = mode;
                self.persist();
            }
        }
        Task::none()
    }

    fn handle_gesture(&mut self, gesture: DialGesture) {
        let now = Instant::now();
        let events = {
            let Ok(mut timer) = self.timer.lock() else {
                log::error!("Timer state poisoned, ignoring {:?}", gesture);
                return;
            };
            match gesture {
                DialGesture::Pressed => {
                    timer.press();
                    Vec::new()
                }
                DialGesture::Dragged { dx, width } => timer.drag(dx, width),
                DialGesture::Released => timer.release(now),
                DialGesture::DragEnded => timer.drag_end(now),
            }
        };

        for event in events {
            self.gate.handle(event, self.cues.as_mut());
        }

        match gesture {
            // Editing already invalidated the run; dropping the handle aborts it
            DialGesture::Pressed | DialGesture::Dragged { .. } => self.task = None,
            DialGesture::Released | DialGesture::DragEnded => self.start_task_if_running(),
        }
    }

    fn start_task_if_running(&mut self) {
        let snapshot = self.snapshot();
        if !snapshot.running {
            return;
        }
        if self.task.as_ref().is_some_and(|t| t.run() == snapshot.run) {
            return;
        }
        self.gate.start_run();
        self.task = Some(CountdownTask::spawn(
            &self.runtime,
            self.timer.clone(),
            self.config.timer.tick_period(),
            EventForwarder::new(snapshot.run, self.events_tx.clone()),
        ));
    }

    fn persist(&self) {
        if let Err(e) = save_config(&self.config, &self.config_path) {
            log::warn!("Failed to save preferences: {:#}", e);
        }
    }

    fn snapshot(&self) -> TimerSnapshot {
        match self.timer.lock() {
            Ok(timer) => TimerSnapshot::of(&timer),
            Err(poisoned) => TimerSnapshot::of(&poisoned.into_inner()),
        }
    }

    /// Skin and mode controls are hidden while a countdown runs
    pub fn controls_visible(&self) -> bool {
        !self.snapshot().running
    }

    /// Subscribe to timer events, plus frame ticks while animating
    pub fn subscription(&self) -> Subscription<Message> {
        let snapshot = self.snapshot();
        let events = channel_subscription(self.events_rx.clone()).map(Message::Timer);
        if snapshot.running || snapshot.editing {
            Subscription::batch([
                events,
                time::every(FRAME_PERIOD).map(|_| Message::Frame),
            ])
        } else {
            events
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let snapshot = self.snapshot();

        let mut content = column![
            kitchen_dial(&self.dial, snapshot.progress, Message::Dial),
            controls::time_label(snapshot.remaining_ms),
        ]
        .spacing(20)
        .align_x(Center);

        if self.controls_visible() {
            content = content
                .push(controls::fruit_buttons(self.skin))
                .push(controls::mode_checkbox(snapshot.mode == TimerMode::Minute));
        }

        container(content).center(Fill).padding(20).into()
    }

    /// Get the theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Values read from the timer under one lock
#[derive(Debug, Clone, Copy)]
struct TimerSnapshot {
    run: u64,
    mode: TimerMode,
    progress: f32,
    remaining_ms: u64,
    running: bool,
    editing: bool,
}

impl TimerSnapshot {
    fn of(timer: &KitchenTimer) -> Self {
        Self {
            run: timer.run_id(),
            mode: timer.mode(),
            progress: timer.progress(),
            remaining_ms: timer.remaining_ms(),
            running: timer.is_running(),
            editing: timer.is_editing(),
        }
    }
}
