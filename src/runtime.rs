use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tracing::debug;

use crate::{
    stats::ProgressStore,
    tutor::{Effect, TutorEvent},
    word_source::WordSource,
};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    /// Completion of a collaborator call or timer
    Tutor(TutorEvent),
}

/// Source of app events (keyboard, resize, completions, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
    tx: Sender<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let key_tx = tx.clone();

        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx, tx }
    }

    /// Sender for posting completions into the same queue as key events.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

/// Performs tutor effects off the UI thread.
///
/// Collaborator calls and timers each run on a short-lived worker thread and
/// post their completion back as [`AppEvent::Tutor`]. Effects that only
/// concern the UI are handed back to the caller.
pub struct EffectExecutor {
    words: Arc<dyn WordSource>,
    progress: Arc<dyn ProgressStore>,
    tx: Sender<AppEvent>,
}

impl EffectExecutor {
    pub fn new(
        words: Arc<dyn WordSource>,
        progress: Arc<dyn ProgressStore>,
        tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            words,
            progress,
            tx,
        }
    }

    pub fn execute(&self, effect: Effect) -> Option<Effect> {
        match effect {
            Effect::FetchWord(level) => {
                let words = Arc::clone(&self.words);
                self.spawn(move || TutorEvent::WordLoaded(words.random_word(&level)));
                None
            }
            Effect::ReportAttempt(attempt) => {
                let progress = Arc::clone(&self.progress);
                self.spawn(move || {
                    let result = progress.report_attempt(&attempt);
                    TutorEvent::AttemptReported { attempt, result }
                });
                None
            }
            Effect::FetchStats => {
                let progress = Arc::clone(&self.progress);
                self.spawn(move || TutorEvent::StatsLoaded(progress.fetch_stats()));
                None
            }
            Effect::Schedule { timer, after } => {
                self.spawn(move || {
                    thread::sleep(after);
                    TutorEvent::TimerFired(timer)
                });
                None
            }
            ui @ (Effect::Celebrate | Effect::FocusInput) => Some(ui),
        }
    }

    fn spawn<F>(&self, work: F)
    where
        F: FnOnce() -> TutorEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            // receiver gone means the app is shutting down
            if tx.send(AppEvent::Tutor(work())).is_err() {
                debug!("dropping completion, event loop has exited");
            }
        });
    }
}
