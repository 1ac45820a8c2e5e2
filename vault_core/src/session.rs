//! Session playback.
//!
//! The player walks a generated playlist one item at a time. Each `advance`
//! logs the entered set (when complete), starts the rest countdown and
//! schedules the next item after a short debounce. Time only moves when the
//! front end calls `tick`.

use crate::config::SessionConfig;
use crate::history::SetLog;
use crate::timer::{Deferred, RestTimer};
use crate::{PlaylistItem, SetRecord};
use std::time::Duration;

/// Where the player is in its queue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No queue loaded, or the queue finished or was exited
    Idle,
    /// Showing the item at this index
    Presenting(usize),
}

/// What happened to the entered set on `advance`
#[derive(Clone, Debug, PartialEq)]
pub enum LogOutcome {
    Logged(SetRecord),
    /// Weight or reps left blank
    Skipped,
    /// The log could not be written; the session carries on
    StoreFailed(String),
}

/// Where `advance` moved the session
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// This index will be presented once the debounce elapses
    Next(usize),
    /// The last item was done
    Completed(SessionSummary),
}

/// Result of `SessionPlayer::advance`
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// Nothing is loaded
    NotRunning,
    /// A move to the next item is already pending
    Ignored,
    Stepped { logged: LogOutcome, step: Step },
}

/// Running tally for the loaded playlist
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSummary {
    pub sets_logged: usize,
    pub sets_skipped: usize,
    pub sets_failed: usize,
    /// Sum of weight x reps over logged sets with numeric input
    pub tonnage: f64,
}

impl SessionSummary {
    fn record(&mut self, outcome: &LogOutcome) {
        match outcome {
            LogOutcome::Logged(record) => {
                self.sets_logged += 1;
                self.tonnage += record.volume().unwrap_or(0.0);
            }
            LogOutcome::Skipped => self.sets_skipped += 1,
            LogOutcome::StoreFailed(_) => self.sets_failed += 1,
        }
    }
}

/// Plays one playlist at a time against a set log
pub struct SessionPlayer<L: SetLog> {
    log: L,
    queue: Vec<PlaylistItem>,
    state: PlayerState,
    rest: RestTimer,
    pending: Deferred,
    weight: String,
    reps: String,
    summary: SessionSummary,
    completed: bool,
    rest_seconds: u32,
    advance_delay: Duration,
}

impl<L: SetLog> SessionPlayer<L> {
    /// Player with the default 90 s rest and 500 ms debounce
    pub fn new(log: L) -> Self {
        Self::from_config(log, &SessionConfig::default())
    }

    pub fn from_config(log: L, config: &SessionConfig) -> Self {
        Self {
            log,
            queue: Vec::new(),
            state: PlayerState::Idle,
            rest: RestTimer::new(),
            pending: Deferred::new(),
            weight: String::new(),
            reps: String::new(),
            summary: SessionSummary::default(),
            completed: false,
            rest_seconds: config.rest_seconds,
            advance_delay: config.advance_delay(),
        }
    }

    /// Start a new playlist from its first item
    ///
    /// Any running rest or pending advance from a previous playlist is dropped.
    pub fn load(&mut self, playlist: Vec<PlaylistItem>) {
        self.rest.cancel();
        self.pending.cancel();
        self.clear_input();
        self.summary = SessionSummary::default();
        self.queue = playlist;
        self.completed = false;

        if self.queue.is_empty() {
            tracing::info!("Loaded empty playlist, nothing to play");
            self.state = PlayerState::Idle;
            self.completed = true;
        } else {
            tracing::info!("Loaded playlist with {} items", self.queue.len());
            self.state = PlayerState::Presenting(0);
        }
    }

    /// Record what the user has typed for the current item
    pub fn enter(&mut self, weight: &str, reps: &str) {
        self.weight = weight.to_string();
        self.reps = reps.to_string();
    }

    /// Finish the current item
    pub fn advance(&mut self) -> Advance {
        let index = match self.state {
            PlayerState::Idle => return Advance::NotRunning,
            PlayerState::Presenting(i) => i,
        };
        if self.pending.is_pending() {
            tracing::debug!("Advance ignored, item {} already pending", index + 1);
            return Advance::Ignored;
        }

        let logged = self.log_current(index);
        self.summary.record(&logged);
        self.rest.start(self.rest_seconds);

        let step = if index + 1 < self.queue.len() {
            self.pending.schedule(self.advance_delay);
            Step::Next(index + 1)
        } else {
            self.stop();
            self.completed = true;
            tracing::info!(
                "Session complete: {} sets logged, {} kg moved",
                self.summary.sets_logged,
                self.summary.tonnage
            );
            Step::Completed(self.summary.clone())
        };

        Advance::Stepped { logged, step }
    }

    /// Feed elapsed wall time to the debounce and the rest timer
    ///
    /// Returns the index of a newly presented item, if one came up.
    pub fn tick(&mut self, elapsed: Duration) -> Option<usize> {
        let presented = if self.pending.advance(elapsed) {
            match self.state {
                PlayerState::Presenting(i) if i + 1 < self.queue.len() => {
                    self.present(i + 1);
                    Some(i + 1)
                }
                _ => None,
            }
        } else {
            None
        };
        self.rest.advance(elapsed);
        presented
    }

    /// Leave the session early
    pub fn exit(&mut self) {
        if let PlayerState::Presenting(i) = self.state {
            tracing::info!("Session exited at item {} of {}", i + 1, self.queue.len());
        }
        self.stop();
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Item currently on screen
    pub fn current(&self) -> Option<&PlaylistItem> {
        match self.state {
            PlayerState::Presenting(i) => self.queue.get(i),
            PlayerState::Idle => None,
        }
    }

    pub fn queue(&self) -> &[PlaylistItem] {
        &self.queue
    }

    /// `REST: 42s` during a rest, empty otherwise
    pub fn rest_display(&self) -> String {
        self.rest.display()
    }

    pub fn rest_remaining(&self) -> Option<u32> {
        self.rest.remaining()
    }

    /// True once the last item has been advanced past
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn is_transition_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut L {
        &mut self.log
    }

    fn present(&mut self, index: usize) {
        self.state = PlayerState::Presenting(index);
        self.clear_input();
        if let Some(item) = self.queue.get(index) {
            tracing::debug!("Presenting {} ({})", item.name, item.category);
        }
    }

    fn stop(&mut self) {
        self.rest.cancel();
        self.pending.cancel();
        self.state = PlayerState::Idle;
    }

    fn clear_input(&mut self) {
        self.weight.clear();
        self.reps.clear();
    }

    fn log_current(&mut self, index: usize) -> LogOutcome {
        if self.weight.trim().is_empty() || self.reps.trim().is_empty() {
            return LogOutcome::Skipped;
        }
        let Some(item) = self.queue.get(index) else {
            return LogOutcome::Skipped;
        };

        match self.log.append(&item.name, &self.weight, &self.reps) {
            Ok(record) => LogOutcome::Logged(record),
            Err(e) => {
                tracing::warn!("Could not log set for '{}': {}", item.name, e);
                LogOutcome::StoreFailed(e.to_string())
            }
        }
    }
}
