//! Cooperative timers for session playback.
//!
//! Nothing here spawns threads or reads the clock. The front end measures
//! elapsed wall time and feeds it in through `advance`, which keeps the
//! player single-threaded and fully deterministic under test.

use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Lifecycle shared by the rest timer and the deferred task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Fired,
}

/// Countdown that ticks once per elapsed second
#[derive(Clone, Debug)]
pub struct RestTimer {
    state: TimerState,
    remaining: i64,
    carry: Duration,
}

impl Default for RestTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RestTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            remaining: 0,
            carry: Duration::ZERO,
        }
    }

    /// Start a fresh countdown, replacing any running one
    pub fn start(&mut self, seconds: u32) {
        self.cancel();
        self.state = TimerState::Running;
        self.remaining = i64::from(seconds);
        tracing::debug!("Rest timer started: {}s", seconds);
    }

    /// Stop the countdown. Cancelling an idle timer is a no-op.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            tracing::debug!("Rest timer cancelled with {}s left", self.remaining);
        }
        self.state = TimerState::Idle;
        self.remaining = 0;
        self.carry = Duration::ZERO;
    }

    /// Feed elapsed time; returns how many one-second ticks ran
    ///
    /// The timer fires itself off once the countdown reaches zero, so it
    /// never ticks past that point.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.state != TimerState::Running {
            return 0;
        }

        self.carry += elapsed;
        let mut ticks = 0;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.remaining -= 1;
            ticks += 1;
            if self.remaining <= 0 {
                self.state = TimerState::Fired;
                self.remaining = 0;
                self.carry = Duration::ZERO;
                tracing::debug!("Rest timer finished");
                break;
            }
        }
        ticks
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Seconds left while running
    pub fn remaining(&self) -> Option<u32> {
        if self.is_running() {
            u32::try_from(self.remaining).ok()
        } else {
            None
        }
    }

    /// `REST: 42s` while running, empty otherwise
    pub fn display(&self) -> String {
        match self.remaining() {
            Some(secs) => format!("REST: {}s", secs),
            None => String::new(),
        }
    }
}

/// One-shot task that becomes due after a delay
#[derive(Clone, Debug)]
pub struct Deferred {
    state: TimerState,
    left: Duration,
}

impl Default for Deferred {
    fn default() -> Self {
        Self::new()
    }
}

impl Deferred {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            left: Duration::ZERO,
        }
    }

    /// Arm the task, replacing any pending one
    pub fn schedule(&mut self, delay: Duration) {
        self.state = TimerState::Running;
        self.left = delay;
    }

    /// Disarm the task. Cancelling an idle task is a no-op.
    pub fn cancel(&mut self) {
        self.state = TimerState::Idle;
        self.left = Duration::ZERO;
    }

    /// Feed elapsed time; true exactly once, when the task comes due
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.left = self.left.saturating_sub(elapsed);
        if self.left.is_zero() {
            self.state = TimerState::Fired;
            return true;
        }
        false
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == TimerState::Running
    }
}
