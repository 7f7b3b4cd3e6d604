use std::time::{Duration, Instant};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running { deadline: Instant },
    Paused { remaining: Duration },
}

/// Repeating auto-advance countdown.
///
/// The timer does no scheduling of its own: the owner polls it with the
/// current time and sleeps until [`deadline`](Self::deadline). Ticks missed
/// while paused, stopped or polled late are dropped, never replayed.
#[derive(Debug)]
pub struct AutoAdvanceTimer {
    interval: Duration,
    state: TimerState,
}

impl AutoAdvanceTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: TimerState::Stopped,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Starts (or restarts) the countdown from a full interval.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.state = TimerState::Running {
            deadline: now + interval,
        };
    }

    pub fn pause(&mut self, now: Instant) {
        if let TimerState::Running { deadline } = self.state {
            self.state = TimerState::Paused {
                remaining: deadline.saturating_duration_since(now),
            };
        }
    }

    /// Continues the countdown where [`pause`](Self::pause) left it.
    pub fn resume(&mut self, now: Instant) {
        if let TimerState::Paused { remaining } = self.state {
            self.state = TimerState::Running {
                deadline: now + remaining,
            };
        }
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TimerState::Running { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Returns `true` when a tick is due, re-arming for the next interval
    /// measured from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TimerState::Running { deadline } if now >= deadline => {
                self.state = TimerState::Running {
                    deadline: now + self.interval,
                };
                true
            }
            _ => false,
        }
    }
}

impl Default for AutoAdvanceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
