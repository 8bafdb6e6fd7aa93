//! Countdown shown between sets.
//!
//! The timer never runs on its own thread. The host drives it with
//! [`RestTimer::tick`] once per second, or with [`RestTimer::poll`] from an
//! update loop. It is owned by the active session, so dropping the session
//! drops the timer and no tick can arrive afterwards.

use std::time::{Duration, Instant};

pub const DEFAULT_REST_SECONDS: u32 = 90;

const TICK: Duration = Duration::from_secs(1);

/// Result of advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; seconds left.
    Remaining(u32),
    /// Reached zero on this tick.
    Finished,
    /// Not running (finished earlier or cancelled).
    Stopped,
}

#[derive(Debug)]
pub struct RestTimer {
    remaining: u32,
    running: bool,
    last_tick: Option<Instant>,
}

impl RestTimer {
    pub fn start(seconds: u32) -> Self {
        log::debug!("Rest timer started for {seconds}s");
        Self {
            remaining: seconds,
            running: seconds > 0,
            last_tick: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Finished
        } else {
            Tick::Remaining(self.remaining)
        }
    }

    /// Apply every whole second elapsed since the previous poll. The first
    /// poll only records the reference instant.
    pub fn poll(&mut self, now: Instant) -> Tick {
        if !self.running {
            return Tick::Stopped;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Tick::Remaining(self.remaining);
        };
        let mut last = last;
        let mut outcome = Tick::Remaining(self.remaining);
        while now.saturating_duration_since(last) >= TICK && self.running {
            last += TICK;
            outcome = self.tick();
        }
        self.last_tick = Some(last);
        outcome
    }

    /// Stop immediately, e.g. when the user skips the rest.
    pub fn cancel(&mut self) {
        if self.running {
            log::debug!("Rest timer cancelled with {}s left", self.remaining);
        }
        self.running = false;
        self.remaining = 0;
    }
}

impl Drop for RestTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
