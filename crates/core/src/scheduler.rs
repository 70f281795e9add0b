//! Tick scheduler - fixed-interval timer armed by the first accepted input.
//!
//! The host feeds elapsed time in; the scheduler answers how many firings are
//! due. Firings are run one after another by the caller, so they never overlap:
//! a late frame just queues several firings behind each other.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Unarmed,
    Armed,
    /// Torn down with its run. Never fires or re-arms again.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    state: SchedulerState,
    interval_ms: u32,
    accumulated_ms: u32,
    fired: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Unarmed,
            interval_ms: 0,
            accumulated_ms: 0,
            fired: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == SchedulerState::Armed
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Total firings since arming.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Start the repeating timer. Only the first call on an unarmed scheduler
    /// has any effect.
    pub fn arm(&mut self, interval_ms: u32) -> bool {
        if self.state != SchedulerState::Unarmed {
            return false;
        }
        self.state = SchedulerState::Armed;
        self.interval_ms = interval_ms.max(1);
        self.accumulated_ms = 0;
        true
    }

    /// Accumulate elapsed host time and return the number of due firings.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if self.state != SchedulerState::Armed {
            return 0;
        }

        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        self.fired += due as u64;
        due
    }

    /// Milliseconds until the next firing, if armed.
    pub fn time_until_next_ms(&self) -> Option<u32> {
        match self.state {
            SchedulerState::Armed => Some(self.interval_ms - self.accumulated_ms),
            _ => None,
        }
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
        self.accumulated_ms = 0;
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
