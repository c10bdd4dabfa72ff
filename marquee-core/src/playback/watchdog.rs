use std::time::{Duration, Instant};

/// Escalates a buffering stall that outlives the configured limit. With no
/// limit the watchdog never fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferingWatchdog {
    timeout: Option<Duration>,
    since: Option<Instant>,
}

impl BufferingWatchdog {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            since: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Start timing a stall. Re-arming while armed keeps the original start.
    pub fn arm(&mut self, now: Instant) {
        if self.timeout.is_some() && self.since.is_none() {
            self.since = Some(now);
        }
    }

    pub fn disarm(&mut self) {
        self.since = None;
    }

    pub fn is_armed(&self) -> bool {
        self.since.is_some()
    }

    /// How long the stall has lasted, once it has exceeded the limit.
    pub fn expired(&self, now: Instant) -> Option<Duration> {
        let (timeout, since) = (self.timeout?, self.since?);
        let stalled = now.saturating_duration_since(since);
        (stalled >= timeout).then_some(stalled)
    }
}
