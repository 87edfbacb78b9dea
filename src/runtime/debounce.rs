use std::time::{Duration, Instant};

/// Delay applied between the last layout request and its execution.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

#[derive(Debug)]
struct Pending<T> {
    payload: T,
    deadline: Instant,
}

/// Trailing-edge debounce holding at most one pending payload.
///
/// Each `schedule` replaces the payload and restarts the delay, so only the
/// most recent request survives. Time is passed in by the caller's loop.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Store `payload` as the pending request. Returns `true` when an earlier
    /// pending request was dropped.
    pub fn schedule(&mut self, payload: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            payload,
            deadline: now + self.delay,
        });
        replaced
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Hand out the pending payload once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending.as_ref() {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.payload),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
