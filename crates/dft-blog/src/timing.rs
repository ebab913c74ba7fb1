use std::time::Duration;

use tokio::time::Instant;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(10);

/// Holds the latest value until input has been quiet for `wait`.
///
/// A new value replaces the pending one and restarts the wait.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.wait, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Take the pending value if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((at, value)) if at <= now => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

/// Admits at most one call per `limit`; calls inside the window are dropped.
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self { limit, last: None }
    }

    pub fn try_acquire(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.limit => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn debounce_keeps_only_last_value() {
        let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
        let start = Instant::now();
        debouncer.push("d", start);
        debouncer.push("df", start + Duration::from_millis(100));
        debouncer.push("dft", start + Duration::from_millis(200));

        assert_eq!(debouncer.take_due(start + Duration::from_millis(450)), None);
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(500)));
        assert_eq!(debouncer.take_due(start + Duration::from_millis(500)), Some("dft"));
        assert_eq!(debouncer.take_due(start + Duration::from_secs(5)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_admits_one_call_per_window() {
        let mut throttle = Throttle::new(SCROLL_THROTTLE);
        let start = Instant::now();
        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start + Duration::from_millis(3)));
        assert!(!throttle.try_acquire(start + Duration::from_millis(9)));
        assert!(throttle.try_acquire(start + Duration::from_millis(10)));
    }
}
