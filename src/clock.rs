//! Wall-clock throttling.
//!
//! The host passes a monotonic millisecond timestamp into every update, so cadence
//! is independent of frame rate and tests can drive a fake clock.

/// Monotonic milliseconds, as supplied by the host.
pub type Millis = u64;

/// Admits at most one action per interval.
///
/// An action at `now` is admitted when more than `interval` milliseconds have passed
/// since the last admitted action. A fresh throttle admits immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Millis,
    /// Earliest timestamp that will be admitted.
    next: Millis,
}

impl Throttle {
    pub fn new(interval: Millis) -> Self {
        Self { interval, next: 0 }
    }

    /// A throttle whose first admission is one full interval after `now`.
    pub fn starting_at(interval: Millis, now: Millis) -> Self {
        Self {
            interval,
            next: now.saturating_add(interval).saturating_add(1),
        }
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn is_ready(&self, now: Millis) -> bool {
        now >= self.next
    }

    /// Returns true and starts a new interval if `now` is admitted.
    pub fn ready(&mut self, now: Millis) -> bool {
        if self.is_ready(now) {
            self.next = now.saturating_add(self.interval).saturating_add(1);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_throttle_admits_immediately() {
        let mut throttle = Throttle::new(10);
        assert!(throttle.ready(0));
        assert!(!throttle.ready(10));
        assert!(throttle.ready(11));
    }

    #[test]
    fn test_is_ready_does_not_consume() {
        let throttle = Throttle::new(5);
        assert!(throttle.is_ready(0));
        assert!(throttle.is_ready(0));
    }

    #[test]
    fn test_starting_at_waits_an_interval() {
        let mut throttle = Throttle::starting_at(100, 1_000);
        assert!(!throttle.ready(1_100));
        assert!(throttle.ready(1_101));
    }
}
