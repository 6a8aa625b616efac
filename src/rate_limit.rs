use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// Source of "now" for the limiter, swapped out in tests
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Sliding-window limiter keyed by client identity.
///
/// Each identity keeps the timestamps of its accepted requests inside the
/// trailing window. The DashMap entry guard is held for the whole
/// prune-check-append sequence, so two requests from the same client can't
/// both slip through on a stale count.
pub struct RateLimiter {
    windows: DashMap<String, VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    /// Records a request for `identity` at `now` if it still has quota.
    pub fn admit(&self, identity: &str, now: Instant) -> bool {
        let mut window = self.windows.entry(identity.to_string()).or_default();
        expire(&mut window, now, self.window);

        if window.len() >= self.max_requests {
            return false;
        }

        window.push_back(now);
        true
    }

    /// Drops expired timestamps everywhere and forgets clients with nothing
    /// left in their window. Returns how many clients were removed.
    pub fn prune(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, window| {
            expire(window, now, self.window);
            !window.is_empty()
        });
        before.saturating_sub(self.windows.len())
    }

    // number of identities currently tracked
    pub fn tracked(&self) -> usize {
        self.windows.len()
    }
}

// timestamps are appended in order, so expired ones sit at the front
fn expire(window: &mut VecDeque<Instant>, now: Instant, span: Duration) {
    while window
        .front()
        .is_some_and(|&t| now.saturating_duration_since(t) >= span)
    {
        window.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn sixth_request_in_window_is_rejected() {
        let limiter = RateLimiter::new(5, HOUR);
        let clock = ManualClock::new();

        for i in 0..5 {
            assert!(limiter.admit("1.2.3.4", clock.now()), "request {} should pass", i + 1);
            clock.advance(Duration::from_secs(60));
        }
        assert!(!limiter.admit("1.2.3.4", clock.now()));
    }

    #[test]
    fn window_slides_past_the_first_request() {
        let limiter = RateLimiter::new(5, HOUR);
        let clock = ManualClock::new();

        for _ in 0..5 {
            assert!(limiter.admit("a", clock.now()));
            clock.advance(Duration::from_secs(10));
        }
        assert!(!limiter.admit("a", clock.now()));

        // first request was 50s ago, move to exactly one window after it
        clock.advance(HOUR - Duration::from_secs(50));
        assert!(limiter.admit("a", clock.now()));
        // only one slot was freed
        assert!(!limiter.admit("a", clock.now()));
    }

    #[test]
    fn rejected_requests_do_not_extend_the_window() {
        let limiter = RateLimiter::new(1, HOUR);
        let clock = ManualClock::new();

        assert!(limiter.admit("a", clock.now()));
        clock.advance(Duration::from_secs(1800));
        assert!(!limiter.admit("a", clock.now()));
        clock.advance(Duration::from_secs(1800));
        assert!(limiter.admit("a", clock.now()));
    }

    #[test]
    fn clients_are_counted_separately() {
        let limiter = RateLimiter::new(1, HOUR);
        let now = Instant::now();

        assert!(limiter.admit("a", now));
        assert!(!limiter.admit("a", now));
        assert!(limiter.admit("b", now));
    }

    #[test]
    fn concurrent_admits_take_the_last_slot_once() {
        for _ in 0..50 {
            let limiter = Arc::new(RateLimiter::new(5, HOUR));
            let now = Instant::now();
            for _ in 0..4 {
                assert!(limiter.admit("same", now));
            }

            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let limiter = Arc::clone(&limiter);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        limiter.admit("same", now)
                    })
                })
                .collect();

            let accepted = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count();
            assert_eq!(accepted, 1);
        }
    }

    #[test]
    fn prune_forgets_idle_clients() {
        let limiter = RateLimiter::new(5, HOUR);
        let clock = ManualClock::new();

        limiter.admit("old", clock.now());
        clock.advance(Duration::from_secs(1800));
        limiter.admit("recent", clock.now());
        assert_eq!(limiter.tracked(), 2);

        clock.advance(Duration::from_secs(1800));
        assert_eq!(limiter.prune(clock.now()), 1);
        assert_eq!(limiter.tracked(), 1);

        // pruned client starts from a clean slate
        for _ in 0..5 {
            assert!(limiter.admit("old", clock.now()));
        }
    }
}
