//! Time source for cooldowns, power-status throttling and battery simulation.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    /// Monotonic time for interval checks
    fn now(&self) -> Instant;

    /// Wall-clock second within the current minute, 0..60
    fn second_of_minute(&self) -> u32;
}

/// The real clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn second_of_minute(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| (d.as_secs() % 60) as u32)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to.
///
/// ```rust
/// use std::time::Duration;
/// use overlay_metrics::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(clock.now() - start, Duration::from_secs(5));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    state: Mutex<(Instant, u32)>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new((Instant::now(), 0)),
        }
    }

    /// Move monotonic time forward; the second of minute follows along
    pub fn advance(&self, by: Duration) {
        let mut state = self.state.lock();
        state.0 += by;
        state.1 = ((u64::from(state.1) + by.as_secs()) % 60) as u32;
    }

    pub fn set_second(&self, second: u32) {
        self.state.lock().1 = second % 60;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.lock().0
    }

    fn second_of_minute(&self) -> u32 {
        self.state.lock().1
    }
}
