//! Wall-clock access behind a trait so time-sensitive logic stays testable.

use std::time::SystemTime;

/// Source of the current wall-clock time.
///
/// Every time-dependent computation in the room lifecycle takes `now` as an
/// explicit argument; services obtain that instant from a shared `Clock`
/// handle so tests can substitute a manual one.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> SystemTime;
}

/// Production clock reading [`SystemTime::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

#[cfg(test)]
pub use self::manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    use super::Clock;

    /// Settable clock for tests.
    pub struct ManualClock {
        now: Mutex<SystemTime>,
    }

    impl ManualClock {
        /// Create a clock frozen at `start`.
        pub fn new(start: SystemTime) -> Self {
            Self {
                now: Mutex::new(start),
            }
        }

        /// Move the clock to an absolute instant.
        pub fn set(&self, instant: SystemTime) {
            *self.now.lock().unwrap() = instant;
        }

        /// Advance the clock by `step`.
        pub fn advance(&self, step: Duration) {
            let mut guard = self.now.lock().unwrap();
            *guard += step;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> SystemTime {
            *self.now.lock().unwrap()
        }
    }
}
