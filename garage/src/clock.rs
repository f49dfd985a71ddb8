use chrono::{Local, NaiveDateTime};

/// Source of the `now` handed to garage operations.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use chrono::{NaiveDateTime, TimeDelta};
    use std::sync::Mutex;

    use super::Clock;

    /// A clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<NaiveDateTime>,
    }

    impl ManualClock {
        pub fn new(start: NaiveDateTime) -> Self {
            ManualClock {
                now: Mutex::new(start),
            }
        }

        pub fn set(&self, at: NaiveDateTime) {
            *self.lock() = at;
        }

        pub fn advance(&self, by: TimeDelta) {
            let mut now = self.lock();
            *now += by;
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
            // The guarded value is a plain timestamp, so a poisoned lock is still usable.
            self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.lock()
        }
    }
}
