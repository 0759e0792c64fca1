//! Time sources for credential expiry.

use std::{fmt::Debug, sync::RwLock};

use jiff::{SignedDuration, Timestamp};

/// Supplies the current instant to storage backends and the token store.
pub trait Clock: Send + Sync + Debug {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Manually advanced clock for exercising expiry.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    /// Clock frozen at `now` until advanced.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Move the clock forward by `duration`. Saturates at the maximum timestamp.
    pub fn advance(&self, duration: SignedDuration) {
        if let Ok(mut now) = self.now.write() {
            *now = now.checked_add(duration).unwrap_or(Timestamp::MAX);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now
            .read()
            .map_or(Timestamp::MAX, |now| *now)
    }
}
