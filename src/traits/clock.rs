//! Sources of logical time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::Timestamp;

/// Supplies the current timestamp for weight resolution and LBP gating.
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock seconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Timestamp::from_secs(secs)
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a host share one instance (e.g. behind an
/// [`Arc`]) with the exchange and still advance it.
///
/// # Examples
///
/// ```
/// use hydra_weighted::domain::Timestamp;
/// use hydra_weighted::traits::{Clock, ManualClock};
///
/// let clock = ManualClock::new(Timestamp::from_secs(10));
/// clock.advance(5);
/// assert_eq!(clock.now(), Timestamp::from_secs(15));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: Timestamp) -> Self {
        Self {
            secs: AtomicU64::new(start.as_secs()),
        }
    }

    /// Sets the current time.
    pub fn set(&self, now: Timestamp) {
        self.secs.store(now.as_secs(), Ordering::SeqCst);
    }

    /// Moves the clock forward, saturating at `u64::MAX`.
    pub fn advance(&self, secs: u64) {
        // The closure always returns `Some`, so the update cannot fail.
        self.secs
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| {
                Some(s.saturating_add(secs))
            })
            .ok();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_secs(self.secs.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_set_and_advance() {
        let clock = ManualClock::new(Timestamp::from_secs(100));
        assert_eq!(clock.now(), Timestamp::from_secs(100));
        clock.set(Timestamp::from_secs(2_000));
        clock.advance(500);
        assert_eq!(clock.now(), Timestamp::from_secs(2_500));
        clock.advance(u64::MAX);
        assert_eq!(clock.now(), Timestamp::from_secs(u64::MAX));
    }

    #[test]
    fn shared_clock_observes_updates() {
        let clock = Arc::new(ManualClock::new(Timestamp::ZERO));
        let shared = Arc::clone(&clock);
        clock.set(Timestamp::from_secs(7));
        assert_eq!(shared.now(), Timestamp::from_secs(7));
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > Timestamp::from_secs(1_577_836_800));
    }
}
