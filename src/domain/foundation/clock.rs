//! Clock port for reading the current time.
//!
//! Scheduling rules compare against "now". Domain operations receive `now`
//! as an argument; handlers obtain it from an injected `Clock` so tests can
//! pin time to a known instant.

use std::sync::RwLock;

use super::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<Timestamp>,
}

impl FixedClock {
    /// Creates a clock frozen at `instant`.
    pub fn at(instant: Timestamp) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: Timestamp) {
        *self.instant.write().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut guard = self.instant.write().unwrap_or_else(|e| e.into_inner());
        *guard = guard.add_days(days);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.instant.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn system_clock_tracks_wall_time() {
        let before = Timestamp::now();
        let now = SystemClock.now();
        assert!(!now.is_before(&before));
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let instant = Timestamp::now().minus_days(10);
        let clock = FixedClock::at(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn fixed_clock_can_be_moved() {
        let instant = Timestamp::now();
        let clock = FixedClock::at(instant);

        clock.advance_days(2);
        assert_eq!(clock.now(), instant.add_days(2));

        clock.set(instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn clock_is_object_safe() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let _ = clock.now();
    }
}
