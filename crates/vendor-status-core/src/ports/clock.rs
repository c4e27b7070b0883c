//! Clock port - the only outside input of the classifier.
//!
//! [`SystemClock`] reads the local wall clock; [`FixedClock`] pins an instant
//! for tests and reproducible runs.

use chrono::{DateTime, FixedOffset, Local};

/// Clock provides the current zoned time.
///
/// Swapping the clock is what makes "opens later today" deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall clock, carrying the machine's current UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let t = DateTime::parse_from_rfc3339("2023-06-30T10:00:00+02:00").unwrap();
        let clock = FixedClock::new(t);
        assert_eq!(clock.now(), t);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_keeps_local_offset() {
        let now = SystemClock.now();
        let local = Local::now();
        assert_eq!(now.offset(), local.offset());
        assert!((local.timestamp() - now.timestamp()).abs() < 5);
    }

    #[test]
    fn clock_by_reference() {
        let t = DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z").unwrap();
        let clock = FixedClock::new(t);
        fn read(c: impl Clock) -> DateTime<FixedOffset> {
            c.now()
        }
        assert_eq!(read(&clock), t);
    }
}
