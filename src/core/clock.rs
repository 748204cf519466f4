//! Wall clock abstraction.
//!
//! Every tracker operation reads the time through a [`Clock`] so tests can
//! freeze and advance it.

use chrono::{DateTime, Duration, Utc};

/// A clock that is either the system clock or frozen at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Real wall-clock time.
    #[default]
    System,
    /// Frozen time, only moved by [`Clock::advance`].
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub const fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Current time according to this clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(t) => *t,
        }
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: Duration) {
        if let Self::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Move a fixed clock forward by whole minutes.
    pub fn advance_minutes(&mut self, minutes: i64) {
        self.advance(Duration::minutes(minutes));
    }
}

/// Fractional minutes between two instants (`to - from`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64 / 60_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = Clock::fixed(t0());
        assert_eq!(clock.now(), t0());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_advance_fixed_clock() {
        let mut clock = Clock::fixed(t0());
        clock.advance_minutes(25);
        assert_eq!(clock.now(), t0() + Duration::minutes(25));
    }

    #[test]
    fn test_advance_system_clock_is_noop() {
        let mut clock = Clock::System;
        clock.advance_minutes(60);
        assert_eq!(clock, Clock::System);
    }

    #[test]
    fn test_minutes_between() {
        let later = t0() + Duration::seconds(90);
        assert!((minutes_between(t0(), later) - 1.5).abs() < f64::EPSILON);
        assert!((minutes_between(later, t0()) + 1.5).abs() < f64::EPSILON);
    }
}
