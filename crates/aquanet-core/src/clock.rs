//! The per-run simulation clock.
//!
//! [`SimClock`] owns the two global time attributes of one network/run
//! context: the start-time shift (control rules and reporting only; the
//! timeline itself always starts at instant 0) and the total simulation
//! duration. Many sampling grids hold an `Rc<SimClock>` and treat the
//! duration as their implicit final instant.
//!
//! Duration changes between runs are propagated lazily: every change bumps a
//! version counter, and each dependent grid compares its remembered version
//! on the next access and reconciles itself before serving a read. No
//! observer registration, nothing to unregister on drop.

use std::cell::Cell;

use crate::error::ClockError;
use crate::instant::Instant;

/// Owner of a simulation run's start shift and total duration.
///
/// Single-threaded by design: interior mutability through [`Cell`] lets
/// run-configuration code adjust the clock between runs while grids and
/// series hold shared handles to it. Mutation during a run is a contract
/// violation by the driver, not something the clock can detect.
#[derive(Debug)]
pub struct SimClock {
    /// Shift applied to the start time, in seconds. Cosmetic: simulations
    /// always run on `[0, duration]`.
    start_shift: Cell<Instant>,
    /// Total simulation duration, in seconds. Never negative.
    duration: Cell<Instant>,
    /// Bumped on every effective duration change.
    version: Cell<u64>,
}

impl SimClock {
    /// Create a clock with the given total duration and no start shift.
    ///
    /// Returns [`ClockError::NegativeDuration`] if `duration < 0`. A zero
    /// duration is valid and describes a single-snapshot run.
    pub fn new(duration: Instant) -> Result<Self, ClockError> {
        Self::with_start_shift(0, duration)
    }

    /// Create a clock with an explicit start shift and total duration.
    pub fn with_start_shift(
        start_shift: Instant,
        duration: Instant,
    ) -> Result<Self, ClockError> {
        if duration < 0 {
            return Err(ClockError::NegativeDuration { duration });
        }
        Ok(Self {
            start_shift: Cell::new(start_shift),
            duration: Cell::new(duration),
            version: Cell::new(0),
        })
    }

    /// Total simulation duration, in seconds.
    pub fn duration(&self) -> Instant {
        self.duration.get()
    }

    /// Replace the total duration.
    ///
    /// Rejects negative values with [`ClockError::NegativeDuration`]. An
    /// effective change bumps the version counter, invalidating every
    /// dependent grid until it reconciles; setting the same value again is
    /// a no-op. Only call between simulation runs.
    pub fn set_duration(&self, duration: Instant) -> Result<(), ClockError> {
        if duration < 0 {
            return Err(ClockError::NegativeDuration { duration });
        }
        if duration != self.duration.get() {
            self.duration.set(duration);
            self.version.set(self.version.get() + 1);
        }
        Ok(())
    }

    /// Start-time shift, in seconds.
    pub fn start_shift(&self) -> Instant {
        self.start_shift.get()
    }

    /// Replace the start-time shift.
    ///
    /// Any value is accepted and no version bump occurs: the shift never
    /// invalidates a grid.
    pub fn set_start_shift(&self, start_shift: Instant) {
        self.start_shift.set(start_shift);
    }

    /// Current value of the duration version counter.
    ///
    /// Dependents remember the version they last reconciled against and
    /// compare it on each access.
    pub fn version(&self) -> u64 {
        self.version.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_clock_has_zero_shift_and_version() {
        let clock = SimClock::new(86_400).unwrap();
        assert_eq!(clock.duration(), 86_400);
        assert_eq!(clock.start_shift(), 0);
        assert_eq!(clock.version(), 0);
    }

    #[test]
    fn zero_duration_is_valid() {
        let clock = SimClock::new(0).unwrap();
        assert_eq!(clock.duration(), 0);
    }

    #[test]
    fn negative_duration_rejected() {
        assert_eq!(
            SimClock::new(-1).unwrap_err(),
            ClockError::NegativeDuration { duration: -1 }
        );
        let clock = SimClock::new(3_600).unwrap();
        assert_eq!(
            clock.set_duration(-7).unwrap_err(),
            ClockError::NegativeDuration { duration: -7 }
        );
        // The failed setter left the clock untouched.
        assert_eq!(clock.duration(), 3_600);
        assert_eq!(clock.version(), 0);
    }

    #[test]
    fn effective_change_bumps_version() {
        let clock = SimClock::new(7_200).unwrap();
        clock.set_duration(3_600).unwrap();
        assert_eq!(clock.version(), 1);
        clock.set_duration(3_600).unwrap();
        assert_eq!(clock.version(), 1);
        clock.set_duration(7_200).unwrap();
        assert_eq!(clock.version(), 2);
    }

    proptest! {
        #[test]
        fn version_moves_only_on_effective_changes(
            initial in 0i64..1_000_000,
            updates in proptest::collection::vec(-10i64..1_000_000, 0..20),
        ) {
            let clock = SimClock::new(initial).unwrap();
            let mut expected_version = 0u64;
            let mut current = initial;
            for d in updates {
                match clock.set_duration(d) {
                    Ok(()) => {
                        if d != current {
                            expected_version += 1;
                            current = d;
                        }
                    }
                    Err(ClockError::NegativeDuration { .. }) => {
                        prop_assert!(d < 0);
                    }
                }
                prop_assert!(clock.duration() >= 0);
            }
            prop_assert_eq!(clock.version(), expected_version);
            prop_assert_eq!(clock.duration(), current);
        }
    }

    #[test]
    fn start_shift_never_bumps_version() {
        let clock = SimClock::with_start_shift(-21_600, 86_400).unwrap();
        assert_eq!(clock.start_shift(), -21_600);
        clock.set_start_shift(3_600);
        assert_eq!(clock.start_shift(), 3_600);
        assert_eq!(clock.version(), 0);
    }
}
