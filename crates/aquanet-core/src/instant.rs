//! The [`Instant`] second count.

/// A point on the simulation timeline, in whole seconds from the start of
/// the run.
///
/// Instant 0 is the implicit start of every sampling grid; the clock's
/// duration is the implicit end. Negative values never appear inside a grid
/// but are accepted by lookup entry points so that out-of-range requests can
/// be rejected with a proper error instead of wrapping.
pub type Instant = i64;

/// Seconds per hour, the customary reporting step of hydraulic solvers.
pub const SECONDS_PER_HOUR: Instant = 3_600;

/// Seconds per day, the customary total duration of an extended-period
/// hydraulic simulation.
pub const SECONDS_PER_DAY: Instant = 86_400;
