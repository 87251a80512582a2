//! Error types for grids, series, and the grid store.
//!
//! Every failure is local and synchronous; the engine never retries or
//! repairs. The documented silent no-ops are re-committing a grid's last
//! stored instant and rolling back an already-empty grid or series.

use std::error::Error;
use std::fmt;

use aquanet_core::Instant;

/// Errors from mutating or querying a [`TimeGrid`](crate::TimeGrid).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A commit instant past the clock's current duration.
    BeyondDuration {
        /// The rejected instant.
        instant: Instant,
        /// The current total duration.
        duration: Instant,
    },
    /// A commit instant at or before the last stored one (and not equal to
    /// it, which would be the idempotent no-op).
    OutOfOrder {
        /// The rejected instant.
        instant: Instant,
        /// The last stored interior instant.
        last: Instant,
    },
    /// A first commit at or before instant 0. The start is implicit and
    /// never stored; interior instants are strictly positive.
    NonPositiveInstant {
        /// The rejected instant.
        instant: Instant,
    },
    /// A positional read past the addressable conceptual length.
    PositionOutOfRange {
        /// The requested position.
        pos: usize,
        /// The addressable length, `interior_count + 1`.
        n_instants: usize,
    },
    /// A lookup instant outside the closed interval `[0, duration]`.
    InstantOutOfRange {
        /// The rejected instant.
        instant: Instant,
        /// The current total duration.
        duration: Instant,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeyondDuration { instant, duration } => {
                write!(f, "instant {instant}s is beyond the duration {duration}s")
            }
            Self::OutOfOrder { instant, last } => {
                write!(
                    f,
                    "instant {instant}s is not after the last committed instant {last}s"
                )
            }
            Self::NonPositiveInstant { instant } => {
                write!(f, "interior instants must be positive, got {instant}s")
            }
            Self::PositionOutOfRange { pos, n_instants } => {
                write!(f, "position {pos} out of range for {n_instants} instants")
            }
            Self::InstantOutOfRange { instant, duration } => {
                write!(f, "instant {instant}s outside the interval [0s, {duration}s]")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from mutating or reading a
/// [`QuantitySeries`](crate::QuantitySeries).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesError {
    /// An underlying grid operation failed.
    Grid(GridError),
    /// A commit past the maximum addressable length (`interior_count + 1`
    /// values, the full shape).
    AtCapacity {
        /// Values already stored.
        n_values: usize,
        /// The addressable length of the bound grid.
        n_instants: usize,
    },
    /// A commit instant that does not match the next instant the bound grid
    /// serves. The two ledgers grow in lockstep; the driver commits the grid
    /// first, then every dependent series with the same instant.
    CommitMismatch {
        /// The rejected instant.
        instant: Instant,
        /// The instant the series would accept next.
        expected: Instant,
    },
    /// A read on a series that is not in the consistent state. The value
    /// count matches neither accepted shape, or there is no data for this
    /// run; callers must treat this as "no data", never attempt repair.
    NotReadable {
        /// Values currently stored.
        n_values: usize,
        /// Interior instants of the bound grid.
        interior_count: usize,
    },
    /// An in-range lookup instant with no sample at it.
    InstantNotFound {
        /// The instant that matched no sample.
        instant: Instant,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid error: {e}"),
            Self::AtCapacity {
                n_values,
                n_instants,
            } => {
                write!(
                    f,
                    "series already holds {n_values} values for {n_instants} instants"
                )
            }
            Self::CommitMismatch { instant, expected } => {
                write!(
                    f,
                    "commit instant {instant}s does not match the next grid instant {expected}s"
                )
            }
            Self::NotReadable {
                n_values,
                interior_count,
            } => {
                write!(
                    f,
                    "series with {n_values} values over {interior_count} interior instants is not readable"
                )
            }
            Self::InstantNotFound { instant } => {
                write!(f, "no sample at instant {instant}s")
            }
        }
    }
}

impl Error for SeriesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SeriesError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors from the named grid registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The name is reserved for a built-in grid.
    ReservedName {
        /// The rejected name.
        name: String,
    },
    /// A grid with this name already exists.
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// No grid with this name exists.
    UnknownName {
        /// The requested name.
        name: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedName { name } => write!(f, "grid name '{name}' is reserved"),
            Self::DuplicateName { name } => write!(f, "grid '{name}' already exists"),
            Self::UnknownName { name } => write!(f, "unknown grid '{name}'"),
        }
    }
}

impl Error for StoreError {}
