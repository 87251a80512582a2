//! Clock error type.

use std::error::Error;
use std::fmt;

use crate::instant::Instant;

/// Errors from configuring a [`SimClock`](crate::SimClock).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockError {
    /// A negative total duration was supplied.
    NegativeDuration {
        /// The rejected duration, in seconds.
        duration: Instant,
    },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeDuration { duration } => {
                write!(f, "simulation duration must be non-negative, got {duration}s")
            }
        }
    }
}

impl Error for ClockError {}
