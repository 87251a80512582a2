//! Core time types for the Aquanet water-network simulation toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! [`Instant`] second count, the per-run [`SimClock`] that owns a
//! simulation's start shift and total duration, and the clock error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod instant;

pub use clock::SimClock;
pub use error::ClockError;
pub use instant::Instant;
