//! Aquanet: temporal data for water-network design-optimization experiments.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Aquanet sub-crates. For most users, adding `aquanet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use aquanet::prelude::*;
//! use std::rc::Rc;
//!
//! // One clock per run context; grids and series share it by handle.
//! let clock = Rc::new(SimClock::new(7_200).unwrap());
//! let grid = Rc::new(TimeGrid::new(Rc::clone(&clock)));
//! let mut pressure: QuantitySeries<f64> = QuantitySeries::new(Rc::clone(&grid));
//!
//! // The solver wrapper commits both ledgers once per simulated instant.
//! for (t, value) in [(3_600, 41.2), (7_200, 39.8)] {
//!     grid.commit(t).unwrap();
//!     pressure.commit(t, value).unwrap();
//! }
//!
//! assert!(pressure.state().is_consistent());
//! assert_eq!(*pressure.when_t(3_600).unwrap(), 41.2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `aquanet-core` | The `Instant` second count and the run clock |
//! | [`series`] | `aquanet-series` | Time grids, quantity series, classification, grid store |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core time types (`aquanet-core`).
///
/// The [`core::Instant`] second count and the per-run [`core::SimClock`].
pub use aquanet_core as core;

/// Grids, series, and their support types (`aquanet-series`).
///
/// The duration-bound [`series::TimeGrid`], the lockstep
/// [`series::QuantitySeries`], shape classification, and the named
/// [`series::GridStore`].
pub use aquanet_series as series;

/// Common imports for typical Aquanet usage.
///
/// ```rust
/// use aquanet::prelude::*;
/// ```
pub mod prelude {
    pub use aquanet_core::{ClockError, Instant, SimClock};
    pub use aquanet_series::{
        GridError, GridStore, QuantitySeries, Sampling, SeriesError, SeriesState, StoreError,
        TimeGrid,
    };
}
