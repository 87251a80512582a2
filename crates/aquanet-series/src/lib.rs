//! Temporal data engine for the Aquanet water-network simulation toolkit.
//!
//! Represents, validates, and queries the time-varying outputs of a
//! hydraulic simulation run: an ordered, duration-bound grid of sample
//! instants ([`TimeGrid`]) paired with per-quantity value ledgers kept in
//! lockstep ([`QuantitySeries`]). The pairing underlies every per-node and
//! per-link measurement and tolerates partial fill during stepped
//! simulation, regular and irregular sampling, single-snapshot runs, and
//! duration changes between successive runs of the same campaign.
//!
//! The solver wrapper is the sole writer: one `commit` per simulated
//! instant on the grid and on every dependent series. Metric code reads
//! after the run and must treat a non-[`Consistent`](SeriesState::Consistent)
//! series as "no data". The whole graph is single-threaded; concurrent
//! candidate evaluations each own their own clock, grids, and series.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod classify;
pub mod error;
pub mod grid;
pub mod series;
pub mod store;

pub use classify::{Sampling, SeriesState};
pub use error::{GridError, SeriesError, StoreError};
pub use grid::{GridIter, TimeGrid};
pub use series::{QuantitySeries, SeriesIter};
pub use store::{GridStore, CONSTANT_GRID, RESULTS_GRID};
