//! Named per-run registry of sampling grids.
//!
//! One [`GridStore`] lives in each network/run context and hands out shared
//! grid handles by name. Two entries always exist: the `constant` grid,
//! kept empty so its two implicit boundary instants span the run as a
//! single interval, and the `results` grid, refilled by the solver wrapper
//! on every simulation. Problem code can register further grids for
//! coarser sampling (e.g. a reporting grid distinct from the raw solver
//! steps).

use std::rc::Rc;

use aquanet_core::SimClock;
use indexmap::IndexMap;

use crate::error::StoreError;
use crate::grid::TimeGrid;

/// Name of the built-in one-interval grid for time-invariant quantities.
pub const CONSTANT_GRID: &str = "constant";

/// Name of the built-in grid holding raw simulation-result instants.
pub const RESULTS_GRID: &str = "results";

/// Registry of the grids belonging to one run context.
///
/// Entries iterate in insertion order, the two built-ins first.
#[derive(Debug)]
pub struct GridStore {
    /// The clock every registered grid is bound to.
    clock: Rc<SimClock>,
    /// Name-keyed grid handles, built-ins included.
    grids: IndexMap<String, Rc<TimeGrid>>,
}

impl GridStore {
    /// Create a store bound to `clock`, with the two built-in grids.
    pub fn new(clock: Rc<SimClock>) -> Self {
        let mut grids = IndexMap::new();
        grids.insert(
            CONSTANT_GRID.to_owned(),
            Rc::new(TimeGrid::new(Rc::clone(&clock))),
        );
        grids.insert(
            RESULTS_GRID.to_owned(),
            Rc::new(TimeGrid::new(Rc::clone(&clock))),
        );
        Self { clock, grids }
    }

    /// The clock shared by every grid in this store.
    pub fn clock(&self) -> &Rc<SimClock> {
        &self.clock
    }

    /// The built-in one-interval grid. Commit nothing to it.
    pub fn constant(&self) -> &Rc<TimeGrid> {
        &self.grids[CONSTANT_GRID]
    }

    /// The built-in simulation-results grid.
    pub fn results(&self) -> &Rc<TimeGrid> {
        &self.grids[RESULTS_GRID]
    }

    /// Register a fresh grid under `name` and return its handle.
    ///
    /// Built-in names are rejected with [`StoreError::ReservedName`],
    /// existing ones with [`StoreError::DuplicateName`].
    pub fn create(&mut self, name: &str) -> Result<Rc<TimeGrid>, StoreError> {
        if name == CONSTANT_GRID || name == RESULTS_GRID {
            return Err(StoreError::ReservedName {
                name: name.to_owned(),
            });
        }
        if self.grids.contains_key(name) {
            return Err(StoreError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let grid = Rc::new(TimeGrid::new(Rc::clone(&self.clock)));
        self.grids.insert(name.to_owned(), Rc::clone(&grid));
        Ok(grid)
    }

    /// Handle to the grid registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Rc<TimeGrid>, StoreError> {
        self.grids.get(name).ok_or_else(|| StoreError::UnknownName {
            name: name.to_owned(),
        })
    }

    /// Remove a user-registered grid.
    ///
    /// Series holding the grid's handle keep it alive; the store merely
    /// stops handing it out. Built-ins cannot be discarded.
    pub fn discard(&mut self, name: &str) -> Result<(), StoreError> {
        if name == CONSTANT_GRID || name == RESULTS_GRID {
            return Err(StoreError::ReservedName {
                name: name.to_owned(),
            });
        }
        // shift_remove keeps the remaining insertion order intact.
        self.grids
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::UnknownName {
                name: name.to_owned(),
            })
    }

    /// Number of registered grids, built-ins included.
    pub fn n_grids(&self) -> usize {
        self.grids.len()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<TimeGrid>)> {
        self.grids.iter().map(|(name, grid)| (name.as_str(), grid))
    }
}
