//! Quantity series: values kept in lockstep with a shared time grid.
//!
//! A [`QuantitySeries`] holds one physical quantity sampled over a run —
//! a node pressure, a link flow, a tank level, a pump energy — paired
//! positionally with the [`TimeGrid`] it is bound to. Each network-element
//! object owns its series and shares the grid through an `Rc` handle, so a
//! series can never outlive the grid it reads instants from.
//!
//! Two filled shapes are accepted against `k = interior_count`:
//! - compact, `k` values: one value per interval. Position `k` wraps to
//!   position 0, so a single stored value answers for the final instant
//!   too and a constant-over-time quantity needs no duplicated storage.
//! - full, `k + 1` values: one value per addressable instant including the
//!   final one, produced by an explicit re-commit at `t = duration`.
//!
//! Anything else is unreadable; readers check [`QuantitySeries::state`]
//! and treat a non-consistent series as "no data for this run".

use std::rc::Rc;

use aquanet_core::Instant;

use crate::classify::{self, SeriesState};
use crate::error::SeriesError;
use crate::grid::TimeGrid;

/// A value ledger bound to exactly one [`TimeGrid`].
///
/// Filled by [`QuantitySeries::commit`] in lockstep with the grid during
/// simulation stepping, read positionally or by instant after the run,
/// and [cleared](QuantitySeries::clear) for reuse across repeated runs of
/// the same campaign.
#[derive(Clone, Debug)]
pub struct QuantitySeries<T> {
    /// The grid providing instants and addressable length.
    grid: Rc<TimeGrid>,
    /// Sampled values, positionally paired with the grid.
    values: Vec<T>,
}

impl<T> QuantitySeries<T> {
    /// Create an empty series bound to `grid`.
    pub fn new(grid: Rc<TimeGrid>) -> Self {
        Self {
            grid,
            values: Vec::new(),
        }
    }

    /// Create a series pre-filled with `value` repeated to the compact
    /// shape, for quantities known ahead of any simulation (demands,
    /// settings).
    pub fn filled_with(grid: Rc<TimeGrid>, value: T) -> Self
    where
        T: Clone,
    {
        let n = grid.interior_count();
        Self {
            values: vec![value; n],
            grid,
        }
    }

    /// The grid this series is bound to.
    pub fn grid(&self) -> &Rc<TimeGrid> {
        &self.grid
    }

    /// Number of stored values.
    pub fn n_values(&self) -> usize {
        self.values.len()
    }

    /// Shortfall against the compact shape; 0 when the series is readable.
    pub fn n_missing(&self) -> usize {
        if self.state().is_consistent() {
            0
        } else {
            self.grid.interior_count().saturating_sub(self.values.len())
        }
    }

    /// Derived readability state; never cached.
    pub fn state(&self) -> SeriesState {
        classify::state_of(&self.grid, self.values.len())
    }

    /// Append a value for instant `t`.
    ///
    /// The sole write path during stepping: the driver commits the grid
    /// first, then every dependent series with the same instant, once per
    /// simulated instant per tracked quantity. `t` must equal the grid
    /// instant at the next value position; a full series rejects further
    /// commits. On failure both ledgers are left unchanged.
    pub fn commit(&mut self, t: Instant, value: T) -> Result<(), SeriesError> {
        let pos = self.values.len();
        let k = self.grid.interior_count();
        if pos > k {
            return Err(SeriesError::AtCapacity {
                n_values: pos,
                n_instants: k + 1,
            });
        }
        let expected = self.grid.at(pos)?;
        if t != expected {
            return Err(SeriesError::CommitMismatch {
                instant: t,
                expected,
            });
        }
        self.values.push(value);
        Ok(())
    }

    /// Undo the last commit. Silent no-op when empty.
    pub fn rollback(&mut self) {
        self.values.pop();
    }

    /// Drop all values, keeping the grid binding, for the next run.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Require the consistent state before any read.
    fn check_readable(&self) -> Result<usize, SeriesError> {
        let k = self.grid.interior_count();
        if !self.state().is_consistent() {
            return Err(SeriesError::NotReadable {
                n_values: self.values.len(),
                interior_count: k,
            });
        }
        Ok(k)
    }

    /// Instant/value pair at `pos`, for `pos` in `[0, interior_count]`.
    ///
    /// A compact series answers the final position with the value at
    /// position 0 (the wrap-around rule).
    pub fn at(&self, pos: usize) -> Result<(Instant, &T), SeriesError> {
        let k = self.check_readable()?;
        let instant = self.grid.at(pos)?;
        Ok((instant, self.value_at(pos, k)))
    }

    /// Value holding at instant `t`, resolved through the grid's exact
    /// lookup.
    ///
    /// Instant 0 resolves to position 0; an in-range instant that matches
    /// no sample is [`SeriesError::InstantNotFound`].
    pub fn when_t(&self, t: Instant) -> Result<&T, SeriesError> {
        let k = self.check_readable()?;
        let pos = self
            .grid
            .find_pos(t)?
            .ok_or(SeriesError::InstantNotFound { instant: t })?;
        Ok(self.value_at(pos, k))
    }

    /// First instant/value pair, position 0.
    pub fn front(&self) -> Result<(Instant, &T), SeriesError> {
        self.at(0)
    }

    /// Final instant/value pair, position `interior_count`.
    pub fn back(&self) -> Result<(Instant, &T), SeriesError> {
        let k = self.check_readable()?;
        self.at(k)
    }

    /// Value holding from the start of the run.
    pub fn when_t0(&self) -> Result<&T, SeriesError> {
        self.at(0).map(|(_, v)| v)
    }

    /// Value at the simulation horizon (the duration).
    pub fn when_th(&self) -> Result<&T, SeriesError> {
        self.back().map(|(_, v)| v)
    }

    /// Positional value read with the wrap-around rule applied.
    ///
    /// `pos` must already be validated against the grid.
    fn value_at(&self, pos: usize, k: usize) -> &T {
        debug_assert!(pos <= k, "position {pos} past the series end");
        if self.values.len() == k && pos == k {
            &self.values[0]
        } else {
            &self.values[pos]
        }
    }

    /// Forward/reverse random access over instant/value pairs.
    ///
    /// A non-consistent series iterates as empty, so metric loops need no
    /// separate state check.
    pub fn iter(&self) -> SeriesIter<'_, T> {
        let tail = if self.state().is_consistent() {
            self.grid.interior_count() + 1
        } else {
            0
        };
        SeriesIter {
            series: self,
            head: 0,
            tail,
        }
    }
}

impl<'a, T> IntoIterator for &'a QuantitySeries<T> {
    type Item = (Instant, &'a T);
    type IntoIter = SeriesIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended iterator over a series' instant/value pairs.
#[derive(Clone, Debug)]
pub struct SeriesIter<'a, T> {
    series: &'a QuantitySeries<T>,
    head: usize,
    tail: usize,
}

impl<'a, T> SeriesIter<'a, T> {
    fn entry_at(&self, pos: usize) -> (Instant, &'a T) {
        let series = self.series;
        let k = series.grid.interior_count();
        (series.grid.instant_at(pos), series.value_at(pos, k))
    }
}

impl<'a, T> Iterator for SeriesIter<'a, T> {
    type Item = (Instant, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.head >= self.tail {
            return None;
        }
        let entry = self.entry_at(self.head);
        self.head += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for SeriesIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head >= self.tail {
            return None;
        }
        self.tail -= 1;
        Some(self.entry_at(self.tail))
    }
}

impl<T> ExactSizeIterator for SeriesIter<'_, T> {}
