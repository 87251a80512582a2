//! Duration-bound grids of sample instants.
//!
//! A [`TimeGrid`] is the ordered list of instants at which one simulation
//! run produced samples. Instant 0 and the clock's duration are implicit
//! boundaries, never stored; only strictly-interior instants live in
//! storage. The addressable conceptual sequence is `{interior…, duration}`:
//! positions `0..=interior_count`, with the final position synthesized from
//! the clock.
//!
//! The lifecycle per run is:
//! 1. the solver wrapper calls [`TimeGrid::commit`] once per simulated
//!    instant, together with every dependent series' commit;
//! 2. metric code reads positions and lookups after the run;
//! 3. between runs, a duration change on the clock invalidates the grid,
//!    which reconciles itself lazily on its next access;
//! 4. [`TimeGrid::reset`] returns it to the boundary-only state for refill.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use aquanet_core::{Instant, SimClock};
use smallvec::SmallVec;

use crate::classify::{self, Sampling};
use crate::error::GridError;

/// Inline capacity for interior storage. Pattern and coarse reporting grids
/// hold a handful of instants; dense simulation-result grids spill to the
/// heap.
type InteriorVec = SmallVec<[Instant; 8]>;

/// An ordered, duration-bound ledger of sample instants.
///
/// Shared by handle: the run context owns `Rc<TimeGrid>`s and every
/// [`QuantitySeries`](crate::QuantitySeries) tracking a quantity on this
/// grid holds a clone. Interior mutability keeps the whole graph usable
/// through shared handles on the single thread driving one simulation.
///
/// Invariants: interior instants are strictly increasing and lie in
/// `(0, duration]`. The interior sequence may be empty, meaning only the
/// two implicit boundary instants exist.
#[derive(Debug)]
pub struct TimeGrid {
    /// The clock providing the implicit final instant.
    clock: Rc<SimClock>,
    /// Strictly increasing interior instants.
    interior: RefCell<InteriorVec>,
    /// Clock version this grid last reconciled against.
    seen_version: Cell<u64>,
}

impl TimeGrid {
    /// Create an empty grid bound to `clock`.
    pub fn new(clock: Rc<SimClock>) -> Self {
        let seen_version = Cell::new(clock.version());
        Self {
            clock,
            interior: RefCell::new(InteriorVec::new()),
            seen_version,
        }
    }

    /// The clock this grid is bound to.
    pub fn clock(&self) -> &Rc<SimClock> {
        &self.clock
    }

    /// The implicit final instant, the clock's current duration.
    pub fn duration(&self) -> Instant {
        self.clock.duration()
    }

    /// Reconcile lazily if the clock's duration moved since the last access.
    ///
    /// Called on every entry point, so a stale grid can never serve a read.
    fn sync(&self) {
        if self.seen_version.get() != self.clock.version() {
            self.reconcile_to_duration();
        }
    }

    /// Drop every stored instant greater than the current duration.
    ///
    /// An instant exactly equal to the (possibly lowered) duration is
    /// retained: it stays interior and is also addressable as the
    /// synthesized end.
    pub fn reconcile_to_duration(&self) {
        let duration = self.clock.duration();
        let mut interior = self.interior.borrow_mut();
        let keep = interior.partition_point(|&t| t <= duration);
        interior.truncate(keep);
        self.seen_version.set(self.clock.version());
    }

    /// Number of stored interior instants.
    pub fn interior_count(&self) -> usize {
        self.sync();
        self.interior.borrow().len()
    }

    /// Addressable conceptual length, `interior_count + 1`.
    ///
    /// Position `interior_count` is the synthesized end; the implicit start
    /// is reachable through [`TimeGrid::front`] instead of a position.
    pub fn n_instants(&self) -> usize {
        self.interior_count() + 1
    }

    /// Instant at `pos`.
    ///
    /// Valid for `pos` in `[0, interior_count]`; the final position returns
    /// the duration. Larger positions fail with
    /// [`GridError::PositionOutOfRange`].
    pub fn at(&self, pos: usize) -> Result<Instant, GridError> {
        self.sync();
        let interior = self.interior.borrow();
        if pos < interior.len() {
            Ok(interior[pos])
        } else if pos == interior.len() {
            Ok(self.clock.duration())
        } else {
            Err(GridError::PositionOutOfRange {
                pos,
                n_instants: interior.len() + 1,
            })
        }
    }

    /// Unchecked positional read for iteration.
    ///
    /// `pos` must be `< n_instants()`; violated only by an iterator bug,
    /// asserted in debug builds.
    pub(crate) fn instant_at(&self, pos: usize) -> Instant {
        self.sync();
        let interior = self.interior.borrow();
        debug_assert!(pos <= interior.len(), "position {pos} past the grid end");
        if pos < interior.len() {
            interior[pos]
        } else {
            self.clock.duration()
        }
    }

    /// The implicit start, always instant 0.
    pub fn front(&self) -> Instant {
        0
    }

    /// The implicit end, always the clock's current duration.
    pub fn back(&self) -> Instant {
        self.clock.duration()
    }

    /// Append a sample instant.
    ///
    /// `t` must be strictly greater than the last stored instant (strictly
    /// positive for the first commit) and at most the duration.
    /// Re-committing the last stored instant is the one silent no-op, so a
    /// solver reporting the same step twice costs nothing.
    pub fn commit(&self, t: Instant) -> Result<(), GridError> {
        self.sync();
        let duration = self.clock.duration();
        if t > duration {
            return Err(GridError::BeyondDuration {
                instant: t,
                duration,
            });
        }
        let mut interior = self.interior.borrow_mut();
        match interior.last().copied() {
            Some(last) if t == last => Ok(()),
            Some(last) if t < last => Err(GridError::OutOfOrder { instant: t, last }),
            None if t <= 0 => Err(GridError::NonPositiveInstant { instant: t }),
            _ => {
                interior.push(t);
                Ok(())
            }
        }
    }

    /// Remove the last committed instant. Silent no-op when none remain.
    pub fn rollback(&self) {
        self.sync();
        self.interior.borrow_mut().pop();
    }

    /// Back to the boundary-only state, keeping the clock binding.
    pub fn reset(&self) {
        self.interior.borrow_mut().clear();
        self.seen_version.set(self.clock.version());
    }

    /// Reject lookup instants outside the closed interval `[0, duration]`.
    fn check_in_range(&self, t: Instant) -> Result<Instant, GridError> {
        let duration = self.clock.duration();
        if t < 0 || t > duration {
            return Err(GridError::InstantOutOfRange {
                instant: t,
                duration,
            });
        }
        Ok(duration)
    }

    /// Position holding exactly instant `t`, or `None`.
    ///
    /// Instant 0 resolves to position 0: the first stored value of a series
    /// holds from the start. The duration resolves to its interior position
    /// when stored, otherwise to the synthesized final position.
    pub fn find_pos(&self, t: Instant) -> Result<Option<usize>, GridError> {
        self.sync();
        let duration = self.check_in_range(t)?;
        if t == 0 {
            return Ok(Some(0));
        }
        let interior = self.interior.borrow();
        match interior.binary_search(&t) {
            Ok(pos) => Ok(Some(pos)),
            Err(_) if t == duration => Ok(Some(interior.len())),
            Err(_) => Ok(None),
        }
    }

    /// Position of the last interior instant not after `t`, or `None` when
    /// no interior instant precedes `t`.
    pub fn lower_bound_pos(&self, t: Instant) -> Result<Option<usize>, GridError> {
        self.sync();
        self.check_in_range(t)?;
        let interior = self.interior.borrow();
        let n_before = interior.partition_point(|&x| x <= t);
        Ok(n_before.checked_sub(1))
    }

    /// Position of the first interior instant after `t`, or `None` when
    /// none follows.
    pub fn upper_bound_pos(&self, t: Instant) -> Result<Option<usize>, GridError> {
        self.sync();
        self.check_in_range(t)?;
        let interior = self.interior.borrow();
        let pos = interior.partition_point(|&x| x <= t);
        Ok((pos < interior.len()).then_some(pos))
    }

    /// Whether `t` is an addressable instant: a boundary or a stored
    /// interior instant.
    pub fn contains(&self, t: Instant) -> bool {
        self.sync();
        if t < 0 || t > self.clock.duration() {
            return false;
        }
        t == 0 || t == self.clock.duration() || self.interior.borrow().binary_search(&t).is_ok()
    }

    /// Advisory spacing of the conceptual instant sequence.
    pub fn sampling(&self) -> Sampling {
        classify::sampling_of(self)
    }

    /// Forward/reverse random access over positions `0..=interior_count`.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            head: 0,
            tail: self.n_instants(),
        }
    }
}

impl<'a> IntoIterator for &'a TimeGrid {
    type Item = Instant;
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended iterator over a grid's conceptual instant sequence.
#[derive(Clone, Debug)]
pub struct GridIter<'a> {
    grid: &'a TimeGrid,
    head: usize,
    tail: usize,
}

impl Iterator for GridIter<'_> {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        if self.head >= self.tail {
            return None;
        }
        let t = self.grid.instant_at(self.head);
        self.head += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for GridIter<'_> {
    fn next_back(&mut self) -> Option<Instant> {
        if self.head >= self.tail {
            return None;
        }
        self.tail -= 1;
        Some(self.grid.instant_at(self.tail))
    }
}

impl ExactSizeIterator for GridIter<'_> {}
