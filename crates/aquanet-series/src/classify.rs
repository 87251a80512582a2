//! Shape and spacing classification.
//!
//! Pure derivations, recomputed on every call: the state of a series is a
//! function of its value count and the bound grid's interior count, and the
//! spacing tag is a function of the grid's conceptual gap sequence. Nothing
//! here is cached, so classification can never desynchronize from the
//! ledgers it describes.

use aquanet_core::Instant;
use smallvec::SmallVec;

use crate::grid::TimeGrid;

/// Advisory spacing of a grid's conceptual instant sequence.
///
/// Consumers use this to pick cheaper numerical paths, e.g. fixed-step
/// integration over a [`Sampling::Regular`] grid. Never load-bearing for
/// correctness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// At most one interval: a single value spans the whole duration.
    Constant,
    /// More than one interval, every gap equal.
    Regular,
    /// More than one interval with unequal gaps.
    Irregular,
}

/// Readability state of a quantity series, derived at read time.
///
/// Exactly one variant holds at any time. Transitions are driven solely by
/// comparing the value count against the grid's interior count; there is no
/// stored state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesState {
    /// The value count matches neither accepted shape. Happens transiently
    /// while a duration change awaits a refill, or after a partial fill
    /// shrank below the grid.
    Malformed,
    /// No values yet: a fresh, cleared, or mid-run-abandoned series.
    Empty,
    /// One of the two accepted shapes, readable everywhere.
    Consistent(Sampling),
}

impl SeriesState {
    /// Whether reads are allowed.
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent(_))
    }
}

/// Derive the state for `n_values` samples over `grid`.
///
/// Accepted shapes against `k = interior_count`: `k` values (compact, one
/// per interval) and `k + 1` values (full, one per addressable instant
/// including the final one). Zero values is [`SeriesState::Empty`] even
/// when `k` is zero.
pub fn state_of(grid: &TimeGrid, n_values: usize) -> SeriesState {
    let k = grid.interior_count();
    if n_values == 0 {
        SeriesState::Empty
    } else if n_values == k || n_values == k + 1 {
        SeriesState::Consistent(sampling_of(grid))
    } else {
        SeriesState::Malformed
    }
}

/// Derive the spacing tag from the conceptual sequence
/// `{0} ∪ interior ∪ {duration}`, deduplicated.
pub fn sampling_of(grid: &TimeGrid) -> Sampling {
    let mut gaps: SmallVec<[Instant; 8]> = SmallVec::new();
    let mut prev: Instant = 0;
    for t in grid.iter() {
        if t != prev {
            gaps.push(t - prev);
            prev = t;
        }
    }
    match gaps.as_slice() {
        [] | [_] => Sampling::Constant,
        [first, rest @ ..] => {
            if rest.iter().all(|g| g == first) {
                Sampling::Regular
            } else {
                Sampling::Irregular
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquanet_core::SimClock;
    use std::rc::Rc;

    fn make_grid(duration: Instant) -> TimeGrid {
        TimeGrid::new(Rc::new(SimClock::new(duration).unwrap()))
    }

    #[test]
    fn empty_grid_is_constant() {
        assert_eq!(make_grid(3_600).sampling(), Sampling::Constant);
        assert_eq!(make_grid(0).sampling(), Sampling::Constant);
    }

    #[test]
    fn single_interval_is_constant() {
        let grid = make_grid(3_600);
        grid.commit(3_600).unwrap();
        assert_eq!(grid.sampling(), Sampling::Constant);
    }

    #[test]
    fn equal_gaps_are_regular() {
        let grid = make_grid(3_600);
        grid.commit(1_200).unwrap();
        grid.commit(2_400).unwrap();
        assert_eq!(grid.sampling(), Sampling::Regular);
        // A stored final instant dedups against the synthesized end.
        grid.commit(3_600).unwrap();
        assert_eq!(grid.sampling(), Sampling::Regular);
    }

    #[test]
    fn unequal_gaps_are_irregular() {
        let grid = make_grid(3_600);
        grid.commit(600).unwrap();
        grid.commit(2_400).unwrap();
        assert_eq!(grid.sampling(), Sampling::Irregular);
    }

    #[test]
    fn state_follows_the_two_lengths() {
        let grid = make_grid(3_600);
        grid.commit(1_800).unwrap();
        grid.commit(3_600).unwrap();
        assert_eq!(state_of(&grid, 0), SeriesState::Empty);
        assert_eq!(state_of(&grid, 1), SeriesState::Malformed);
        assert_eq!(
            state_of(&grid, 2),
            SeriesState::Consistent(Sampling::Regular)
        );
        assert_eq!(
            state_of(&grid, 3),
            SeriesState::Consistent(Sampling::Regular)
        );
        assert_eq!(state_of(&grid, 4), SeriesState::Malformed);
    }

    #[test]
    fn exactly_one_state_holds() {
        let grid = make_grid(3_600);
        grid.commit(1_200).unwrap();
        for n_values in 0..4 {
            let state = state_of(&grid, n_values);
            let tags = [
                matches!(state, SeriesState::Malformed),
                matches!(state, SeriesState::Empty),
                state.is_consistent(),
            ];
            assert_eq!(tags.iter().filter(|&&t| t).count(), 1);
        }
    }
}
