//! Integration test: the full per-campaign lifecycle of one ledger pair.
//!
//! Drives a grid and its dependent series the way the hydraulic-solver
//! wrapper does — one commit per simulated instant on both ledgers — then
//! reads the run back, changes the duration between runs, and refills.

use std::rc::Rc;

use aquanet_core::{Instant, SimClock};
use aquanet_series::{
    GridStore, QuantitySeries, Sampling, SeriesError, SeriesState, TimeGrid,
};

/// One simulated run: commit every instant in `steps` to the grid and a
/// deterministic value per instant to both tracked series.
fn run_simulation(
    grid: &TimeGrid,
    pressure: &mut QuantitySeries<f64>,
    flow: &mut QuantitySeries<f64>,
    steps: &[Instant],
) {
    for &t in steps {
        grid.commit(t).unwrap();
        pressure.commit(t, 40.0 + t as f64 / 1_000.0).unwrap();
        flow.commit(t, 12.0 - t as f64 / 2_000.0).unwrap();
    }
}

#[test]
fn stepped_run_then_read_back() {
    let clock = Rc::new(SimClock::new(86_400).unwrap());
    let grid = Rc::new(TimeGrid::new(Rc::clone(&clock)));
    let mut pressure = QuantitySeries::new(Rc::clone(&grid));
    let mut flow = QuantitySeries::new(Rc::clone(&grid));

    let steps: Vec<Instant> = (1..=24).map(|h| h * 3_600).collect();
    run_simulation(&grid, &mut pressure, &mut flow, &steps);

    assert_eq!(grid.interior_count(), 24);
    assert_eq!(grid.sampling(), Sampling::Regular);
    assert_eq!(pressure.state(), SeriesState::Consistent(Sampling::Regular));

    // Hourly sampling ends exactly at the duration, so the compact shape
    // covers every addressable position including the synthesized end.
    assert_eq!(
        *pressure.when_t(3_600).unwrap(),
        40.0 + 3_600_f64 / 1_000.0
    );
    assert_eq!(pressure.back().unwrap().0, 86_400);
    assert_eq!(flow.iter().len(), 25);
    let total: f64 = flow.iter().map(|(_, v)| *v).sum();
    assert!(total.is_finite());
}

#[test]
fn partial_fill_reads_as_no_data() {
    let clock = Rc::new(SimClock::new(86_400).unwrap());
    let grid = Rc::new(TimeGrid::new(Rc::clone(&clock)));
    let mut pressure = QuantitySeries::new(Rc::clone(&grid));
    let mut flow = QuantitySeries::new(Rc::clone(&grid));

    // The solver fails mid-run: the grid went one instant further than the
    // series the wrapper was still about to fill.
    run_simulation(&grid, &mut pressure, &mut flow, &[3_600, 7_200]);
    grid.commit(10_800).unwrap();

    assert_eq!(pressure.state(), SeriesState::Malformed);
    assert!(matches!(
        pressure.when_t(3_600),
        Err(SeriesError::NotReadable { .. })
    ));
    assert_eq!(pressure.iter().count(), 0);

    // Abandoning the run resets both ledgers for the next candidate.
    grid.reset();
    pressure.clear();
    flow.clear();
    assert_eq!(pressure.state(), SeriesState::Empty);
    assert_eq!(grid.interior_count(), 0);
}

#[test]
fn duration_change_between_runs_of_one_campaign() {
    let clock = Rc::new(SimClock::new(7_200).unwrap());
    let grid = Rc::new(TimeGrid::new(Rc::clone(&clock)));
    let mut pressure = QuantitySeries::new(Rc::clone(&grid));
    let mut flow = QuantitySeries::new(Rc::clone(&grid));

    run_simulation(&grid, &mut pressure, &mut flow, &[1_800, 3_600, 5_400, 7_200]);
    assert!(pressure.state().is_consistent());

    // Run configuration halves the horizon between runs. The grid
    // reconciles on its next access, keeping the instant that exactly
    // matches the new duration.
    clock.set_duration(3_600).unwrap();
    assert_eq!(grid.interior_count(), 2);
    assert_eq!(grid.at(0).unwrap(), 1_800);
    assert_eq!(grid.at(1).unwrap(), 3_600);
    assert_eq!(grid.back(), 3_600);

    // The next run refills from scratch.
    grid.reset();
    pressure.clear();
    flow.clear();
    run_simulation(&grid, &mut pressure, &mut flow, &[1_800, 3_600]);
    assert_eq!(pressure.state(), SeriesState::Consistent(Sampling::Regular));
    assert_eq!(pressure.back().unwrap().0, 3_600);
}

#[test]
fn irregular_solver_steps_classify_as_irregular() {
    let clock = Rc::new(SimClock::new(7_200).unwrap());
    let grid = Rc::new(TimeGrid::new(Rc::clone(&clock)));
    let mut pressure = QuantitySeries::new(Rc::clone(&grid));
    let mut flow = QuantitySeries::new(Rc::clone(&grid));

    // Tank dynamics force the solver off its nominal step.
    run_simulation(
        &grid,
        &mut pressure,
        &mut flow,
        &[1_800, 2_700, 3_600, 7_200],
    );
    assert_eq!(grid.sampling(), Sampling::Irregular);
    assert_eq!(
        pressure.state(),
        SeriesState::Consistent(Sampling::Irregular)
    );
}

#[test]
fn store_backed_run_context() {
    let clock = Rc::new(SimClock::new(86_400).unwrap());
    let mut store = GridStore::new(Rc::clone(&clock));
    let reporting = store.create("reporting").unwrap();

    // A constant quantity lives on the built-in one-interval grid.
    let elevation = QuantitySeries::filled_with(
        Rc::clone(store.constant()),
        152.4_f64,
    );
    // An empty grid has no interval value slots; the single-value full
    // shape is the way to store one number for the whole run.
    assert_eq!(elevation.state(), SeriesState::Empty);
    let mut elevation = QuantitySeries::new(Rc::clone(store.constant()));
    elevation.commit(86_400, 152.4).unwrap();
    assert_eq!(
        elevation.state(),
        SeriesState::Consistent(Sampling::Constant)
    );
    assert_eq!(*elevation.when_t(0).unwrap(), 152.4);
    assert_eq!(*elevation.when_t(43_200).unwrap_or(&152.4), 152.4);

    // Results land on the built-in results grid; a coarser reporting grid
    // samples every six hours.
    let results = Rc::clone(store.results());
    let mut head = QuantitySeries::new(Rc::clone(&results));
    for h in 1..=24 {
        let t = h * 3_600;
        results.commit(t).unwrap();
        head.commit(t, 100.0 + h as f64).unwrap();
    }
    for h in [6, 12, 18, 24] {
        reporting.commit(h * 3_600).unwrap();
    }
    assert_eq!(results.interior_count(), 24);
    assert_eq!(reporting.interior_count(), 4);
    assert_eq!(reporting.sampling(), Sampling::Regular);
    assert!(head.state().is_consistent());
}
